//! Page analytics events and dashboard counters.

use chrono::{DateTime, Utc};
use ledger_store::{Entity, RecordKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Event name counted as a page view on the dashboard.
pub const PAGE_VIEW_EVENT: &str = "page_view";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub event: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl Entity for AnalyticsEvent {
    const KIND: RecordKind = RecordKind::Analytics;

    fn key_suffix(&self) -> String {
        self.id.to_string()
    }
}

impl AnalyticsEvent {
    pub fn create(event: String, data: serde_json::Value, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            event,
            data,
            timestamp: now,
        }
    }
}

/// Admin dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: usize,
    pub total_invoices: usize,
    pub total_testimonials: usize,
    pub total_views: usize,
}
