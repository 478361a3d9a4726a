//! Contact form submissions.

use chrono::{DateTime, Utc};
use ledger_store::{Entity, RecordKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for ContactMessage {
    const KIND: RecordKind = RecordKind::Contact;

    fn key_suffix(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn create(input: NewContactMessage, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
            created_at: now,
        }
    }
}
