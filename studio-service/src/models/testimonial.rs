//! Client testimonial model.

use chrono::{DateTime, Utc};
use ledger_store::{Entity, RecordKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub client_name: String,
    #[serde(default)]
    pub client_company: String,
    #[serde(default)]
    pub client_role: String,
    pub testimonial: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

impl Entity for Testimonial {
    const KIND: RecordKind = RecordKind::Testimonial;

    fn key_suffix(&self) -> String {
        self.id.to_string()
    }
}

/// Input for creating a testimonial.
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub client_name: String,
    pub client_company: String,
    pub client_role: String,
    pub testimonial: String,
    pub rating: u8,
}

impl Testimonial {
    pub fn create(input: NewTestimonial, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            client_name: input.client_name,
            client_company: input.client_company,
            client_role: input.client_role,
            testimonial: input.testimonial,
            rating: input.rating,
            created_at: now,
        }
    }
}
