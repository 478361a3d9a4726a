//! Portfolio project model.

use chrono::{DateTime, Utc};
use ledger_store::{Entity, RecordKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Showcase entry on the public portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Image URL or data URI.
    #[serde(default)]
    pub image: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Project {
    const KIND: RecordKind = RecordKind::Project;

    fn key_suffix(&self) -> String {
        self.id.to_string()
    }
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl Project {
    pub fn create(input: NewProject, now: DateTime<Utc>) -> Self {
        Self {
            // v7 keeps key order aligned with creation order.
            id: Uuid::now_v7(),
            title: input.title,
            category: input.category,
            description: input.description,
            image: input.image,
            created_at: now,
            updated_at: None,
        }
    }

    /// Merge `patch` into this record.
    pub fn apply(&mut self, patch: ProjectPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        self.updated_at = Some(now);
    }
}
