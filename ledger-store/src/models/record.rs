//! Key-prefix to record-type mapping.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Every kind of record the ledger holds, each owning one key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Invoice,
    Project,
    Testimonial,
    Contact,
    Content,
    Analytics,
    Counter,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Invoice,
        RecordKind::Project,
        RecordKind::Testimonial,
        RecordKind::Contact,
        RecordKind::Content,
        RecordKind::Analytics,
        RecordKind::Counter,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            RecordKind::Invoice => "invoice:",
            RecordKind::Project => "project:",
            RecordKind::Testimonial => "testimonial:",
            RecordKind::Contact => "contact:",
            RecordKind::Content => "site:",
            RecordKind::Analytics => "analytics:",
            RecordKind::Counter => "counter:",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Invoice => "invoice",
            RecordKind::Project => "project",
            RecordKind::Testimonial => "testimonial",
            RecordKind::Contact => "contact",
            RecordKind::Content => "content",
            RecordKind::Analytics => "analytics",
            RecordKind::Counter => "counter",
        }
    }

    /// Full key for a suffix under this kind.
    pub fn key(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix(), suffix)
    }

    /// Classify a raw key by its prefix.
    pub fn of_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| key.starts_with(kind.prefix()))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record type stored under a single [`RecordKind`].
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const KIND: RecordKind;

    /// Key portion after the kind prefix.
    fn key_suffix(&self) -> String;

    fn key(&self) -> String {
        Self::KIND.key(&self.key_suffix())
    }
}
