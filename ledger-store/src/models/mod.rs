//! Record schema for the ledger.

mod record;

pub use record::{Entity, RecordKind};
