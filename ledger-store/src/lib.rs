//! Ledger Store - flat key/value persistence with prefix scans.
//!
//! The raw [`LedgerStore`] trait is implemented by [`MemoryStore`] and
//! [`PgStore`]. Application code goes through [`Ledger`], which binds every
//! key prefix to exactly one record type.

pub mod error;
pub mod models;
pub mod services;

pub use error::StoreError;
pub use models::{Entity, RecordKind};
pub use services::{Ledger, LedgerStore, MemoryStore, PgStore};
