//! Ledger backends and the typed access layer.

pub mod database;
pub mod ledger;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::PgStore;
pub use ledger::Ledger;
pub use memory::MemoryStore;
pub use metrics::init_metrics;
pub use store::LedgerStore;
