//! Prometheus metrics for studio-service.

use once_cell::sync::Lazy;
use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};

/// Invoice creation outcomes.
pub static INVOICES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "studio_invoices_total",
        "Total number of invoice creation attempts by outcome",
        &["status"] // created, validation, persistence, conflict, unauthorized
    )
    .expect("Failed to register invoices_total")
});

/// Sum of invoice totals issued, in the base currency.
pub static INVOICE_AMOUNT_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "studio_invoice_amount_total",
        "Total amount invoiced in the base currency"
    )
    .expect("Failed to register invoice_amount_total")
});

/// Site record writes by record kind and operation.
pub static SITE_WRITES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "studio_site_writes_total",
        "Total number of site record writes",
        &["kind", "operation"]
    )
    .expect("Failed to register site_writes_total")
});

/// Error counter for alerting.
pub static ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "studio_errors_total",
        "Total number of service errors by type",
        &["error_type"]
    )
    .expect("Failed to register errors_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&INVOICES_TOTAL);
    Lazy::force(&INVOICE_AMOUNT_TOTAL);
    Lazy::force(&SITE_WRITES_TOTAL);
    Lazy::force(&ERRORS_TOTAL);
    ledger_store::services::init_metrics();
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    service_core::middleware::gather_http_metrics()
}
