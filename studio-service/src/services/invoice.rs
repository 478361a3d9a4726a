//! Invoice creation, numbering and retrieval.

use crate::models::{
    AmountOverflow, ClientInfo, CreateInvoice, Invoice, LineItem, LineItemInput, RateTable, Totals,
};
use crate::services::error::InvoiceError;
use crate::services::metrics::{ERRORS_TOTAL, INVOICES_TOTAL, INVOICE_AMOUNT_TOTAL};
use crate::services::numbering::{InvoiceNumber, NumberingStrategy, SequenceScope};
use chrono::{DateTime, Datelike, Utc};
use ledger_store::{Ledger, RecordKind, StoreError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Deployment-wide invoicing policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSettings {
    pub prefix: String,
    pub scope: SequenceScope,
    pub strategy: NumberingStrategy,
    pub rates: RateTable,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            prefix: "SKY".to_string(),
            scope: SequenceScope::default(),
            strategy: NumberingStrategy::default(),
            rates: RateTable::default(),
        }
    }
}

pub struct InvoiceService {
    ledger: Ledger,
    settings: InvoiceSettings,
    /// Held from the count until the write lands under the serialized strategy.
    write_lock: Mutex<()>,
}

impl InvoiceService {
    pub fn new(ledger: Ledger, settings: InvoiceSettings) -> Self {
        Self {
            ledger,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &InvoiceSettings {
        &self.settings
    }

    pub async fn create_invoice(
        &self,
        input: CreateInvoice,
        authorized: bool,
    ) -> Result<Invoice, InvoiceError> {
        self.create_invoice_at(input, authorized, Utc::now()).await
    }

    /// Create an invoice dated `now`; the number's year comes from `now`.
    #[instrument(
        skip(self, input),
        fields(client = %input.client.name, line_items = input.line_items.len())
    )]
    pub async fn create_invoice_at(
        &self,
        input: CreateInvoice,
        authorized: bool,
        now: DateTime<Utc>,
    ) -> Result<Invoice, InvoiceError> {
        let result = self.create(input, authorized, now).await;

        match &result {
            Ok(invoice) => {
                INVOICES_TOTAL.with_label_values(&["created"]).inc();
                INVOICE_AMOUNT_TOTAL.inc_by(invoice.total.to_f64().unwrap_or_default());
                info!(
                    invoice_id = %invoice.id,
                    invoice_number = %invoice.invoice_number,
                    total = %invoice.total,
                    "Invoice created"
                );
            }
            Err(e) => {
                INVOICES_TOTAL.with_label_values(&[e.kind()]).inc();
                ERRORS_TOTAL.with_label_values(&[e.kind()]).inc();
                warn!(error = %e, "Invoice creation failed");
            }
        }

        result
    }

    async fn create(
        &self,
        input: CreateInvoice,
        authorized: bool,
        now: DateTime<Utc>,
    ) -> Result<Invoice, InvoiceError> {
        if !authorized {
            return Err(InvoiceError::Unauthorized);
        }

        let (client, line_items) = validate(input)?;
        let totals =
            Totals::compute(&line_items, &self.settings.rates).map_err(overflow_to_validation)?;
        let year = now.year();

        let _guard = match self.settings.strategy {
            NumberingStrategy::Serialized => Some(self.write_lock.lock().await),
            NumberingStrategy::Counter => None,
        };

        let sequence = match self.settings.strategy {
            NumberingStrategy::Serialized => self.last_in_scope(year).await? + 1,
            NumberingStrategy::Counter => {
                self.ledger
                    .next_in_sequence(&self.counter_name(year))
                    .await?
            }
        };

        let number = InvoiceNumber::new(self.settings.prefix.as_str(), year, sequence);
        let invoice = Invoice::new(number.to_string(), client, line_items, totals, now);
        self.persist(&invoice).await?;

        Ok(invoice)
    }

    /// Highest sequence already taken in the scope a new invoice in `year`
    /// joins, or 0 when the scope is empty. Equals the invoice count while
    /// the scope is dense, and stays ahead of numbers written under an
    /// earlier scope setting.
    async fn last_in_scope(&self, year: i32) -> Result<u64, InvoiceError> {
        let sub_prefix = match self.settings.scope {
            SequenceScope::Global => String::new(),
            SequenceScope::Yearly => InvoiceNumber::year_prefix(&self.settings.prefix, year),
        };
        let last = self
            .ledger
            .suffixes_under(RecordKind::Invoice, &sub_prefix)
            .await?
            .iter()
            .filter_map(|suffix| suffix.parse::<InvoiceNumber>().ok())
            .map(|number| number.sequence)
            .max()
            .unwrap_or(0);
        Ok(last)
    }

    fn counter_name(&self, year: i32) -> String {
        match self.settings.scope {
            SequenceScope::Global => "invoice".to_string(),
            SequenceScope::Yearly => format!("invoice:{}", year),
        }
    }

    async fn persist(&self, invoice: &Invoice) -> Result<(), InvoiceError> {
        self.ledger.insert(invoice).await.map_err(|e| match e {
            StoreError::Conflict { .. } => InvoiceError::Conflict {
                invoice_number: invoice.invoice_number.clone(),
            },
            other => InvoiceError::Persistence(other),
        })
    }

    /// Every invoice, oldest first.
    #[instrument(skip(self))]
    pub async fn list_invoices(&self, authorized: bool) -> Result<Vec<Invoice>, InvoiceError> {
        if !authorized {
            return Err(InvoiceError::Unauthorized);
        }

        let mut invoices: Vec<Invoice> = self.ledger.list().await?;
        invoices.sort_by_cached_key(|invoice| {
            (
                invoice.created_at,
                invoice.invoice_number.parse::<InvoiceNumber>().ok(),
                invoice.invoice_number.clone(),
            )
        });

        Ok(invoices)
    }

    #[instrument(skip(self))]
    pub async fn get_invoice(
        &self,
        invoice_number: &str,
        authorized: bool,
    ) -> Result<Invoice, InvoiceError> {
        if !authorized {
            return Err(InvoiceError::Unauthorized);
        }

        self.ledger
            .fetch::<Invoice>(invoice_number)
            .await?
            .ok_or_else(|| InvoiceError::NotFound(invoice_number.to_string()))
    }
}

fn validate(input: CreateInvoice) -> Result<(ClientInfo, Vec<LineItem>), InvoiceError> {
    let CreateInvoice { client, line_items } = input;

    if client.name.trim().is_empty() {
        return Err(InvoiceError::validation("client.name", "client name is required"));
    }
    if line_items.is_empty() {
        return Err(InvoiceError::validation(
            "lineItems",
            "at least one line item is required",
        ));
    }

    let line_items = line_items
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_line_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let client = ClientInfo {
        name: client.name,
        email: non_blank(client.email),
        phone: non_blank(client.phone),
        address: non_blank(client.address),
    };

    Ok((client, line_items))
}

fn validate_line_item(index: usize, item: LineItemInput) -> Result<LineItem, InvoiceError> {
    let field = |name: &str| format!("lineItems[{}].{}", index, name);

    if item.description.trim().is_empty() {
        return Err(InvoiceError::validation(
            field("description"),
            "description is required",
        ));
    }
    if item.quantity <= Decimal::ZERO {
        return Err(InvoiceError::validation(
            field("quantity"),
            "quantity must be greater than zero",
        ));
    }
    if !item.quantity.fract().is_zero() {
        return Err(InvoiceError::validation(
            field("quantity"),
            "quantity must be a whole number",
        ));
    }
    let quantity = item.quantity.to_u32().ok_or_else(|| {
        InvoiceError::validation(field("quantity"), "quantity is too large")
    })?;
    if item.unit_rate < Decimal::ZERO {
        return Err(InvoiceError::validation(
            field("unitRate"),
            "unit rate must not be negative",
        ));
    }

    Ok(LineItem {
        description: item.description,
        quantity,
        unit_rate: item.unit_rate,
    })
}

fn overflow_to_validation(err: AmountOverflow) -> InvoiceError {
    match err {
        AmountOverflow::LineItem(index) => {
            InvoiceError::validation(format!("lineItems[{}].unitRate", index), "amount too large")
        }
        AmountOverflow::Total => InvoiceError::validation("lineItems", "invoice total too large"),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
