//! Invoice model for studio-service.

use crate::models::{RateTable, Totals};
use chrono::{DateTime, Utc};
use ledger_store::{Entity, RecordKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Billed party. Only the name is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// One billable unit on a persisted invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_rate: Decimal,
}

impl LineItem {
    /// `quantity x unit_rate`, unrounded. `None` when it overflows.
    pub fn amount(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_rate)
    }
}

/// Line item as submitted, before validation.
///
/// Quantity arrives as a decimal so fractional or negative input can be
/// reported against its field instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(default)]
    pub description: String,
    pub quantity: Decimal,
    pub unit_rate: Decimal,
}

/// Input for creating an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoice {
    pub client: ClientInfo,
    #[serde(default)]
    pub line_items: Vec<LineItemInput>,
}

/// Persisted invoice. Stored at `invoice:{invoiceNumber}`.
///
/// The amount fields cache [`Totals::compute`] over `line_items`; nothing
/// updates them independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub client: ClientInfo,
    pub line_items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub levy_a: Decimal,
    pub levy_b: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(
        invoice_number: String,
        client: ClientInfo,
        line_items: Vec<LineItem>,
        totals: Totals,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            invoice_number,
            client,
            line_items,
            subtotal: totals.subtotal,
            vat: totals.vat,
            levy_a: totals.levy_a,
            levy_b: totals.levy_b,
            total: totals.total,
            created_at,
        }
    }

    pub fn totals(&self) -> Totals {
        Totals {
            subtotal: self.subtotal,
            vat: self.vat,
            levy_a: self.levy_a,
            levy_b: self.levy_b,
            total: self.total,
        }
    }

    /// Whether the stored amounts equal a fresh computation from the line items.
    pub fn totals_consistent(&self, rates: &RateTable) -> bool {
        Totals::compute(&self.line_items, rates)
            .map_or(false, |totals| totals == self.totals())
    }
}

impl Entity for Invoice {
    const KIND: RecordKind = RecordKind::Invoice;

    fn key_suffix(&self) -> String {
        self.invoice_number.clone()
    }
}
