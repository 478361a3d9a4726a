//! Invoice number format and sequencing policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Human-readable invoice number, `PREFIX-YYYY-NNNN`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvoiceNumber {
    pub prefix: String,
    pub year: i32,
    pub sequence: u64,
}

impl InvoiceNumber {
    pub fn new(prefix: impl Into<String>, year: i32, sequence: u64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            sequence,
        }
    }

    /// Key-suffix prefix shared by every number of `prefix` in `year`.
    pub fn year_prefix(prefix: &str, year: i32) -> String {
        format!("{}-{:04}-", prefix, year)
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Widens past four digits rather than truncating.
        write!(f, "{}-{:04}-{:04}", self.prefix, self.year, self.sequence)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a PREFIX-YYYY-NNNN invoice number")]
pub struct ParseInvoiceNumberError(String);

impl FromStr for InvoiceNumber {
    type Err = ParseInvoiceNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseInvoiceNumberError(s.to_string());

        let mut parts = s.rsplitn(3, '-');
        let sequence = parts.next().ok_or_else(err)?;
        let year = parts.next().ok_or_else(err)?;
        let prefix = parts.next().ok_or_else(err)?;

        if prefix.is_empty()
            || year.len() != 4
            || sequence.len() < 4
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !sequence.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }

        Ok(Self {
            prefix: prefix.to_string(),
            year: year.parse().map_err(|_| err())?,
            sequence: sequence.parse().map_err(|_| err())?,
        })
    }
}

/// Which invoices share one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceScope {
    /// One sequence over every invoice ever issued; the year in the number is
    /// informational only.
    #[default]
    Global,
    /// Sequence restarts at 1 each calendar year.
    Yearly,
}

impl SequenceScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceScope::Global => "global",
            SequenceScope::Yearly => "yearly",
        }
    }
}

impl FromStr for SequenceScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(SequenceScope::Global),
            "yearly" | "year" => Ok(SequenceScope::Yearly),
            other => Err(format!("unknown sequence scope '{}'", other)),
        }
    }
}

/// How the next sequence number is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingStrategy {
    /// Count existing invoices in scope under a single-writer lock held until
    /// the invoice is written. Gap-free within one process.
    #[default]
    Serialized,
    /// Atomic increment of a dedicated counter key. Safe across processes;
    /// a failed write leaves a gap.
    Counter,
}

impl NumberingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberingStrategy::Serialized => "serialized",
            NumberingStrategy::Counter => "counter",
        }
    }
}

impl FromStr for NumberingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serialized" => Ok(NumberingStrategy::Serialized),
            "counter" => Ok(NumberingStrategy::Counter),
            other => Err(format!("unknown numbering strategy '{}'", other)),
        }
    }
}
