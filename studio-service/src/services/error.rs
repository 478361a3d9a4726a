use ledger_store::StoreError;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Invoice number {invoice_number} was taken by a concurrent request")]
    Conflict { invoice_number: String },

    #[error("Caller is not authorized to manage invoices")]
    Unauthorized,

    #[error("Invoice {0} not found")]
    NotFound(String),
}

impl InvoiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InvoiceError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Label used for the error counter.
    pub fn kind(&self) -> &'static str {
        match self {
            InvoiceError::Validation { .. } => "validation",
            InvoiceError::Persistence(_) => "persistence",
            InvoiceError::Conflict { .. } => "conflict",
            InvoiceError::Unauthorized => "unauthorized",
            InvoiceError::NotFound(_) => "not_found",
        }
    }
}

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Caller is not authorized to modify site data")]
    Unauthorized,

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
}

fn store_error(err: StoreError) -> AppError {
    if err.is_retryable() {
        AppError::DatabaseError(anyhow::Error::new(err))
    } else {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::Validation { field, message } => {
                AppError::InvalidField { field, message }
            }
            InvoiceError::Persistence(e) => store_error(e),
            e @ InvoiceError::Conflict { .. } => {
                AppError::Conflict(anyhow::anyhow!(e.to_string()))
            }
            InvoiceError::Unauthorized => {
                AppError::Unauthorized(anyhow::anyhow!("Admin API key required"))
            }
            e @ InvoiceError::NotFound(_) => AppError::NotFound(anyhow::anyhow!(e.to_string())),
        }
    }
}

impl From<SiteError> for AppError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::Validation { field, message } => AppError::InvalidField { field, message },
            SiteError::Persistence(e) => store_error(e),
            SiteError::Unauthorized => {
                AppError::Unauthorized(anyhow::anyhow!("Admin API key required"))
            }
            e @ SiteError::NotFound { .. } => AppError::NotFound(anyhow::anyhow!(e.to_string())),
        }
    }
}
