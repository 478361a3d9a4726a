pub mod error;
pub mod invoice;
pub mod metrics;
pub mod numbering;
pub mod site;

pub use error::{InvoiceError, SiteError};
pub use invoice::{InvoiceService, InvoiceSettings};
pub use metrics::{get_metrics, init_metrics};
pub use numbering::{InvoiceNumber, NumberingStrategy, SequenceScope};
pub use site::SiteService;
