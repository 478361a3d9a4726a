//! Domain models for studio-service.

mod analytics;
mod contact;
mod content;
mod invoice;
mod portfolio;
mod rates;
mod testimonial;

pub use analytics::{AnalyticsEvent, DashboardStats, PAGE_VIEW_EVENT};
pub use contact::{ContactMessage, NewContactMessage};
pub use content::{AboutSection, ContactDetails, HeroSection, SiteContent};
pub use invoice::{ClientInfo, CreateInvoice, Invoice, LineItem, LineItemInput};
pub use portfolio::{NewProject, Project, ProjectPatch};
pub use rates::{AmountOverflow, RateTable, Totals};
pub use testimonial::{NewTestimonial, Testimonial};
