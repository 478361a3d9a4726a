//! Studio Service - invoicing and site administration backend.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::readiness_check,
        handlers::invoices::create_invoice,
        handlers::invoices::list_invoices,
        handlers::invoices::get_invoice,
        handlers::portfolio::list_projects,
        handlers::portfolio::create_project,
        handlers::portfolio::update_project,
        handlers::portfolio::delete_project,
        handlers::testimonials::list_testimonials,
        handlers::testimonials::create_testimonial,
        handlers::testimonials::delete_testimonial,
        handlers::content::get_content,
        handlers::content::update_content,
        handlers::contact::submit_contact,
        handlers::analytics::track_event,
        handlers::analytics::dashboard_stats,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::SuccessResponse,
            dtos::invoices::CreateInvoiceResponse,
            dtos::invoices::InvoiceResponse,
            dtos::invoices::InvoiceListResponse,
            dtos::site::CreateProjectRequest,
            dtos::site::UpdateProjectRequest,
            dtos::site::CreateProjectResponse,
            dtos::site::ProjectResponse,
            dtos::site::ProjectListResponse,
            dtos::site::CreateTestimonialRequest,
            dtos::site::CreateTestimonialResponse,
            dtos::site::TestimonialListResponse,
            dtos::site::ContentResponse,
            dtos::site::ContactRequest,
            dtos::site::TrackEventRequest,
            dtos::site::StatsResponse,
            models::CreateInvoice,
            models::ClientInfo,
            models::LineItemInput,
            models::LineItem,
            models::Invoice,
            models::Project,
            models::Testimonial,
            models::SiteContent,
            models::HeroSection,
            models::AboutSection,
            models::ContactDetails,
            models::DashboardStats,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Invoices", description = "Invoice creation and history"),
        (name = "Portfolio", description = "Portfolio projects"),
        (name = "Testimonials", description = "Client testimonials"),
        (name = "Content", description = "Editable site copy"),
        (name = "Contact", description = "Public contact form"),
        (name = "Analytics", description = "Visitor events and dashboard counters"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-admin-api-key"))),
            );
        }
    }
}
