//! Portfolio, testimonials, editable copy, contact form and analytics.

use crate::models::{
    AnalyticsEvent, ContactMessage, DashboardStats, Invoice, NewContactMessage, NewProject,
    NewTestimonial, Project, ProjectPatch, SiteContent, Testimonial, PAGE_VIEW_EVENT,
};
use crate::services::error::SiteError;
use crate::services::metrics::SITE_WRITES_TOTAL;
use chrono::Utc;
use ledger_store::{Entity, Ledger, RecordKind};
use tracing::{info, instrument};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Clone)]
pub struct SiteService {
    ledger: Ledger,
}

impl SiteService {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    // Projects

    pub async fn list_projects(&self) -> Result<Vec<Project>, SiteError> {
        Ok(self.ledger.list().await?)
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_project(
        &self,
        input: NewProject,
        authorized: bool,
    ) -> Result<Project, SiteError> {
        require_admin(authorized)?;
        require_text("title", &input.title)?;
        require_text("category", &input.category)?;

        let project = Project::create(input, Utc::now());
        self.ledger.insert(&project).await?;
        record_write::<Project>("create");
        info!(project_id = %project.id, "Project created");
        Ok(project)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_project(
        &self,
        id: &str,
        patch: ProjectPatch,
        authorized: bool,
    ) -> Result<Project, SiteError> {
        require_admin(authorized)?;
        if let Some(title) = &patch.title {
            require_text("title", title)?;
        }
        if let Some(category) = &patch.category {
            require_text("category", category)?;
        }

        let mut project = self
            .ledger
            .fetch::<Project>(id)
            .await?
            .ok_or_else(|| SiteError::NotFound {
                kind: "Project",
                id: id.to_string(),
            })?;

        project.apply(patch, Utc::now());
        self.ledger.put(&project).await?;
        record_write::<Project>("update");
        info!(project_id = %project.id, "Project updated");
        Ok(project)
    }

    /// Deleting an unknown id succeeds.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: &str, authorized: bool) -> Result<(), SiteError> {
        require_admin(authorized)?;
        self.ledger.remove::<Project>(id).await?;
        record_write::<Project>("delete");
        info!(project_id = %id, "Project deleted");
        Ok(())
    }

    // Testimonials

    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>, SiteError> {
        Ok(self.ledger.list().await?)
    }

    #[instrument(skip(self, input), fields(client_name = %input.client_name))]
    pub async fn create_testimonial(
        &self,
        input: NewTestimonial,
        authorized: bool,
    ) -> Result<Testimonial, SiteError> {
        require_admin(authorized)?;
        require_text("clientName", &input.client_name)?;
        require_text("testimonial", &input.testimonial)?;
        if !(MIN_RATING..=MAX_RATING).contains(&input.rating) {
            return Err(SiteError::Validation {
                field: "rating".to_string(),
                message: format!("rating must be between {} and {}", MIN_RATING, MAX_RATING),
            });
        }

        let testimonial = Testimonial::create(input, Utc::now());
        self.ledger.insert(&testimonial).await?;
        record_write::<Testimonial>("create");
        info!(testimonial_id = %testimonial.id, "Testimonial created");
        Ok(testimonial)
    }

    #[instrument(skip(self))]
    pub async fn delete_testimonial(&self, id: &str, authorized: bool) -> Result<(), SiteError> {
        require_admin(authorized)?;
        self.ledger.remove::<Testimonial>(id).await?;
        record_write::<Testimonial>("delete");
        Ok(())
    }

    // Content

    /// Stored site copy, or the built-in defaults when none was saved.
    pub async fn get_content(&self) -> Result<SiteContent, SiteError> {
        Ok(self
            .ledger
            .fetch::<SiteContent>(SiteContent::KEY_SUFFIX)
            .await?
            .unwrap_or_default())
    }

    #[instrument(skip(self, content))]
    pub async fn update_content(
        &self,
        content: SiteContent,
        authorized: bool,
    ) -> Result<SiteContent, SiteError> {
        require_admin(authorized)?;
        self.ledger.put(&content).await?;
        record_write::<SiteContent>("update");
        info!("Site content updated");
        Ok(content)
    }

    // Contact and analytics

    #[instrument(skip(self, input), fields(subject = %input.subject))]
    pub async fn submit_contact(
        &self,
        input: NewContactMessage,
    ) -> Result<ContactMessage, SiteError> {
        require_text("name", &input.name)?;
        require_text("email", &input.email)?;
        require_text("message", &input.message)?;

        let message = ContactMessage::create(input, Utc::now());
        self.ledger.insert(&message).await?;
        record_write::<ContactMessage>("create");
        info!(message_id = %message.id, "Contact message received");
        Ok(message)
    }

    pub async fn track_event(
        &self,
        event: String,
        data: serde_json::Value,
    ) -> Result<AnalyticsEvent, SiteError> {
        require_text("event", &event)?;

        let event = AnalyticsEvent::create(event, data, Utc::now());
        self.ledger.insert(&event).await?;
        record_write::<AnalyticsEvent>("create");
        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self, authorized: bool) -> Result<DashboardStats, SiteError> {
        require_admin(authorized)?;

        let total_projects = self.ledger.count_under(Project::KIND, "").await?;
        let total_invoices = self.ledger.count_under(Invoice::KIND, "").await?;
        let total_testimonials = self.ledger.count_under(Testimonial::KIND, "").await?;
        let total_views = self
            .ledger
            .list::<AnalyticsEvent>()
            .await?
            .iter()
            .filter(|e| e.event == PAGE_VIEW_EVENT)
            .count();

        Ok(DashboardStats {
            total_projects,
            total_invoices,
            total_testimonials,
            total_views,
        })
    }
}

fn require_admin(authorized: bool) -> Result<(), SiteError> {
    if authorized {
        Ok(())
    } else {
        Err(SiteError::Unauthorized)
    }
}

fn require_text(field: &str, value: &str) -> Result<(), SiteError> {
    if value.trim().is_empty() {
        return Err(SiteError::Validation {
            field: field.to_string(),
            message: format!("{} is required", field),
        });
    }
    Ok(())
}

fn record_write<E: Entity>(operation: &str) {
    let kind: RecordKind = E::KIND;
    SITE_WRITES_TOTAL
        .with_label_values(&[kind.as_str(), operation])
        .inc();
}
