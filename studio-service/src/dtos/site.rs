use crate::models::{
    DashboardStats, NewContactMessage, NewProject, NewTestimonial, Project, ProjectPatch,
    SiteContent, Testimonial,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    #[schema(example = "Kente Co. rebrand")]
    pub title: String,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    #[schema(example = "Logo Design")]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Image URL or data URI.
    #[serde(default)]
    pub image: String,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(req: CreateProjectRequest) -> Self {
        NewProject {
            title: req.title,
            category: req.category,
            description: req.description,
            image: req.image,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Category must not be empty"))]
    pub category: Option<String>,

    pub description: Option<String>,

    pub image: Option<String>,
}

impl From<UpdateProjectRequest> for ProjectPatch {
    fn from(req: UpdateProjectRequest) -> Self {
        ProjectPatch {
            title: req.title,
            category: req.category,
            description: req.description,
            image: req.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectResponse {
    pub success: bool,
    pub project_id: Uuid,
    pub project: Project,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub success: bool,
    pub project: Project,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialRequest {
    #[validate(length(min = 1, max = 200, message = "Client name is required"))]
    #[schema(example = "Ama Mensah")]
    pub client_name: String,

    #[serde(default)]
    pub client_company: String,

    #[serde(default)]
    pub client_role: String,

    #[validate(length(min = 1, max = 5000, message = "Testimonial text is required"))]
    pub testimonial: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: u8,
}

impl From<CreateTestimonialRequest> for NewTestimonial {
    fn from(req: CreateTestimonialRequest) -> Self {
        NewTestimonial {
            client_name: req.client_name,
            client_company: req.client_company,
            client_role: req.client_role,
            testimonial: req.testimonial,
            rating: req.rating,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialResponse {
    pub success: bool,
    pub testimonial_id: Uuid,
    pub testimonial: Testimonial,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TestimonialListResponse {
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentResponse {
    pub content: SiteContent,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "client@example.com")]
    pub email: String,

    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 200, message = "Subject is too long"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

impl From<ContactRequest> for NewContactMessage {
    fn from(req: ContactRequest) -> Self {
        NewContactMessage {
            name: req.name,
            email: req.email,
            phone: req.phone.filter(|p| !p.trim().is_empty()),
            subject: req.subject,
            message: req.message,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TrackEventRequest {
    #[validate(length(min = 1, max = 64, message = "Event name is required"))]
    #[schema(example = "page_view")]
    pub event: String,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub stats: DashboardStats,
}
