use crate::dtos::{
    site::{CreateTestimonialRequest, CreateTestimonialResponse, TestimonialListResponse},
    ErrorResponse, SuccessResponse,
};
use crate::middleware::AdminAccess;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

/// List client testimonials
#[utoipa::path(
    get,
    path = "/api/testimonials",
    responses((status = 200, description = "Testimonials", body = TestimonialListResponse)),
    tag = "Testimonials"
)]
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<TestimonialListResponse>, AppError> {
    let testimonials = state.site.list_testimonials().await?;
    Ok(Json(TestimonialListResponse { testimonials }))
}

/// Add a testimonial
#[utoipa::path(
    post,
    path = "/api/testimonials",
    request_body = CreateTestimonialRequest,
    responses(
        (status = 201, description = "Testimonial created", body = CreateTestimonialResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Testimonials",
    security(("admin_api_key" = []))
)]
pub async fn create_testimonial(
    State(state): State<AppState>,
    access: AdminAccess,
    body: Result<ValidatedJson<CreateTestimonialRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let ValidatedJson(req) = access.admit(body)?;
    let testimonial = state
        .site
        .create_testimonial(req.into(), access.authorized)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTestimonialResponse {
            success: true,
            testimonial_id: testimonial.id,
            testimonial,
        }),
    ))
}

/// Remove a testimonial
#[utoipa::path(
    delete,
    path = "/api/testimonials/{id}",
    params(("id" = String, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial deleted", body = SuccessResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Testimonials",
    security(("admin_api_key" = []))
)]
pub async fn delete_testimonial(
    State(state): State<AppState>,
    access: AdminAccess,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.site.delete_testimonial(&id, access.authorized).await?;
    Ok(Json(SuccessResponse::ok()))
}
