use crate::dtos::{site::ContactRequest, ErrorResponse, SuccessResponse};
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

/// Submit the public contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored", body = SuccessResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Contact"
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.site.submit_contact(req.into()).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}
