use crate::dtos::{site::ContentResponse, ErrorResponse};
use crate::handlers::json_body;
use crate::middleware::AdminAccess;
use crate::models::SiteContent;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;

/// Current site copy, or the defaults when none was saved
#[utoipa::path(
    get,
    path = "/api/content",
    responses((status = 200, description = "Site content", body = ContentResponse)),
    tag = "Content"
)]
pub async fn get_content(State(state): State<AppState>) -> Result<Json<ContentResponse>, AppError> {
    let content = state.site.get_content().await?;
    Ok(Json(ContentResponse { content }))
}

/// Replace the site copy
#[utoipa::path(
    put,
    path = "/api/content",
    request_body = SiteContent,
    responses(
        (status = 200, description = "Content replaced", body = ContentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Content",
    security(("admin_api_key" = []))
)]
pub async fn update_content(
    State(state): State<AppState>,
    access: AdminAccess,
    body: Result<Json<SiteContent>, JsonRejection>,
) -> Result<Json<ContentResponse>, AppError> {
    let content = access.admit(json_body(body))?;
    let content = state
        .site
        .update_content(content, access.authorized)
        .await?;
    Ok(Json(ContentResponse { content }))
}
