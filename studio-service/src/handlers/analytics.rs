use crate::dtos::{
    site::{StatsResponse, TrackEventRequest},
    ErrorResponse, SuccessResponse,
};
use crate::middleware::AdminAccess;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

/// Record a visitor event
#[utoipa::path(
    post,
    path = "/api/analytics/track",
    request_body = TrackEventRequest,
    responses(
        (status = 200, description = "Event recorded", body = SuccessResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn track_event(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TrackEventRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.site.track_event(req.event, req.data).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Dashboard counters
#[utoipa::path(
    get,
    path = "/api/analytics/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = StatsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Analytics",
    security(("admin_api_key" = []))
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    access: AdminAccess,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.site.dashboard_stats(access.authorized).await?;
    Ok(Json(StatsResponse { stats }))
}
