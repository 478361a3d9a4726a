use crate::dtos::{
    site::{
        CreateProjectRequest, CreateProjectResponse, ProjectListResponse, ProjectResponse,
        UpdateProjectRequest,
    },
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

/// List portfolio projects
#[utoipa::path(
    get,
    path = "/api/portfolio",
    responses((status = 200, description = "Portfolio projects", body = ProjectListResponse)),
    tag = "Portfolio"
)]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let projects = state.site.list_projects().await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// Add a portfolio project
#[utoipa::path(
    post,
    path = "/api/portfolio",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = CreateProjectResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Portfolio",
    security(("admin_api_key" = []))
)]
pub async fn create_project(
    State(state): State<AppState>,
    access: AdminAccess,
    body: Result<ValidatedJson<CreateProjectRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let ValidatedJson(req) = access.admit(body)?;
    let project = state
        .site
        .create_project(req.into(), access.authorized)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProjectResponse {
            success: true,
            project_id: project.id,
            project,
        }),
    ))
}

/// Merge changes into an existing project
#[utoipa::path(
    put,
    path = "/api/portfolio/{id}",
    params(("id" = String, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Portfolio",
    security(("admin_api_key" = []))
)]
pub async fn update_project(
    State(state): State<AppState>,
    access: AdminAccess,
    Path(id): Path<String>,
    body: Result<ValidatedJson<UpdateProjectRequest>, AppError>,
) -> Result<Json<ProjectResponse>, AppError> {
    let ValidatedJson(req) = access.admit(body)?;
    let project = state
        .site
        .update_project(&id, req.into(), access.authorized)
        .await?;

    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

/// Remove a project; unknown ids succeed
#[utoipa::path(
    delete,
    path = "/api/portfolio/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted", body = SuccessResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Portfolio",
    security(("admin_api_key" = []))
)]
pub async fn delete_project(
    State(state): State<AppState>,
    access: AdminAccess,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.site.delete_project(&id, access.authorized).await?;
    Ok(Json(SuccessResponse::ok()))
}
