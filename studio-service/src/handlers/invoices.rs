use crate::dtos::{
    invoices::{CreateInvoiceResponse, InvoiceListResponse, InvoiceResponse},
    ErrorResponse,
};
use crate::handlers::json_body;
use crate::middleware::AdminAccess;
use crate::models::CreateInvoice;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// Create an invoice and assign it the next number
#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = CreateInvoice,
    responses(
        (status = 201, description = "Invoice created", body = CreateInvoiceResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Invoice number already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 503, description = "Ledger store unavailable", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("admin_api_key" = []))
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    access: AdminAccess,
    body: Result<Json<CreateInvoice>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = access.admit(json_body(body))?;
    let invoice = state
        .invoices
        .create_invoice(input, access.authorized)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateInvoiceResponse {
            success: true,
            invoice_number: invoice.invoice_number.clone(),
            invoice,
        }),
    ))
}

/// List every invoice, oldest first
#[utoipa::path(
    get,
    path = "/api/invoices",
    responses(
        (status = 200, description = "Invoice history", body = InvoiceListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("admin_api_key" = []))
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    access: AdminAccess,
) -> Result<Json<InvoiceListResponse>, AppError> {
    let invoices = state.invoices.list_invoices(access.authorized).await?;
    Ok(Json(InvoiceListResponse { invoices }))
}

/// Fetch one invoice by its number
#[utoipa::path(
    get,
    path = "/api/invoices/{number}",
    params(("number" = String, Path, description = "Invoice number, e.g. SKY-2025-0001")),
    responses(
        (status = 200, description = "Invoice found", body = InvoiceResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Invoice not found", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("admin_api_key" = []))
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    access: AdminAccess,
    Path(number): Path<String>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let invoice = state
        .invoices
        .get_invoice(&number, access.authorized)
        .await?;
    Ok(Json(InvoiceResponse { invoice }))
}
