use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::render;
use crate::report::catalog::ReportKind;
use crate::report::summary::{self, EnergySummary};
use crate::routes::reports::{self, ReportBody, ReportDataResponse, ReportMetadata};
use crate::state::AppState;

const KIND: ReportKind = ReportKind::EnergyConsumption;

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct EnergyPreviewResponse {
    pub html: String,
    pub summary: EnergySummary,
    pub metadata: ReportMetadata,
}

#[utoipa::path(
    get,
    path = "/api/energy-data",
    tag = "energy",
    params(
        ("deviceId" = String, Query, description = "Device id or name"),
        ("startDate" = String, Query, description = "Range start (YYYY-MM-DD, inclusive)"),
        ("endDate" = String, Query, description = "Range end (YYYY-MM-DD, inclusive)"),
        ("timePeriod" = String, Query, description = "daily, weekly or monthly")
    ),
    responses(
        (status = 200, description = "Energy consumption rows", body = ReportDataResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn energy_data(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ReportDataResponse>, (StatusCode, String)> {
    let request = reports::parse_data_query(raw, KIND)?;
    let result = reports::run(&state, &request).await?;
    Ok(Json(reports::data_response(result)))
}

#[utoipa::path(
    post,
    path = "/api/reports/preview",
    tag = "energy",
    request_body = ReportBody,
    responses(
        (status = 200, description = "Preview fragment with summary", body = EnergyPreviewResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn preview_energy_report(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Json<EnergyPreviewResponse>, (StatusCode, String)> {
    let request = reports::validate_body(&body, KIND)?;
    let result = reports::run(&state, &request).await?;
    Ok(Json(EnergyPreviewResponse {
        html: render::html::preview_fragment(&result),
        summary: summary::energy_summary(&result.rows),
        metadata: ReportMetadata::for_preview(&result),
    }))
}

#[utoipa::path(
    post,
    path = "/api/reports/generate-csv",
    tag = "energy",
    request_body = ReportBody,
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn generate_energy_csv(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Response, (StatusCode, String)> {
    let request = reports::validate_body(&body, KIND)?;
    let result = reports::run(&state, &request).await?;
    reports::csv_attachment(&result)
}

#[utoipa::path(
    post,
    path = "/api/reports/generate-document",
    tag = "energy",
    request_body = ReportBody,
    responses(
        (status = 200, description = "Print-ready HTML document attachment", content_type = "text/html", body = String),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn generate_energy_document(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Response, (StatusCode, String)> {
    let request = reports::validate_body(&body, KIND)?;
    let result = reports::run(&state, &request).await?;
    reports::document_attachment(&result)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/energy-data", get(energy_data))
        .route("/reports/preview", post(preview_energy_report))
        .route("/reports/generate-csv", post(generate_energy_csv))
        .route("/reports/generate-document", post(generate_energy_document))
}
