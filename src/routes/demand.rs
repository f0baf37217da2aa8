use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::render;
use crate::report::catalog::ReportKind;
use crate::report::summary::{self, DemandSummary};
use crate::routes::reports::{self, ReportBody, ReportDataResponse, ReportMetadata};
use crate::state::AppState;

const KIND: ReportKind = ReportKind::DemandAnalysis;

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct DemandPreviewResponse {
    pub html: String,
    pub summary: DemandSummary,
    pub metadata: ReportMetadata,
}

#[utoipa::path(
    get,
    path = "/api/demand-data",
    tag = "demand",
    params(
        ("deviceId" = String, Query, description = "Device id or name"),
        ("startDate" = String, Query, description = "Range start (YYYY-MM-DD, inclusive)"),
        ("endDate" = String, Query, description = "Range end (YYYY-MM-DD, inclusive)"),
        ("timePeriod" = String, Query, description = "daily, weekly or monthly")
    ),
    responses(
        (status = 200, description = "Demand analysis rows", body = ReportDataResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn demand_data(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ReportDataResponse>, (StatusCode, String)> {
    let request = reports::parse_data_query(raw, KIND)?;
    let result = reports::run(&state, &request).await?;
    Ok(Json(reports::data_response(result)))
}

#[utoipa::path(
    post,
    path = "/api/demand-reports/preview",
    tag = "demand",
    request_body = ReportBody,
    responses(
        (status = 200, description = "Preview fragment with summary", body = DemandPreviewResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn preview_demand_report(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Json<DemandPreviewResponse>, (StatusCode, String)> {
    let request = reports::validate_body(&body, KIND)?;
    let result = reports::run(&state, &request).await?;
    Ok(Json(DemandPreviewResponse {
        html: render::html::preview_fragment(&result),
        summary: summary::demand_summary(&result.rows),
        metadata: ReportMetadata::for_preview(&result),
    }))
}

#[utoipa::path(
    post,
    path = "/api/demand-reports/generate-csv",
    tag = "demand",
    request_body = ReportBody,
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn generate_demand_csv(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Response, (StatusCode, String)> {
    let request = reports::validate_body(&body, KIND)?;
    let result = reports::run(&state, &request).await?;
    reports::csv_attachment(&result)
}

#[utoipa::path(
    post,
    path = "/api/demand-reports/generate-document",
    tag = "demand",
    request_body = ReportBody,
    responses(
        (status = 200, description = "Print-ready HTML document attachment", content_type = "text/html", body = String),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn generate_demand_document(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Response, (StatusCode, String)> {
    let request = reports::validate_body(&body, KIND)?;
    let result = reports::run(&state, &request).await?;
    reports::document_attachment(&result)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/demand-data", get(demand_data))
        .route("/demand-reports/preview", post(preview_demand_report))
        .route("/demand-reports/generate-csv", post(generate_demand_csv))
        .route("/demand-reports/generate-document", post(generate_demand_document))
}
