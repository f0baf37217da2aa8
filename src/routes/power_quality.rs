use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::render;
use crate::report::catalog::ReportKind;
use crate::report::summary::{self, QualitySummary};
use crate::routes::reports::{self, ReportBody, ReportDataResponse, ReportMetadata};
use crate::state::AppState;

const KIND: ReportKind = ReportKind::PowerQuality;

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct QualityPreviewResponse {
    pub html: String,
    pub summary: QualitySummary,
    pub metadata: ReportMetadata,
}

#[utoipa::path(
    get,
    path = "/api/power-quality-data",
    tag = "power-quality",
    params(
        ("deviceId" = String, Query, description = "Device id or name"),
        ("startDate" = String, Query, description = "Range start (YYYY-MM-DD, inclusive)"),
        ("endDate" = String, Query, description = "Range end (YYYY-MM-DD, inclusive)"),
        ("timePeriod" = String, Query, description = "daily, weekly or monthly")
    ),
    responses(
        (status = 200, description = "Power quality rows", body = ReportDataResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn power_quality_data(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ReportDataResponse>, (StatusCode, String)> {
    let request = reports::parse_data_query(raw, KIND)?;
    let result = reports::run(&state, &request).await?;
    Ok(Json(reports::data_response(result)))
}

#[utoipa::path(
    post,
    path = "/api/power-quality-reports/preview",
    tag = "power-quality",
    request_body = ReportBody,
    responses(
        (status = 200, description = "Preview fragment with summary and statuses", body = QualityPreviewResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn preview_power_quality_report(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Json<QualityPreviewResponse>, (StatusCode, String)> {
    let request = reports::validate_body(&body, KIND)?;
    let result = reports::run(&state, &request).await?;
    Ok(Json(QualityPreviewResponse {
        html: render::html::preview_fragment(&result),
        summary: summary::quality_summary(&result.rows),
        metadata: ReportMetadata::for_preview(&result),
    }))
}

#[utoipa::path(
    post,
    path = "/api/power-quality-reports/generate-csv",
    tag = "power-quality",
    request_body = ReportBody,
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn generate_power_quality_csv(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Response, (StatusCode, String)> {
    let request = reports::validate_body(&body, KIND)?;
    let result = reports::run(&state, &request).await?;
    reports::csv_attachment(&result)
}

#[utoipa::path(
    post,
    path = "/api/power-quality-reports/generate-document",
    tag = "power-quality",
    request_body = ReportBody,
    responses(
        (status = 200, description = "Print-ready HTML document attachment", content_type = "text/html", body = String),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn generate_power_quality_document(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Result<Response, (StatusCode, String)> {
    let request = reports::validate_body(&body, KIND)?;
    let result = reports::run(&state, &request).await?;
    reports::document_attachment(&result)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/power-quality-data", get(power_quality_data))
        .route("/power-quality-reports/preview", post(preview_power_quality_report))
        .route("/power-quality-reports/generate-csv", post(generate_power_quality_csv))
        .route(
            "/power-quality-reports/generate-document",
            post(generate_power_quality_document),
        )
}
