//! Shared plumbing for the report endpoints: query/body validation into a
//! [`ReportRequest`], the data/preview response envelopes, and attachment
//! responses for CSV and document downloads. Validation runs before any
//! store access, so the 400 paths never need a live database.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use url::form_urlencoded;

use crate::error::internal_error;
use crate::render;
use crate::report::catalog::ReportKind;
use crate::report::period::{self, Cadence};
use crate::report::types::{ReportResult, ReportRow};
use crate::report::ReportRequest;
use crate::state::AppState;

/// Availability note attached to every data and preview response.
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub has_data: bool,
    pub message: String,
}

impl ReportMetadata {
    pub(crate) fn for_data(result: &ReportResult) -> Self {
        Self {
            has_data: result.has_data,
            message: if result.has_data {
                "Data retrieved successfully".to_string()
            } else {
                "No data available for the specified parameters. Report generated with placeholder values.".to_string()
            },
        }
    }

    pub(crate) fn for_preview(result: &ReportResult) -> Self {
        Self {
            has_data: result.has_data,
            message: if result.has_data {
                "Report generated successfully".to_string()
            } else {
                "Report generated with no data available".to_string()
            },
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct ReportDataResponse {
    pub data: Vec<ReportRow>,
    pub metadata: ReportMetadata,
}

pub(crate) fn data_response(result: ReportResult) -> ReportDataResponse {
    let metadata = ReportMetadata::for_data(&result);
    ReportDataResponse {
        data: result.rows,
        metadata,
    }
}

/// Body of every report-generation POST. All fields are required; they stay
/// optional here so absence maps to a 400 instead of a deserialization error.
#[derive(Debug, Clone, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub time_period: Option<String>,
}

/// Parses `deviceId`, `startDate`, `endDate` and `timePeriod` out of a raw
/// query string. Blank values count as missing.
pub(crate) fn parse_data_query(
    raw: Option<String>,
    kind: ReportKind,
) -> Result<ReportRequest, (StatusCode, String)> {
    let mut device_id: Option<String> = None;
    let mut start_raw: Option<String> = None;
    let mut end_raw: Option<String> = None;
    let mut period_raw: Option<String> = None;

    if let Some(raw) = raw {
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "deviceId" => device_id = non_blank(value.into_owned()),
                "startDate" => start_raw = non_blank(value.into_owned()),
                "endDate" => end_raw = non_blank(value.into_owned()),
                "timePeriod" => period_raw = non_blank(value.into_owned()),
                _ => {}
            }
        }
    }

    let (Some(device_id), Some(start_raw), Some(end_raw), Some(period_raw)) =
        (device_id, start_raw, end_raw, period_raw)
    else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Missing required query params.".to_string(),
        ));
    };

    build_request(kind, device_id, &start_raw, &end_raw, &period_raw)
}

/// Validates a report-generation body against the endpoint's report family.
pub(crate) fn validate_body(
    body: &ReportBody,
    kind: ReportKind,
) -> Result<ReportRequest, (StatusCode, String)> {
    let report_type = trimmed(body.report_type.as_deref());
    let device_id = trimmed(body.device_id.as_deref());
    let start_raw = trimmed(body.start_date.as_deref());
    let end_raw = trimmed(body.end_date.as_deref());
    let period_raw = trimmed(body.time_period.as_deref());

    let (Some(report_type), Some(device_id), Some(start_raw), Some(end_raw), Some(period_raw)) =
        (report_type, device_id, start_raw, end_raw, period_raw)
    else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Missing required parameters".to_string(),
        ));
    };

    if ReportKind::parse(report_type) != Some(kind) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Only {} reports are supported", kind.as_str()),
        ));
    }

    build_request(kind, device_id.to_string(), start_raw, end_raw, period_raw)
}

fn build_request(
    kind: ReportKind,
    device_id: String,
    start_raw: &str,
    end_raw: &str,
    period_raw: &str,
) -> Result<ReportRequest, (StatusCode, String)> {
    let cadence = Cadence::parse(period_raw).ok_or((
        StatusCode::BAD_REQUEST,
        "Invalid timePeriod value.".to_string(),
    ))?;
    let start = period::parse_date(start_raw).ok_or((
        StatusCode::BAD_REQUEST,
        "Invalid startDate value.".to_string(),
    ))?;
    let end = period::parse_date(end_raw).ok_or((
        StatusCode::BAD_REQUEST,
        "Invalid endDate value.".to_string(),
    ))?;

    Ok(ReportRequest {
        kind,
        device_id,
        start,
        end,
        cadence,
    })
}

pub(crate) async fn run(
    state: &AppState,
    request: &ReportRequest,
) -> Result<ReportResult, (StatusCode, String)> {
    crate::report::run_report(&state.db, request)
        .await
        .map_err(internal_error)
}

/// CSV download for a finished report run.
pub(crate) fn csv_attachment(result: &ReportResult) -> Result<Response, (StatusCode, String)> {
    let contents = render::csv::render_csv(result).map_err(internal_error)?;
    let filename = render::attachment_filename(result, "csv");
    attachment_response(contents, &filename, "text/csv")
}

/// Print-ready HTML download for a finished report run.
pub(crate) fn document_attachment(result: &ReportResult) -> Result<Response, (StatusCode, String)> {
    let filename = render::attachment_filename(result, "html");
    attachment_response(
        render::html::print_document(result),
        &filename,
        "text/html; charset=utf-8",
    )
}

pub(crate) fn attachment_response(
    contents: String,
    filename: &str,
    content_type: &'static str,
) -> Result<Response, (StatusCode, String)> {
    let mut response = Response::new(Body::from(contents));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    let content_disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        filename.replace('"', "_")
    ))
    .map_err(internal_error)?;
    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, content_disposition);
    Ok(response)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
