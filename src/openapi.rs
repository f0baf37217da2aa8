use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::healthz_handler,
        crate::routes::devices::list_devices,
        crate::routes::energy::energy_data,
        crate::routes::energy::preview_energy_report,
        crate::routes::energy::generate_energy_csv,
        crate::routes::energy::generate_energy_document,
        crate::routes::demand::demand_data,
        crate::routes::demand::preview_demand_report,
        crate::routes::demand::generate_demand_csv,
        crate::routes::demand::generate_demand_document,
        crate::routes::power_quality::power_quality_data,
        crate::routes::power_quality::preview_power_quality_report,
        crate::routes::power_quality::generate_power_quality_csv,
        crate::routes::power_quality::generate_power_quality_document,
    ),
    components(schemas(
        crate::routes::health::HealthResponse,
        crate::report::entity::DeviceRow,
        crate::report::types::ReportRow,
        crate::report::quality::QualityStatus,
        crate::report::summary::EnergySummary,
        crate::report::summary::DemandSummary,
        crate::report::summary::QualitySummary,
        crate::routes::reports::ReportMetadata,
        crate::routes::reports::ReportDataResponse,
        crate::routes::reports::ReportBody,
        crate::routes::energy::EnergyPreviewResponse,
        crate::routes::demand::DemandPreviewResponse,
        crate::routes::power_quality::QualityPreviewResponse,
    )),
    tags(
        (name = "devices", description = "Device directory"),
        (name = "energy", description = "Energy consumption reports"),
        (name = "demand", description = "Demand analysis reports"),
        (name = "power-quality", description = "Power quality reports")
    )
)]
pub struct ApiDoc;

pub fn openapi_json() -> serde_json::Value {
    match serde_json::to_value(ApiDoc::openapi()) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize OpenAPI document");
            serde_json::Value::Null
        }
    }
}

pub(crate) async fn openapi_handler() -> Json<serde_json::Value> {
    Json(openapi_json())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_handler))
}
