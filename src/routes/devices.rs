use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::map_db_error;
use crate::report::entity::{self, DeviceRow};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/devices",
    tag = "devices",
    responses(
        (status = 200, description = "Device directory", body = Vec<DeviceRow>),
        (status = 500, description = "Store failure")
    )
)]
pub(crate) async fn list_devices(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeviceRow>>, (StatusCode, String)> {
    let devices = entity::list_devices(&state.db).await.map_err(map_db_error)?;
    Ok(Json(devices))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/devices", get(list_devices))
}
