pub mod demand;
pub mod devices;
pub mod energy;
pub mod health;
pub mod power_quality;
pub mod reports;

use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest(
            "/api",
            Router::new()
                .merge(devices::router())
                .merge(energy::router())
                .merge(demand::router())
                .merge(power_quality::router())
                .merge(crate::openapi::router()),
        )
        .with_state(state)
}
