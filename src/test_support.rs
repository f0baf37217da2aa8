use crate::config::ReportConfig;
use crate::db;
use crate::state::AppState;

pub fn test_config() -> ReportConfig {
    ReportConfig {
        database_url: "postgresql://postgres@localhost/postgres".to_string(),
        cors_allowed_origins: vec![
            "http://localhost:5000".to_string(),
            "http://localhost:4200".to_string(),
        ],
        rate_limit_per_second: 20,
        rate_limit_burst: 60,
    }
}

// The pool is lazy, so route-shape tests that never touch the database can
// still build a full AppState.
pub fn test_state() -> AppState {
    let config = test_config();
    let pool = db::connect_lazy(&config.database_url).expect("connect_lazy");
    AppState { config, db: pool }
}
