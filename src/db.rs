use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

// The pool is created lazily so the server can start before Postgres is
// reachable; report queries surface connection failures as 500s instead.
pub fn connect_lazy(database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(8))
        .connect_lazy(database_url)
        .context("Failed to create lazy database pool")
}
