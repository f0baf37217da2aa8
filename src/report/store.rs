use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Upper bound on a single telemetry query.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

const RETRY_BACKOFF: Duration = Duration::from_millis(500);

const FETCH_SQL: &str = "SELECT key, ts, dbl_v, long_v, str_v \
     FROM ts_kv \
     WHERE entity_id = $1 AND key = ANY($2) AND ts >= $3 AND ts < $4 \
     ORDER BY ts ASC";

/// Narrow-store row as fetched: the value sits in exactly one of the three
/// typed columns (or none, for rows that were written empty).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TelemetryRow {
    pub key: i32,
    pub ts: i64,
    pub dbl_v: Option<f64>,
    pub long_v: Option<i64>,
    pub str_v: Option<String>,
}

/// Fetches all telemetry for one entity, key set and half-open time range,
/// ordered by timestamp ascending. One failed or timed-out attempt is
/// retried once after a short backoff; the second failure surfaces to the
/// caller as a server error, never as an empty report.
pub async fn fetch_rows(
    pool: &PgPool,
    entity_id: Uuid,
    key_ids: &[i32],
    range: (DateTime<Utc>, DateTime<Utc>),
) -> anyhow::Result<Vec<TelemetryRow>> {
    match attempt(pool, entity_id, key_ids, range).await {
        Ok(rows) => Ok(rows),
        Err(err) => {
            tracing::warn!(entity_id = %entity_id, error = %err, "telemetry fetch failed, retrying once");
            tokio::time::sleep(RETRY_BACKOFF).await;
            attempt(pool, entity_id, key_ids, range)
                .await
                .context("telemetry fetch failed after retry")
        }
    }
}

async fn attempt(
    pool: &PgPool,
    entity_id: Uuid,
    key_ids: &[i32],
    range: (DateTime<Utc>, DateTime<Utc>),
) -> anyhow::Result<Vec<TelemetryRow>> {
    let (start_ms, end_ms) = range_millis(range);
    let query = sqlx::query_as::<_, TelemetryRow>(FETCH_SQL)
        .bind(entity_id)
        .bind(key_ids.to_vec())
        .bind(start_ms)
        .bind(end_ms)
        .fetch_all(pool);
    match tokio::time::timeout(FETCH_TIMEOUT, query).await {
        Ok(result) => result.context("telemetry query failed"),
        Err(_) => anyhow::bail!(
            "telemetry query exceeded the {}s fetch timeout",
            FETCH_TIMEOUT.as_secs()
        ),
    }
}

fn range_millis((start, end): (DateTime<Utc>, DateTime<Utc>)) -> (i64, i64) {
    (start.timestamp_millis(), end.timestamp_millis())
}
