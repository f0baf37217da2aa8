//! Telemetry period aggregation engine. One request resolves the device and
//! metric keys, fetches the narrow-store rows for the range, coerces each row
//! to a numeric sample, buckets by period, reduces per catalog strategy and
//! pivots into wide formatted rows; ranges with nothing usable come back as
//! placeholder rows instead. Everything here is request-scoped.

pub mod aggregate;
pub mod catalog;
pub mod coerce;
pub mod entity;
pub mod gaps;
pub mod keys;
pub mod period;
pub mod pivot;
pub mod quality;
pub mod store;
pub mod summary;
pub mod types;

use std::collections::HashMap;

use anyhow::Context;
use chrono::{DateTime, NaiveDate};
use sqlx::PgPool;

use catalog::{MetricColumn, ReportKind};
use period::Cadence;
use store::TelemetryRow;
use types::{has_real_data, Observation, ReportResult, UNKNOWN_DEVICE};

/// One validated report request. Parameter parsing and validation happen at
/// the HTTP layer; by the time this exists the dates and cadence are good.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub device_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cadence: Cadence,
}

/// Runs the full pipeline for one request. An unknown device or a range with
/// zero coercible rows yields a placeholder report; store failures (after the
/// fetch layer's retry) propagate as errors.
pub async fn run_report(pool: &PgPool, request: &ReportRequest) -> anyhow::Result<ReportResult> {
    let columns = request.kind.columns();

    let device = entity::resolve_device(pool, &request.device_id)
        .await
        .context("device lookup failed")?;
    let Some(device) = device else {
        tracing::info!(
            device_id = %request.device_id,
            report = request.kind.as_str(),
            "device not found, serving placeholder report"
        );
        return Ok(placeholder_result(request, UNKNOWN_DEVICE.to_owned()));
    };

    let key_ids = keys::resolve_keys(pool, &request.kind.key_names())
        .await
        .context("key dictionary lookup failed")?;

    let telemetry = if key_ids.is_empty() {
        Vec::new()
    } else {
        let ids: Vec<i32> = key_ids.values().copied().collect();
        let range = period::range_bounds(request.start, request.end);
        store::fetch_rows(pool, device.id, &ids, range).await?
    };

    let observations = observations(&telemetry, columns, &key_ids);
    let aggregates = aggregate::aggregate(&observations, columns, request.cadence);
    let mut rows = pivot::pivot(&aggregates, columns);
    if rows.is_empty() {
        rows = gaps::fill_empty_range(request.start, request.end, request.cadence, columns);
    }
    let has_data = has_real_data(&rows);

    tracing::debug!(
        device_id = %request.device_id,
        report = request.kind.as_str(),
        rows = rows.len(),
        has_data,
        "report assembled"
    );

    Ok(ReportResult {
        kind: request.kind,
        cadence: request.cadence,
        device_id: request.device_id.clone(),
        device_name: device.display_name(),
        start: request.start,
        end: request.end,
        rows,
        has_data,
    })
}

/// Attributes raw store rows to catalog columns and coerces their values.
/// Rows for keys outside the catalog, rows that fail coercion and rows with
/// out-of-range timestamps drop out individually.
fn observations(
    telemetry: &[TelemetryRow],
    columns: &[MetricColumn],
    key_ids: &HashMap<String, i32>,
) -> Vec<Observation> {
    let mut column_by_key: HashMap<i32, usize> = HashMap::new();
    for (index, column) in columns.iter().enumerate() {
        if let Some(id) = key_ids.get(column.key) {
            column_by_key.insert(*id, index);
        }
    }

    telemetry
        .iter()
        .filter_map(|row| {
            let column = *column_by_key.get(&row.key)?;
            let value = coerce::coerce_value(row)?;
            let at = DateTime::from_timestamp_millis(row.ts)?;
            Some(Observation { column, at, value })
        })
        .collect()
}

fn placeholder_result(request: &ReportRequest, device_name: String) -> ReportResult {
    ReportResult {
        kind: request.kind,
        cadence: request.cadence,
        device_id: request.device_id.clone(),
        device_name,
        start: request.start,
        end: request.end,
        rows: gaps::fill_empty_range(
            request.start,
            request.end,
            request.cadence,
            request.kind.columns(),
        ),
        has_data: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: ReportKind, cadence: Cadence, start: (u32, u32), end: (u32, u32)) -> ReportRequest {
        ReportRequest {
            kind,
            device_id: "meter-1".to_owned(),
            start: NaiveDate::from_ymd_opt(2024, start.0, start.1).expect("date"),
            end: NaiveDate::from_ymd_opt(2024, end.0, end.1).expect("date"),
            cadence,
        }
    }

    fn telemetry(key: i32, ts: i64, dbl_v: Option<f64>, str_v: Option<&str>) -> TelemetryRow {
        TelemetryRow { key, ts, dbl_v, long_v: None, str_v: str_v.map(str::to_owned) }
    }

    // 2024-03-11T00:00:00Z in epoch millis.
    const MAR_11: i64 = 1_710_115_200_000;
    const HOUR: i64 = 3_600_000;

    #[test]
    fn observations_drop_unknown_keys_and_uncoercible_rows() {
        let columns = ReportKind::DemandAnalysis.columns();
        let key_ids: HashMap<String, i32> =
            [("KW_Demand".to_owned(), 17), ("Frequency".to_owned(), 23)].into();
        let rows = vec![
            telemetry(17, MAR_11, Some(12.5), None),
            telemetry(99, MAR_11 + HOUR, Some(1.0), None),
            telemetry(23, MAR_11 + 2 * HOUR, None, Some("not a number")),
            telemetry(23, MAR_11 + 3 * HOUR, None, Some("50.02")),
        ];

        let observations = observations(&rows, columns, &key_ids);
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].column, 0);
        assert_eq!(observations[0].value, 12.5);
        assert_eq!(observations[1].value, 50.02);
    }

    #[test]
    fn monthly_mean_of_two_samples_in_one_month() {
        let columns = ReportKind::DemandAnalysis.columns();
        let key_ids: HashMap<String, i32> = [("KW_Demand".to_owned(), 17)].into();
        let rows = vec![
            telemetry(17, MAR_11, Some(10.0), None),
            telemetry(17, MAR_11 + 24 * HOUR, Some(20.0), None),
        ];

        let observations = observations(&rows, columns, &key_ids);
        let aggregates = aggregate::aggregate(&observations, columns, Cadence::Monthly);
        let pivoted = pivot::pivot(&aggregates, columns);
        assert_eq!(pivoted.len(), 1);
        assert_eq!(pivoted[0].period, "2024-03-01");
        assert_eq!(pivoted[0].fields[0], ("KW_Demand", "15.00".to_owned()));
        assert!(has_real_data(&pivoted));
    }

    #[test]
    fn delta_sum_accumulates_within_one_period() {
        let columns = ReportKind::EnergyConsumption.columns();
        let key_ids: HashMap<String, i32> = [("delta_kWh".to_owned(), 41)].into();
        let rows = vec![
            telemetry(41, MAR_11, Some(1.5), None),
            telemetry(41, MAR_11 + HOUR, Some(2.5), None),
            telemetry(41, MAR_11 + 2 * HOUR, Some(1.0), None),
        ];

        let observations = observations(&rows, columns, &key_ids);
        let aggregates = aggregate::aggregate(&observations, columns, Cadence::Daily);
        let pivoted = pivot::pivot(&aggregates, columns);
        assert_eq!(pivoted.len(), 1);
        let (_, delta) = &pivoted[0].fields[3];
        assert_eq!(delta, "5.00");
        // Register columns saw no samples and stay absent.
        let (_, register) = &pivoted[0].fields[0];
        assert_eq!(register, "N/A");
    }

    #[test]
    fn unknown_device_yields_a_full_placeholder_week() {
        let request = request(ReportKind::DemandAnalysis, Cadence::Daily, (3, 11), (3, 17));
        let result = placeholder_result(&request, UNKNOWN_DEVICE.to_owned());
        assert_eq!(result.rows.len(), 7);
        assert!(!result.has_data);
        assert_eq!(result.device_name, UNKNOWN_DEVICE);
        assert!(result.rows.iter().all(|row| row.is_placeholder()));
    }
}
