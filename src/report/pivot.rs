use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::catalog::MetricColumn;
use super::period;
use super::types::{ReportRow, NO_DATA};

/// Fixed-precision cell rendering shared by every output surface.
pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Reshapes dense per-period aggregates into wide rows: one row per period
/// ascending, one field per catalog column in declared order. Absent cells
/// render the no-data marker; no other columns ever appear.
pub fn pivot(
    aggregates: &BTreeMap<NaiveDate, Vec<Option<f64>>>,
    columns: &[MetricColumn],
) -> Vec<ReportRow> {
    aggregates
        .iter()
        .map(|(date, cells)| ReportRow {
            period: period::label(*date),
            fields: columns
                .iter()
                .zip(cells)
                .map(|(column, cell)| {
                    let rendered = match cell {
                        Some(value) => format_value(*value, column.decimals),
                        None => NO_DATA.to_owned(),
                    };
                    (column.column, rendered)
                })
                .collect(),
        })
        .collect()
}
