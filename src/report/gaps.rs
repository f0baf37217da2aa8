use chrono::NaiveDate;

use super::catalog::MetricColumn;
use super::period::{self, Cadence};
use super::types::{ReportRow, NO_DATA};

/// Placeholder rows for a range with no usable data: one row per period from
/// `start` to `end` inclusive, every metric field the no-data marker. Runs
/// when device resolution fails or the fetch matched zero coercible rows.
pub fn fill_empty_range(
    start: NaiveDate,
    end: NaiveDate,
    cadence: Cadence,
    columns: &[MetricColumn],
) -> Vec<ReportRow> {
    period::enumerate_periods(start, end, cadence)
        .into_iter()
        .map(|date| ReportRow {
            period: period::label(date),
            fields: columns
                .iter()
                .map(|column| (column.column, NO_DATA.to_owned()))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::catalog::ReportKind;
    use crate::report::types::has_real_data;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    #[test]
    fn one_week_daily_yields_seven_placeholder_rows() {
        let columns = ReportKind::DemandAnalysis.columns();
        let rows = fill_empty_range(date(2024, 3, 11), date(2024, 3, 17), Cadence::Daily, columns);
        assert_eq!(rows.len(), 7);
        assert!(rows.windows(2).all(|pair| pair[0].period < pair[1].period));
        for row in &rows {
            assert_eq!(row.fields.len(), columns.len());
            assert!(row.is_placeholder());
        }
        assert!(!has_real_data(&rows));
    }

    #[test]
    fn single_period_range_yields_one_row() {
        let columns = ReportKind::EnergyConsumption.columns();
        let rows = fill_empty_range(date(2024, 3, 11), date(2024, 3, 11), Cadence::Daily, columns);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].period, "2024-03-11");
    }

    #[test]
    fn monthly_range_steps_whole_months_from_the_requested_start() {
        let columns = ReportKind::PowerQuality.columns();
        let rows = fill_empty_range(date(2024, 1, 15), date(2024, 3, 20), Cadence::Monthly, columns);
        let periods: Vec<_> = rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-01-15", "2024-02-15", "2024-03-15"]);
    }
}
