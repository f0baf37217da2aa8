//! Output renderers. Each consumes a fully materialized [`ReportResult`];
//! a rendering problem never reaches back into aggregation.

pub mod csv;
pub mod html;

use crate::report::period;
use crate::report::types::ReportResult;

/// Attachment filename: report type, device and date range, e.g.
/// `power_quality_meter-7_2024-03-11_to_2024-03-17.csv`.
pub fn attachment_filename(result: &ReportResult, extension: &str) -> String {
    format!(
        "{}_{}_{}_to_{}.{}",
        result.kind.as_str(),
        result.device_id,
        period::label(result.start),
        period::label(result.end),
        extension
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::report::catalog::ReportKind;
    use crate::report::period::Cadence;

    pub(crate) fn sample_result(kind: ReportKind) -> ReportResult {
        let start = NaiveDate::from_ymd_opt(2024, 3, 11).expect("date");
        let end = NaiveDate::from_ymd_opt(2024, 3, 12).expect("date");
        ReportResult {
            kind,
            cadence: Cadence::Daily,
            device_id: "meter-7".to_owned(),
            device_name: "Main Incomer".to_owned(),
            start,
            end,
            rows: crate::report::gaps::fill_empty_range(start, end, Cadence::Daily, kind.columns()),
            has_data: false,
        }
    }

    #[test]
    fn filenames_carry_kind_device_and_range() {
        let result = sample_result(ReportKind::PowerQuality);
        assert_eq!(
            attachment_filename(&result, "csv"),
            "power_quality_meter-7_2024-03-11_to_2024-03-12.csv"
        );
        assert_eq!(
            attachment_filename(&sample_result(ReportKind::EnergyConsumption), "html"),
            "energy_consumption_meter-7_2024-03-11_to_2024-03-12.html"
        );
    }
}
