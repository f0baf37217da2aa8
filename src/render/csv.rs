use anyhow::{Context, Result};

use crate::report::types::ReportResult;

/// Serializes report rows as CSV: `period` first, then the catalog's display
/// columns in declared order, one record per period. Same column set the
/// JSON and HTML surfaces show; quoting is the writer's problem.
pub fn render_csv(result: &ReportResult) -> Result<String> {
    let columns = result.kind.columns();
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push("period");
    header.extend(columns.iter().map(|c| c.column));
    writer
        .write_record(&header)
        .context("failed to write CSV header")?;

    for row in &result.rows {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(row.period.as_str());
        record.extend(row.fields.iter().map(|(_, value)| value.as_str()));
        writer
            .write_record(&record)
            .context("failed to write CSV record")?;
    }

    let bytes = writer.into_inner().context("failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_result;
    use crate::report::catalog::ReportKind;

    #[test]
    fn header_matches_the_catalog_display_columns() {
        let csv = render_csv(&sample_result(ReportKind::EnergyConsumption)).expect("csv");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("period,KWH_Import,KVAH_Total,KVARH_Import,delta_kWh,delta_kVAh,delta_kVArh")
        );
        assert_eq!(lines.next(), Some("2024-03-11,N/A,N/A,N/A,N/A,N/A,N/A"));
        assert_eq!(lines.next(), Some("2024-03-12,N/A,N/A,N/A,N/A,N/A,N/A"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn every_record_has_one_field_per_column_plus_period() {
        let result = sample_result(ReportKind::PowerQuality);
        let expected = result.kind.columns().len() + 1;
        let csv = render_csv(&result).expect("csv");
        for line in csv.lines() {
            assert_eq!(line.split(',').count(), expected, "line {line:?}");
        }
    }

    #[test]
    fn fields_with_separators_get_quoted() {
        let mut result = sample_result(ReportKind::DemandAnalysis);
        result.rows[0].fields[0].1 = "1,5".to_owned();
        let csv = render_csv(&result).expect("csv");
        let record = csv.lines().nth(1).expect("record");
        assert!(record.starts_with("2024-03-11,\"1,5\",N/A"), "{record:?}");
    }
}
