use std::fmt::Write as _;

use crate::report::catalog::ReportKind;
use crate::report::period;
use crate::report::quality::QualityStatus;
use crate::report::summary;
use crate::report::types::{ReportResult, NO_DATA};

/// Report fragment served by the preview endpoints: header, summary block
/// and the detailed table, ready to drop into a host page.
pub fn preview_fragment(result: &ReportResult) -> String {
    let mut out = String::new();
    header_section(&mut out, result);
    summary_section(&mut out, result);
    table_section(&mut out, result);
    out
}

/// Complete print-ready HTML document around the same fragment. This is the
/// artifact a downstream PDF converter renders; the page rules match an A4
/// sheet with 20mm/15mm margins.
pub fn print_document(result: &ReportResult) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{css}\n</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = result.kind.title(),
        css = DOCUMENT_CSS,
        body = preview_fragment(result),
    )
}

fn header_section(out: &mut String, result: &ReportResult) {
    let _ = write!(
        out,
        "<div class=\"report-header\">\n<h2>{}</h2>\n\
         <div class=\"report-info\">Device: {} (ID: {})</div>\n\
         <div class=\"report-info\">Period: {} to {}</div>\n\
         <div class=\"report-info\">Report Type: {}</div>\n</div>\n",
        result.kind.title(),
        escape_html(&result.device_name),
        escape_html(&result.device_id),
        period::display_date(result.start),
        period::display_date(result.end),
        result.cadence.title(),
    );
}

fn summary_section(out: &mut String, result: &ReportResult) {
    out.push_str("<div class=\"report-summary\">\n<h3>Summary</h3>\n");
    match result.kind {
        ReportKind::EnergyConsumption => {
            let summary = summary::energy_summary(&result.rows);
            summary_item(out, "Total Energy Consumption", &summary.total_energy_consumption, "kWh", None);
        }
        ReportKind::DemandAnalysis => {
            let summary = summary::demand_summary(&result.rows);
            summary_item(out, "Average KW Demand", &summary.avg_kw_demand, "kW", None);
            summary_item(out, "Maximum KW Demand", &summary.max_kw_demand, "kW", None);
            summary_item(out, "Average Power Factor", &summary.avg_power_factor, "", None);
            summary_item(out, "Peak Demand Period", &summary.peak_demand_period, "", None);
        }
        ReportKind::PowerQuality => {
            let summary = summary::quality_summary(&result.rows);
            summary_item(
                out,
                "Average Voltage",
                summary.avg_voltage.as_deref().unwrap_or(NO_DATA),
                "V",
                Some(summary.voltage_status),
            );
            summary_item(
                out,
                "Average Frequency",
                summary.avg_frequency.as_deref().unwrap_or(NO_DATA),
                "Hz",
                Some(summary.frequency_status),
            );
            summary_item(
                out,
                "Average Power Factor",
                summary.avg_power_factor.as_deref().unwrap_or(NO_DATA),
                "",
                Some(summary.power_factor_status),
            );
            summary_item(
                out,
                "Average THD",
                summary.avg_thd.as_deref().unwrap_or(NO_DATA),
                "%",
                Some(summary.thd_status),
            );
            summary_item(
                out,
                "Max Voltage Unbalance",
                summary.max_voltage_unbalance.as_deref().unwrap_or(NO_DATA),
                "%",
                Some(summary.voltage_unbalance_status),
            );
            summary_item(
                out,
                "Max Current Unbalance",
                summary.max_current_unbalance.as_deref().unwrap_or(NO_DATA),
                "%",
                Some(summary.current_unbalance_status),
            );
        }
    }
    out.push_str("</div>\n");
}

fn summary_item(
    out: &mut String,
    label: &str,
    value: &str,
    unit: &str,
    status: Option<QualityStatus>,
) {
    let _ = write!(out, "<div class=\"summary-item\">{label}: {}", escape_html(value));
    if !unit.is_empty() && value != NO_DATA {
        let _ = write!(out, " {unit}");
    }
    if let Some(status) = status {
        let _ = write!(
            out,
            " <span class=\"status status-{0}\">{0}</span>",
            status.as_str()
        );
    }
    out.push_str("</div>\n");
}

fn table_section(out: &mut String, result: &ReportResult) {
    out.push_str(
        "<div class=\"report-section\">\n<h3>Detailed Data</h3>\n\
         <table class=\"report-table\">\n<thead>\n<tr><th>Period</th>",
    );
    for column in result.kind.columns() {
        let _ = write!(out, "<th>{}</th>", escape_html(column.column));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &result.rows {
        out.push_str("<tr>");
        let _ = write!(out, "<td>{}</td>", escape_html(&row.period));
        for (_, value) in &row.fields {
            let _ = write!(out, "<td>{}</td>", escape_html(value));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n</div>\n");
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

const DOCUMENT_CSS: &str = "\
body { font-family: Arial, Helvetica, sans-serif; color: #222; margin: 24px; }
.report-header h2 { color: #3f51b5; margin-bottom: 4px; }
.report-info { font-size: 13px; margin: 2px 0; }
.report-summary { margin: 16px 0; }
.summary-item { font-size: 13px; margin: 2px 0; }
.report-section h3 { color: #3f51b5; }
.report-table { border-collapse: collapse; width: 100%; font-size: 12px; }
.report-table th, .report-table td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
.report-table th { background: #3f51b5; color: #fff; }
.status { padding: 1px 6px; border-radius: 8px; font-size: 11px; text-transform: uppercase; }
.status-excellent { background: #e8f5e9; color: #2e7d32; }
.status-good { background: #f1f8e9; color: #558b2f; }
.status-warning { background: #fff8e1; color: #f9a825; }
.status-critical { background: #ffebee; color: #c62828; }
.status-no-data { background: #eceff1; color: #607d8b; }
@page { size: A4; margin: 20mm 15mm; }";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_result;
    use crate::report::types::ReportRow;

    fn with_demand_row(mut result: ReportResult, kw: &str, max_kw: &str) -> ReportResult {
        let columns = ReportKind::DemandAnalysis.columns();
        result.rows = vec![ReportRow {
            period: "2024-03-11".to_owned(),
            fields: columns
                .iter()
                .map(|c| {
                    let value = match c.column {
                        "KW_Demand" => kw,
                        "KW_Max_Demand" => max_kw,
                        _ => NO_DATA,
                    };
                    (c.column, value.to_owned())
                })
                .collect(),
        }];
        result.has_data = true;
        result
    }

    #[test]
    fn fragment_carries_header_summary_and_table() {
        let html = preview_fragment(&sample_result(ReportKind::EnergyConsumption));
        assert!(html.contains("<h2>Energy Consumption Report</h2>"));
        assert!(html.contains("Device: Main Incomer (ID: meter-7)"));
        assert!(html.contains("Period: March 11, 2024 to March 12, 2024"));
        assert!(html.contains("Report Type: Daily"));
        assert!(html.contains("Total Energy Consumption: 0.00 kWh"));
        assert!(html.contains("<th>delta_kWh</th>"));
        // Two placeholder rows plus the header row.
        assert_eq!(html.matches("<tr>").count(), 3);
    }

    #[test]
    fn demand_summary_lines_render_values() {
        let result = with_demand_row(sample_result(ReportKind::DemandAnalysis), "15.00", "50.00");
        let html = preview_fragment(&result);
        assert!(html.contains("Average KW Demand: 15.00 kW"));
        assert!(html.contains("Maximum KW Demand: 50.00 kW"));
        assert!(html.contains("Peak Demand Period: 2024-03-11"));
        assert!(html.contains("Average Power Factor: N/A"));
    }

    #[test]
    fn power_quality_placeholders_show_no_data_statuses() {
        let html = preview_fragment(&sample_result(ReportKind::PowerQuality));
        assert!(html.contains("Average Voltage: N/A"));
        // No unit after the no-data marker.
        assert!(!html.contains("N/A V "));
        assert_eq!(html.matches("status-no-data").count(), 6);
    }

    #[test]
    fn device_fields_are_html_escaped() {
        let mut result = sample_result(ReportKind::EnergyConsumption);
        result.device_name = "<script>alert(1)</script>".to_owned();
        let html = preview_fragment(&result);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn document_wraps_the_fragment_with_print_styles() {
        let result = sample_result(ReportKind::PowerQuality);
        let document = print_document(&result);
        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains("<title>Power Quality Report</title>"));
        assert!(document.contains("@page { size: A4; margin: 20mm 15mm; }"));
        assert!(document.contains(&preview_fragment(&result)));
    }
}
