//! Report-level summary statistics, computed from the formatted rows. Cells
//! holding the no-data marker simply drop out of the statistics; a report of
//! nothing but placeholders produces no-data summaries rather than zeros.

use super::catalog::{column_index, ReportKind};
use super::pivot::format_value;
use super::quality::{self, classify, QualityStatus};
use super::types::{has_real_data, ReportRow, NO_DATA};

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnergySummary {
    /// Sum of the per-period kWh increments, 2 dp.
    pub total_energy_consumption: String,
}

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemandSummary {
    #[serde(rename = "avgKWDemand")]
    pub avg_kw_demand: String,
    #[serde(rename = "maxKWDemand")]
    pub max_kw_demand: String,
    pub avg_power_factor: String,
    /// Period label of the row with the highest KW_Max_Demand.
    pub peak_demand_period: String,
}

#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub avg_voltage: Option<String>,
    pub avg_frequency: Option<String>,
    pub avg_power_factor: Option<String>,
    #[serde(rename = "avgTHD")]
    pub avg_thd: Option<String>,
    pub max_voltage_unbalance: Option<String>,
    pub max_current_unbalance: Option<String>,
    pub voltage_status: QualityStatus,
    pub frequency_status: QualityStatus,
    pub power_factor_status: QualityStatus,
    pub thd_status: QualityStatus,
    pub voltage_unbalance_status: QualityStatus,
    pub current_unbalance_status: QualityStatus,
    pub has_actual_data: bool,
}

pub fn energy_summary(rows: &[ReportRow]) -> EnergySummary {
    let delta_kwh = column_values(rows, ReportKind::EnergyConsumption, "delta_kWh");
    // Folding from +0.0 keeps the empty total at "0.00"; the empty-iterator
    // f64 sum identity is -0.0, which would format as "-0.00".
    let total = delta_kwh.iter().fold(0.0, |acc, v| acc + v);
    EnergySummary {
        total_energy_consumption: format_value(total, 2),
    }
}

pub fn demand_summary(rows: &[ReportRow]) -> DemandSummary {
    let kind = ReportKind::DemandAnalysis;
    let kw = column_values(rows, kind, "KW_Demand");
    let max_kw = column_values(rows, kind, "KW_Max_Demand");
    let pf = column_values(rows, kind, "Power_Factor");

    let peak_period = column_index(kind, "KW_Max_Demand").and_then(|index| {
        rows.iter()
            .filter_map(|row| row.numeric(index).map(|value| (row, value)))
            .reduce(|best, next| if next.1 > best.1 { next } else { best })
            .map(|(row, _)| row.period.clone())
    });

    DemandSummary {
        avg_kw_demand: format_or_no_data(mean(&kw), 2),
        max_kw_demand: format_or_no_data(max(&max_kw), 2),
        avg_power_factor: format_or_no_data(mean(&pf), 3),
        peak_demand_period: peak_period.unwrap_or_else(|| NO_DATA.to_owned()),
    }
}

pub fn quality_summary(rows: &[ReportRow]) -> QualitySummary {
    let kind = ReportKind::PowerQuality;

    let phase_means: Vec<f64> = ["Voltage_AN", "Voltage_BN", "Voltage_CN"]
        .into_iter()
        .filter_map(|column| mean(&column_values(rows, kind, column)))
        .collect();
    let avg_voltage = mean(&phase_means);

    let thd_means: Vec<f64> = ["THD_Voltage", "THD_Current"]
        .into_iter()
        .filter_map(|column| mean(&column_values(rows, kind, column)))
        .collect();
    let avg_thd = mean(&thd_means);

    let avg_frequency = mean(&column_values(rows, kind, "Frequency"));
    let avg_power_factor = mean(&column_values(rows, kind, "Power_Factor"));
    let max_voltage_unbalance = max(&column_values(rows, kind, "Voltage_Unbalance"));
    let max_current_unbalance = max(&column_values(rows, kind, "Current_Unbalance"));

    QualitySummary {
        avg_voltage: avg_voltage.map(|v| format_value(v, 2)),
        avg_frequency: avg_frequency.map(|v| format_value(v, 2)),
        avg_power_factor: avg_power_factor.map(|v| format_value(v, 3)),
        avg_thd: avg_thd.map(|v| format_value(v, 2)),
        max_voltage_unbalance: max_voltage_unbalance.map(|v| format_value(v, 2)),
        max_current_unbalance: max_current_unbalance.map(|v| format_value(v, 2)),
        voltage_status: classify(avg_voltage, &quality::VOLTAGE),
        frequency_status: classify(avg_frequency, &quality::FREQUENCY),
        power_factor_status: classify(avg_power_factor, &quality::POWER_FACTOR),
        thd_status: classify(avg_thd, &quality::THD),
        voltage_unbalance_status: classify(max_voltage_unbalance, &quality::VOLTAGE_UNBALANCE),
        current_unbalance_status: classify(max_current_unbalance, &quality::CURRENT_UNBALANCE),
        has_actual_data: has_real_data(rows),
    }
}

fn column_values(rows: &[ReportRow], kind: ReportKind, column: &str) -> Vec<f64> {
    let Some(index) = column_index(kind, column) else {
        return Vec::new();
    };
    rows.iter().filter_map(|row| row.numeric(index)).collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

fn format_or_no_data(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format_value(v, decimals),
        None => NO_DATA.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::gaps::fill_empty_range;
    use crate::report::period::Cadence;
    use chrono::NaiveDate;

    fn row(kind: ReportKind, period: &str, values: &[(&str, &str)]) -> ReportRow {
        ReportRow {
            period: period.to_owned(),
            fields: kind
                .columns()
                .iter()
                .map(|c| {
                    let value = values
                        .iter()
                        .find(|(name, _)| *name == c.column)
                        .map(|(_, v)| (*v).to_owned())
                        .unwrap_or_else(|| NO_DATA.to_owned());
                    (c.column, value)
                })
                .collect(),
        }
    }

    fn placeholder_rows(kind: ReportKind) -> Vec<ReportRow> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 11).expect("date");
        let end = NaiveDate::from_ymd_opt(2024, 3, 13).expect("date");
        fill_empty_range(start, end, Cadence::Daily, kind.columns())
    }

    #[test]
    fn energy_total_sums_numeric_delta_cells_only() {
        let kind = ReportKind::EnergyConsumption;
        let rows = vec![
            row(kind, "2024-03-11", &[("delta_kWh", "1.50")]),
            row(kind, "2024-03-12", &[("delta_kWh", "2.50")]),
            row(kind, "2024-03-13", &[("KWH_Import", "900.00")]),
        ];
        assert_eq!(energy_summary(&rows).total_energy_consumption, "4.00");
    }

    #[test]
    fn energy_total_of_placeholders_is_zero() {
        let summary = energy_summary(&placeholder_rows(ReportKind::EnergyConsumption));
        assert_eq!(summary.total_energy_consumption, "0.00");
    }

    #[test]
    fn energy_total_never_renders_negative_zero() {
        // No rows at all.
        assert_eq!(energy_summary(&[]).total_energy_consumption, "0.00");
        // Cells that parse to -0.0 still sum to an unsigned zero.
        let kind = ReportKind::EnergyConsumption;
        let rows = vec![row(kind, "2024-03-11", &[("delta_kWh", "-0.00")])];
        assert_eq!(energy_summary(&rows).total_energy_consumption, "0.00");
    }

    #[test]
    fn demand_summary_averages_and_peaks() {
        let kind = ReportKind::DemandAnalysis;
        let rows = vec![
            row(
                kind,
                "2024-03-11",
                &[("KW_Demand", "10.00"), ("KW_Max_Demand", "30.00"), ("Power_Factor", "0.950")],
            ),
            row(
                kind,
                "2024-03-12",
                &[("KW_Demand", "20.00"), ("KW_Max_Demand", "50.00"), ("Power_Factor", "0.850")],
            ),
        ];
        let summary = demand_summary(&rows);
        assert_eq!(summary.avg_kw_demand, "15.00");
        assert_eq!(summary.max_kw_demand, "50.00");
        assert_eq!(summary.avg_power_factor, "0.900");
        assert_eq!(summary.peak_demand_period, "2024-03-12");
    }

    #[test]
    fn demand_summary_of_placeholders_is_all_no_data() {
        let summary = demand_summary(&placeholder_rows(ReportKind::DemandAnalysis));
        assert_eq!(summary.avg_kw_demand, NO_DATA);
        assert_eq!(summary.max_kw_demand, NO_DATA);
        assert_eq!(summary.avg_power_factor, NO_DATA);
        assert_eq!(summary.peak_demand_period, NO_DATA);
    }

    #[test]
    fn quality_summary_classifies_its_aggregates() {
        let kind = ReportKind::PowerQuality;
        let rows = vec![row(
            kind,
            "2024-03-11",
            &[
                ("Voltage_AN", "230.00"),
                ("Voltage_BN", "231.00"),
                ("Voltage_CN", "232.00"),
                ("Frequency", "50.02"),
                ("Power_Factor", "0.960"),
                ("THD_Voltage", "2.00"),
                ("THD_Current", "4.00"),
                ("Voltage_Unbalance", "0.50"),
                ("Current_Unbalance", "12.00"),
            ],
        )];
        let summary = quality_summary(&rows);
        assert_eq!(summary.avg_voltage.as_deref(), Some("231.00"));
        assert_eq!(summary.voltage_status, QualityStatus::Excellent);
        assert_eq!(summary.avg_frequency.as_deref(), Some("50.02"));
        assert_eq!(summary.frequency_status, QualityStatus::Excellent);
        assert_eq!(summary.avg_power_factor.as_deref(), Some("0.960"));
        assert_eq!(summary.power_factor_status, QualityStatus::Excellent);
        assert_eq!(summary.avg_thd.as_deref(), Some("3.00"));
        assert_eq!(summary.thd_status, QualityStatus::Excellent);
        assert_eq!(summary.voltage_unbalance_status, QualityStatus::Excellent);
        assert_eq!(summary.current_unbalance_status, QualityStatus::Warning);
        assert!(summary.has_actual_data);
    }

    #[test]
    fn quality_summary_of_placeholders_is_null_and_no_data() {
        let summary = quality_summary(&placeholder_rows(ReportKind::PowerQuality));
        assert_eq!(summary.avg_voltage, None);
        assert_eq!(summary.avg_thd, None);
        assert_eq!(summary.voltage_status, QualityStatus::NoData);
        assert_eq!(summary.current_unbalance_status, QualityStatus::NoData);
        assert!(!summary.has_actual_data);
    }

    #[test]
    fn quality_summary_serializes_with_wire_field_names() {
        let value = serde_json::to_value(quality_summary(&placeholder_rows(
            ReportKind::PowerQuality,
        )))
        .expect("serialize");
        let object = value.as_object().expect("object");
        for key in [
            "avgVoltage",
            "avgFrequency",
            "avgPowerFactor",
            "avgTHD",
            "maxVoltageUnbalance",
            "maxCurrentUnbalance",
            "voltageStatus",
            "frequencyStatus",
            "powerFactorStatus",
            "thdStatus",
            "voltageUnbalanceStatus",
            "currentUnbalanceStatus",
            "hasActualData",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object["voltageStatus"], "no-data");
    }

    #[test]
    fn demand_summary_serializes_with_wire_field_names() {
        let value = serde_json::to_value(demand_summary(&placeholder_rows(
            ReportKind::DemandAnalysis,
        )))
        .expect("serialize");
        let object = value.as_object().expect("object");
        for key in ["avgKWDemand", "maxKWDemand", "avgPowerFactor", "peakDemandPeriod"] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }
}
