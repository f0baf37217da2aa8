/// How one metric's observations within a period collapse to a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStrategy {
    /// Arithmetic mean of the group.
    Mean,
    /// Largest value in the group.
    Max,
    /// Value with the greatest timestamp; earlier-seen wins a timestamp tie.
    Latest,
    /// Sum of per-interval increments.
    DeltaSum,
}

/// One pivot column: the key name under which the store files the metric,
/// the display column it becomes, the reduction strategy, and the number of
/// decimal places used when formatting.
#[derive(Debug, Clone, Copy)]
pub struct MetricColumn {
    pub key: &'static str,
    pub column: &'static str,
    pub strategy: AggregationStrategy,
    pub decimals: usize,
}

const fn col(
    key: &'static str,
    column: &'static str,
    strategy: AggregationStrategy,
    decimals: usize,
) -> MetricColumn {
    MetricColumn {
        key,
        column,
        strategy,
        decimals,
    }
}

/// The three report families served by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    EnergyConsumption,
    DemandAnalysis,
    PowerQuality,
}

use AggregationStrategy::{DeltaSum, Latest, Max, Mean};

/// Cumulative register snapshots plus per-interval increments. Registers
/// report the last reading of the period; deltas sum across it.
const ENERGY_COLUMNS: &[MetricColumn] = &[
    col("KWH_Import", "KWH_Import", Latest, 2),
    col("KVAH_Total", "KVAH_Total", Latest, 2),
    col("KVARH_Import", "KVARH_Import", Latest, 2),
    col("delta_kWh", "delta_kWh", DeltaSum, 2),
    col("delta_kVAh", "delta_kVAh", DeltaSum, 2),
    col("delta_kVArh", "delta_kVArh", DeltaSum, 2),
];

const DEMAND_COLUMNS: &[MetricColumn] = &[
    col("KW_Demand", "KW_Demand", Mean, 2),
    col("KVA_Demand", "KVA_Demand", Mean, 2),
    col("KVAR_Demand", "KVAR_Demand", Mean, 2),
    col("maxD_KW", "KW_Max_Demand", Max, 2),
    col("maxD_kVA", "KVA_Max_Demand", Max, 2),
    col("maxD_kVAr", "KVAR_Max_Demand", Max, 2),
    col("PF_Total", "Power_Factor", Mean, 3),
    col("Frequency", "Frequency", Mean, 2),
    col("I_L1", "Current_A", Mean, 2),
    col("I_L2", "Current_B", Mean, 2),
    col("I_L3", "Current_C", Mean, 2),
    col("V_L1_L2", "Voltage_AN", Mean, 2),
    col("V_L2_L3", "Voltage_BN", Mean, 2),
    col("V_L3_L1", "Voltage_CN", Mean, 2),
];

const POWER_QUALITY_COLUMNS: &[MetricColumn] = &[
    col("V_L1_L2", "Voltage_AN", Mean, 2),
    col("V_L2_L3", "Voltage_BN", Mean, 2),
    col("V_L3_L1", "Voltage_CN", Mean, 2),
    col("I_L1", "Current_A", Mean, 2),
    col("I_L2", "Current_B", Mean, 2),
    col("I_L3", "Current_C", Mean, 2),
    col("Frequency", "Frequency", Mean, 2),
    col("PF_Total", "Power_Factor", Mean, 3),
    col("THD_V1", "THD_Voltage", Mean, 2),
    col("THD_I1", "THD_Current", Mean, 2),
    col("Voltage_Unbalance", "Voltage_Unbalance", Mean, 2),
    col("Current_Unbalance", "Current_Unbalance", Mean, 2),
];

impl ReportKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "energy_consumption" => Some(Self::EnergyConsumption),
            "demand_analysis" => Some(Self::DemandAnalysis),
            "power_quality" => Some(Self::PowerQuality),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnergyConsumption => "energy_consumption",
            Self::DemandAnalysis => "demand_analysis",
            Self::PowerQuality => "power_quality",
        }
    }

    /// Columns in the order they appear in every output surface.
    pub fn columns(self) -> &'static [MetricColumn] {
        match self {
            Self::EnergyConsumption => ENERGY_COLUMNS,
            Self::DemandAnalysis => DEMAND_COLUMNS,
            Self::PowerQuality => POWER_QUALITY_COLUMNS,
        }
    }

    /// Store key names the fetch resolves against the dictionary.
    pub fn key_names(self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.key).collect()
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::EnergyConsumption => "Energy Consumption Report",
            Self::DemandAnalysis => "Demand Analysis Report",
            Self::PowerQuality => "Power Quality Report",
        }
    }
}

/// Index of a display column within the catalog, used when summaries pull
/// a specific field back out of formatted rows.
pub fn column_index(kind: ReportKind, column: &str) -> Option<usize> {
    kind.columns().iter().position(|c| c.column == column)
}
