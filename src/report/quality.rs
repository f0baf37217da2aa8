/// Classification bucket for a power-quality aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QualityStatus {
    Excellent,
    Good,
    Warning,
    Critical,
    NoData,
}

impl QualityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::NoData => "no-data",
        }
    }
}

/// Inclusive [min, max] bands checked best-first. Values between two bands
/// (the tables deliberately leave small holes) classify as critical.
#[derive(Debug, Clone, Copy)]
pub struct QualityBands {
    pub excellent: (f64, f64),
    pub good: (f64, f64),
    pub warning: (f64, f64),
}

pub const VOLTAGE: QualityBands = QualityBands {
    excellent: (220.0, 240.0),
    good: (210.0, 250.0),
    warning: (200.0, 260.0),
};

pub const FREQUENCY: QualityBands = QualityBands {
    excellent: (49.9, 50.1),
    good: (49.5, 50.5),
    warning: (49.0, 51.0),
};

pub const POWER_FACTOR: QualityBands = QualityBands {
    excellent: (0.95, 1.0),
    good: (0.85, 0.94),
    warning: (0.7, 0.84),
};

pub const THD: QualityBands = QualityBands {
    excellent: (0.0, 3.0),
    good: (3.1, 5.0),
    warning: (5.1, 8.0),
};

pub const VOLTAGE_UNBALANCE: QualityBands = QualityBands {
    excellent: (0.0, 1.0),
    good: (1.1, 2.0),
    warning: (2.1, 3.0),
};

pub const CURRENT_UNBALANCE: QualityBands = QualityBands {
    excellent: (0.0, 5.0),
    good: (5.1, 10.0),
    warning: (10.1, 15.0),
};

pub fn classify(value: Option<f64>, bands: &QualityBands) -> QualityStatus {
    let Some(value) = value else {
        return QualityStatus::NoData;
    };
    if value.is_nan() {
        return QualityStatus::NoData;
    }
    if within(value, bands.excellent) {
        QualityStatus::Excellent
    } else if within(value, bands.good) {
        QualityStatus::Good
    } else if within(value, bands.warning) {
        QualityStatus::Warning
    } else {
        QualityStatus::Critical
    }
}

fn within(value: f64, (min, max): (f64, f64)) -> bool {
    min <= value && value <= max
}
