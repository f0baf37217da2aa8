use chrono::{DateTime, NaiveDate, Utc};

use super::catalog::ReportKind;
use super::period::Cadence;

/// Marker rendered for cells with no aggregate. Also the value every field
/// takes in synthesized placeholder rows.
pub const NO_DATA: &str = "N/A";

/// Device directory fallback when the resolved entity carries no name or the
/// device is unknown.
pub const UNKNOWN_DEVICE: &str = "Unknown Device";

/// One coerced telemetry sample, already attributed to a catalog column.
/// The entity is fixed per request, so rows carry only the column index
/// into the report's catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub column: usize,
    pub at: DateTime<Utc>,
    pub value: f64,
}

/// One formatted report period: the ISO period label plus one string per
/// catalog column, in catalog order. Serializes as a flat JSON object with
/// `period` first so every surface shows the same column sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub period: String,
    pub fields: Vec<(&'static str, String)>,
}

impl ReportRow {
    /// Field at the catalog index parsed back to a number; `N/A` and
    /// anything unparseable read as absent.
    pub fn numeric(&self, index: usize) -> Option<f64> {
        let (_, value) = self.fields.get(index)?;
        if value == NO_DATA {
            return None;
        }
        value.parse::<f64>().ok()
    }

    pub fn is_placeholder(&self) -> bool {
        self.fields.iter().all(|(_, value)| value == NO_DATA)
    }
}

impl serde::Serialize for ReportRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1 + self.fields.len()))?;
        map.serialize_entry("period", &self.period)?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'s> utoipa::ToSchema<'s> for ReportRow {
    fn schema() -> (
        &'s str,
        utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>,
    ) {
        (
            "ReportRow",
            utoipa::openapi::ObjectBuilder::new()
                .description(Some(
                    "Flat object: `period` (YYYY-MM-DD) plus one formatted string per \
                     report column, in catalog order; absent aggregates render as \"N/A\".",
                ))
                .property(
                    "period",
                    utoipa::openapi::ObjectBuilder::new()
                        .schema_type(utoipa::openapi::SchemaType::String),
                )
                .required("period")
                .additional_properties(Some(
                    utoipa::openapi::schema::AdditionalProperties::FreeForm(true),
                ))
                .into(),
        )
    }
}

/// Fully materialized outcome of one engine run. Everything downstream
/// (JSON, HTML, CSV, summaries) reads from this value; nothing re-fetches.
#[derive(Debug, Clone)]
pub struct ReportResult {
    pub kind: ReportKind,
    pub cadence: Cadence,
    pub device_id: String,
    pub device_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rows: Vec<ReportRow>,
    pub has_data: bool,
}

/// True iff any cell in any row holds a real value.
pub fn has_real_data(rows: &[ReportRow]) -> bool {
    rows.iter().any(|row| !row.is_placeholder())
}
