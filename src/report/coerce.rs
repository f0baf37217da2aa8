use super::store::TelemetryRow;

/// Collapses the three typed storage columns of a telemetry row into one
/// numeric reading. Precedence is float column, then integer column, then
/// string column. A string only counts when it is a plain decimal literal;
/// anything else (empty, units, labels, exponent forms) yields `None` and
/// the sample drops out of aggregation entirely.
pub fn coerce_value(row: &TelemetryRow) -> Option<f64> {
    if let Some(v) = row.dbl_v {
        return finite(v);
    }
    if let Some(v) = row.long_v {
        return finite(v as f64);
    }
    let raw = row.str_v.as_deref()?.trim();
    if !is_numeric_literal(raw) {
        return None;
    }
    raw.parse::<f64>().ok().and_then(finite)
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// `^[+-]?[0-9]+\.?[0-9]*$` without the regex machinery: optional sign,
/// at least one integer digit, optional dot, optional fraction digits.
fn is_numeric_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(|c| c == '+' || c == '-').unwrap_or(raw);
    let (integer, fraction) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match fraction {
        Some(f) => f.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}
