use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};

/// Period granularity selected by the caller. Periods are half-open
/// `[start, start + cadence)` intervals whose boundaries come from calendar
/// rules alone: day midnight, ISO week start (Monday), first of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
}

impl Cadence {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Capitalized form shown in report headers.
    pub fn title(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

/// Truncates a timestamp to the start date of its containing period.
pub fn bucket_date(ts: DateTime<Utc>, cadence: Cadence) -> NaiveDate {
    let date = ts.date_naive();
    match cadence {
        Cadence::Daily => date,
        Cadence::Weekly => {
            date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
        }
        Cadence::Monthly => date.with_day(1).unwrap_or(date),
    }
}

/// First period start on or after `date` when stepping at the cadence.
pub fn next_period(date: NaiveDate, cadence: Cadence) -> NaiveDate {
    match cadence {
        Cadence::Daily => date + Duration::days(1),
        Cadence::Weekly => date + Duration::days(7),
        Cadence::Monthly => date
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX),
    }
}

/// All period anchors from `start` to `end` inclusive, stepped at the
/// cadence. The anchors follow the requested start date as given, matching
/// the placeholder rows callers receive for empty ranges.
pub fn enumerate_periods(start: NaiveDate, end: NaiveDate, cadence: Cadence) -> Vec<NaiveDate> {
    let mut periods = Vec::new();
    let mut current = start;
    while current <= end {
        periods.push(current);
        current = next_period(current, cadence);
    }
    periods
}

pub fn label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// UTC instants covering the inclusive calendar-date request as a half-open
/// range: `[start 00:00, end + 1 day 00:00)`.
pub fn range_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let exclusive_end = end + Duration::days(1);
    (start_of_day(start), start_of_day(exclusive_end))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}
