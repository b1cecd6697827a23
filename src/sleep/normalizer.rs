//! Sleep Series Normalizer
//!
//! Turns logged sleep sessions into a chart series where bedtime and wake
//! time share one calendar-day axis.

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer};

/// Minutes in one day
pub const MINUTES_PER_DAY: i32 = 24 * 60;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// A logged sleep session as returned by `GET /api/sessions`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SleepSession {
    #[serde(deserialize_with = "deserialize_instant")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_instant")]
    pub end: DateTime<Utc>,
}

impl SleepSession {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// One column of the sleep chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    /// Wake day as `month/day`
    pub label: String,
    /// Bedtime minute-of-day; negative when it belongs to the previous day
    pub bed_minutes_adjusted: i32,
    /// Wake minute-of-day in `[0, 1440)`
    pub wake_minutes: u32,
    /// Elapsed hours, one decimal, never negative
    pub duration_hours: f64,
}

/// Normalize sessions using the browser's local time zone.
pub fn normalize(sessions: &[SleepSession]) -> Vec<ChartPoint> {
    normalize_in(sessions, &Local)
}

/// Normalize sessions with clock-of-day values read in `tz`.
///
/// The backend lists sessions newest-first; the output is always old→new.
/// The input is reversed before a stable sort on `start`, so sessions sharing
/// a start instant keep the backend's creation order.
pub fn normalize_in<Tz: TimeZone>(sessions: &[SleepSession], tz: &Tz) -> Vec<ChartPoint> {
    let mut ordered: Vec<&SleepSession> = sessions.iter().rev().collect();
    ordered.sort_by_key(|session| session.start);

    ordered
        .into_iter()
        .map(|session| chart_point(session, tz))
        .collect()
}

fn chart_point<Tz: TimeZone>(session: &SleepSession, tz: &Tz) -> ChartPoint {
    let start = session.start.with_timezone(tz);
    let end = session.end.with_timezone(tz);

    let start_minutes = minute_of_day(&start) as i32;
    let end_minutes = minute_of_day(&end);

    // Bedtime later on the clock than wake time means it happened the day before
    let bed_minutes_adjusted = if start_minutes > end_minutes as i32 {
        start_minutes - MINUTES_PER_DAY
    } else {
        start_minutes
    };

    ChartPoint {
        label: format!("{}/{}", end.month(), end.day()),
        bed_minutes_adjusted,
        wake_minutes: end_minutes,
        duration_hours: elapsed_hours(session),
    }
}

fn minute_of_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.hour() * 60 + instant.minute()
}

fn elapsed_hours(session: &SleepSession) -> f64 {
    let hours = (session.end - session.start).num_milliseconds() as f64 / MILLIS_PER_HOUR;
    let rounded = (hours * 10.0).round() / 10.0;
    if rounded > 0.0 {
        rounded
    } else {
        0.0
    }
}

/// Format a chart minute value as `HH:MM`, prefixing prior-day values with `(-1) `.
pub fn format_clock(minutes: i32) -> String {
    let (minutes, prefix) = if minutes < 0 {
        (minutes + MINUTES_PER_DAY, "(-1) ")
    } else {
        (minutes, "")
    };
    format!("{}{:02}:{:02}", prefix, minutes / 60, minutes % 60)
}

/// Parse a backend timestamp.
///
/// RFC 3339 values carry their own offset. Naive values (no offset) are read
/// as browser-local wall time, the same way `new Date(iso)` does.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn deserialize_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_instant(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}
