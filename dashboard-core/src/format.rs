//! Display helpers shared by every renderer.

use chrono::{NaiveDateTime, Timelike};

/// Shown in place of a missing reading.
pub const PLACEHOLDER: &str = "—";

/// Shown in place of a missing or unparseable time.
pub const TIME_PLACEHOLDER: &str = "--";

/// Format an optional reading with a fixed number of decimals.
pub fn reading(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Format a local ISO timestamp (`2025-11-20T06:41`) as `6:41 AM`.
pub fn clock_time(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|s| !s.is_empty()) else {
        return TIME_PLACEHOLDER.to_string();
    };

    match parse_local(raw) {
        Some(dt) => {
            let (pm, hour) = dt.hour12();
            let suffix = if pm { "PM" } else { "AM" };
            format!("{hour}:{:02} {suffix}", dt.minute())
        }
        None => TIME_PLACEHOLDER.to_string(),
    }
}

fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
