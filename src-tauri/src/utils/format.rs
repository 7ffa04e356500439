//! Display helpers for durations and wall-clock stamps.

use chrono::{DateTime, TimeZone};

/// `MM:SS`, or `H:MM:SS` once an hour has passed. Negative totals (possible
/// for tag searches) keep their sign in front of the absolute value.
pub fn format_duration(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let total = secs.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{sign}{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{minutes:02}:{seconds:02}")
    }
}

/// 12-hour clock with zero-padded hour, e.g. `03:07 PM`.
pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%I:%M %p").to_string()
}

/// Compact elapsed label for note cards: `45s`, `2m 5s`.
pub fn format_elapsed_short(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
