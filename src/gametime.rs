use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::Los_Angeles;

use crate::error::WatchError;
use crate::model::WatchTarget;

/// Page time format once the weekday is dropped and the year prepended,
/// e.g. "2025 June 21 10:00am".
const TIME_FORMAT: &str = "%Y %B %d %I:%M%p";

/// Parse a card header time such as "Sat, June 21 10:00am".
///
/// The page never prints a year, so the caller supplies one. The time is
/// read as America/Los_Angeles wall-clock time and returned as an instant.
/// The weekday is ignored; the date and clock fields decide.
pub fn parse_game_time(input: &str, year: i32) -> Result<DateTime<Utc>, WatchError> {
    let err = |reason: &str| WatchError::TimeParse { input: input.to_string(), reason: reason.to_string() };

    let trimmed = input.trim();
    let without_weekday = match trimmed.split_once(',') {
        Some((weekday, rest)) if weekday.chars().all(|c| c.is_ascii_alphabetic()) => rest,
        _ => trimmed,
    };
    let normalized = without_weekday.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Err(err("empty time"));
    }

    let naive = NaiveDateTime::parse_from_str(&format!("{} {}", year, normalized), TIME_FORMAT)
        .map_err(|e| err(&e.to_string()))?;

    // earliest() picks the first occurrence of a wall time repeated by a DST fall-back
    Los_Angeles
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| err("time does not exist in America/Los_Angeles"))
}

/// Year to assume for page times when matching `target`.
pub fn year_for(target: &WatchTarget, season_year: i32) -> i32 {
    target.local_date_time().map(|dt| dt.year()).unwrap_or(season_year)
}
