//! Punch time normalizer
//!
//! Converts the raw time-of-day strings a biometric device reports for one
//! employee-day into canonical minute-of-day values: parsed, sorted,
//! deduplicated. Malformed or out-of-range entries are dropped rather than
//! failing the whole call; a device that produced one garbage row must not
//! invalidate the rest of the day.

use chrono::NaiveDate;
use rollcall_domain::constants::MAX_MINUTE_OF_DAY;
use rollcall_domain::PunchEvent;
use tracing::debug;

/// Parse a time-of-day string into a minute-of-day value.
///
/// Accepts `HH:MM` and `HH:MM:SS`; seconds are truncated. Returns `None` for
/// anything malformed or outside `[0, 1439]`.
///
/// # Examples
///
/// ```
/// use rollcall_core::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("08:05"), Some(485));
/// assert_eq!(parse_time_of_day("17:00:42"), Some(1020));
/// assert_eq!(parse_time_of_day("24:00"), None);
/// assert_eq!(parse_time_of_day("late"), None);
/// ```
#[must_use]
pub fn parse_time_of_day(raw: &str) -> Option<u16> {
    let mut parts = raw.trim().split(':');
    let hours: u16 = parts.next()?.parse().ok()?;
    let minutes_part = parts.next()?;
    // Reject "8:5"-style fragments and anything with stray content
    if minutes_part.len() != 2 {
        return None;
    }
    let minutes: u16 = minutes_part.parse().ok()?;
    match parts.next() {
        None => {}
        Some(seconds) if seconds.len() == 2 && seconds.parse::<u16>().map_or(false, |s| s < 60) => {}
        Some(_) => return None,
    }
    if parts.next().is_some() || minutes >= 60 {
        return None;
    }
    let minute_of_day = hours.checked_mul(60)?.checked_add(minutes)?;
    (minute_of_day <= MAX_MINUTE_OF_DAY).then_some(minute_of_day)
}

/// Normalize an unordered batch of raw punch strings into a sorted,
/// deduplicated sequence of minute-of-day values.
///
/// Unparseable entries are discarded silently (logged at `debug`). An empty
/// result means no punches were recorded and drives the day toward ABSENT.
#[must_use]
pub fn normalize_punches<S: AsRef<str>>(raw_times: &[S]) -> Vec<u16> {
    let mut minutes: Vec<u16> = raw_times
        .iter()
        .filter_map(|raw| {
            let parsed = parse_time_of_day(raw.as_ref());
            if parsed.is_none() {
                debug!(raw = raw.as_ref(), "dropping unparseable punch");
            }
            parsed
        })
        .collect();
    minutes.sort_unstable();
    minutes.dedup();
    minutes
}

/// Lift normalized punch minutes into ephemeral [`PunchEvent`] values for one
/// employee-day. Convenience for callers that report punches downstream.
#[must_use]
pub fn punch_events<S: AsRef<str>>(
    employee_id: &str,
    date: NaiveDate,
    raw_times: &[S],
) -> Vec<PunchEvent> {
    normalize_punches(raw_times)
        .into_iter()
        .map(|minute_of_day| PunchEvent {
            employee_id: employee_id.to_string(),
            date,
            minute_of_day,
        })
        .collect()
}
