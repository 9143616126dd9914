//! Evaluation output types
//!
//! Day evaluations and monthly summaries are recomputed on demand and never
//! cached by the engine itself. They serialize in camelCase because the
//! portal's downstream consumers read them verbatim.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single normalized clock-in/out punch. Ephemeral: derived per call from
/// raw device strings, never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchEvent {
    pub employee_id: String,
    pub date: NaiveDate,
    /// Minute of day in `[0, 1439]`
    pub minute_of_day: u16,
}

/// Daily attendance classification.
///
/// `LateAndUndertime` is a display label derived from the two independent
/// boolean facts on [`DayEvaluation`]; the booleans are authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    Present,
    Late,
    Undertime,
    LateAndUndertime,
    Absent,
    Excused,
}

impl DayStatus {
    /// Derive the display status from the independent lateness/undertime
    /// flags for a day with punches.
    #[must_use]
    pub const fn from_flags(is_late: bool, is_undertime: bool) -> Self {
        match (is_late, is_undertime) {
            (true, true) => Self::LateAndUndertime,
            (true, false) => Self::Late,
            (false, true) => Self::Undertime,
            (false, false) => Self::Present,
        }
    }
}

/// Presence observability for one weekly-pattern window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPresence {
    pub start: u16,
    pub end: u16,
    pub attended: bool,
    pub late_minutes: u32,
}

/// Result of evaluating one employee-day.
///
/// All minute quantities are non-negative; intermediates are computed
/// unfloored and only these reported values are floored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEvaluation {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: DayStatus,
    pub is_late: bool,
    pub is_undertime: bool,
    pub worked_minutes: u32,
    pub late_minutes: u32,
    pub undertime_minutes: u32,
    pub required_minutes: u32,
    /// Scheduled start of the day, minute-of-day. For a midnight-crossing
    /// shift the end is the normalized value and may exceed 1439.
    pub schedule_start: u16,
    pub schedule_end: u16,
    pub weekly_pattern_applied: bool,
    pub weekly_exclusion_applied: bool,
    /// Per-window presence flags, populated only for pattern days
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub window_presence: Vec<WindowPresence>,
}

/// Per-employee totals folded from one month of day evaluations.
///
/// `late_days` and `undertime_days` count the independent flags, so a
/// LATE_AND_UNDERTIME day increments both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeMonthSummary {
    pub employee_id: String,
    pub days_evaluated: u32,
    pub present_days: u32,
    pub late_days: u32,
    pub undertime_days: u32,
    pub absent_days: u32,
    pub excused_days: u32,
    pub worked_minutes: u64,
    pub late_minutes: u64,
    pub undertime_minutes: u64,
    pub pattern_days: u32,
    pub exclusion_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_flags_keeps_both_facts() {
        assert_eq!(DayStatus::from_flags(false, false), DayStatus::Present);
        assert_eq!(DayStatus::from_flags(true, false), DayStatus::Late);
        assert_eq!(DayStatus::from_flags(false, true), DayStatus::Undertime);
        assert_eq!(DayStatus::from_flags(true, true), DayStatus::LateAndUndertime);
    }

    #[test]
    fn day_evaluation_serializes_camel_case() {
        let eval = DayEvaluation {
            employee_id: "E-1".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date"),
            status: DayStatus::Present,
            is_late: false,
            is_undertime: false,
            worked_minutes: 535,
            late_minutes: 0,
            undertime_minutes: 0,
            required_minutes: 480,
            schedule_start: 480,
            schedule_end: 1020,
            weekly_pattern_applied: false,
            weekly_exclusion_applied: false,
            window_presence: Vec::new(),
        };
        let json = serde_json::to_value(&eval).expect("serializes");
        assert_eq!(json["status"], "PRESENT");
        assert_eq!(json["isLate"], false);
        assert_eq!(json["workedMinutes"], 535);
        assert_eq!(json["requiredMinutes"], 480);
        // Empty window presence is elided entirely
        assert!(json.get("windowPresence").is_none());
    }
}
