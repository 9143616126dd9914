//! Work-schedule policy records
//!
//! Schedule, exception, and exclusion records are authored externally (by the
//! portal's record services) and are read-only inputs to the engine. The
//! policy itself is a tagged sum so that illegal states — a FIXED schedule
//! with no start time, a SHIFT with flex core hours — are unrepresentable.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_PATTERN_WINDOWS;

/// Discriminant of a schedule policy, used where only the tag matters
/// (patch layers, logging labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleKind {
    Fixed,
    Flex,
    Shift,
}

/// Type-specific schedule fields, one variant per policy type.
///
/// All times are minutes-of-day in `[0, 1439]`. A SHIFT whose end is earlier
/// than its start crosses midnight; the evaluator normalizes it by adding a
/// day to the end before any arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulePolicy {
    Fixed {
        start_time: u16,
        end_time: u16,
    },
    Flex {
        core_start: u16,
        core_end: u16,
        bandwidth_start: u16,
        bandwidth_end: u16,
        required_daily_minutes: u16,
    },
    Shift {
        shift_start: u16,
        shift_end: u16,
    },
}

impl SchedulePolicy {
    /// The tag of this policy.
    #[must_use]
    pub const fn kind(&self) -> ScheduleKind {
        match self {
            Self::Fixed { .. } => ScheduleKind::Fixed,
            Self::Flex { .. } => ScheduleKind::Flex,
            Self::Shift { .. } => ScheduleKind::Shift,
        }
    }
}

/// One required-presence window inside a weekly pattern day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternWindow {
    pub start: u16,
    pub end: u16,
}

impl PatternWindow {
    /// Window length in minutes.
    #[must_use]
    pub const fn span(&self) -> u16 {
        self.end.saturating_sub(self.start)
    }
}

/// Per-weekday override of required presence for flexible schedules:
/// up to three non-overlapping windows plus one aggregate required-minutes
/// figure for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDay {
    pub windows: Vec<PatternWindow>,
    pub required_minutes: u16,
}

impl PatternDay {
    /// Check the structural invariants: at most three windows, each with
    /// `start != end`, none overlapping.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        if self.windows.is_empty() || self.windows.len() > MAX_PATTERN_WINDOWS {
            return false;
        }
        if self.windows.iter().any(|w| w.start >= w.end) {
            return false;
        }
        let mut sorted = self.windows.clone();
        sorted.sort_by_key(|w| w.start);
        sorted.windows(2).all(|pair| pair[0].end <= pair[1].start)
    }
}

/// Recurring weekly presence pattern, keyed by ISO weekday (Monday = 1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPattern {
    pub days: BTreeMap<u8, PatternDay>,
}

impl WeeklyPattern {
    /// Pattern entry for a calendar date, if one exists for its weekday.
    #[must_use]
    pub fn day_for(&self, date: NaiveDate) -> Option<&PatternDay> {
        let weekday = date.weekday().number_from_monday() as u8;
        self.days.get(&weekday)
    }
}

/// Effective-dated work-schedule assignment for one employee.
///
/// Exactly one definition is active for any date for a given employee;
/// overlapping ranges are an invariant violation rejected at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    pub employee_id: String,
    pub policy: SchedulePolicy,
    /// Tolerance window after scheduled start before lateness accrues
    pub grace_minutes: u16,
    /// Unpaid break deducted from the required span (FIXED/SHIFT)
    pub break_minutes: u16,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weekly_pattern: Option<WeeklyPattern>,
}

impl ScheduleDefinition {
    /// Whether this definition's effective interval contains `date`.
    #[must_use]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.map_or(true, |to| to >= date)
    }

    /// Whether this definition's effective interval overlaps `other`'s.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let self_to = self.effective_to.unwrap_or(NaiveDate::MAX);
        let other_to = other.effective_to.unwrap_or(NaiveDate::MAX);
        self.effective_from <= other_to && other.effective_from <= self_to
    }
}

/// Field-level partial override of a schedule definition.
///
/// Every field is optional; set fields win over the base schedule when the
/// patch is merged, unset fields fall through. Patches are the unit of the
/// resolver's override layering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<ScheduleKind>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_time: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub core_start: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub core_end: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bandwidth_start: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bandwidth_end: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub required_daily_minutes: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shift_start: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shift_end: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub grace_minutes: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub break_minutes: Option<u16>,
}

impl SchedulePatch {
    /// True when the patch overrides nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-date override of the base schedule for one employee.
///
/// Supersedes the base schedule field-by-field for that exact date only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleException {
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub patch: SchedulePatch,
}

/// How a weekly exclusion affects the day it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExclusionMode {
    /// The whole day is excused: no lateness, no undertime.
    Excused,
    /// Lateness is waived when the qualifying first punch arrives at or
    /// before the cutoff. Undertime is never forgiven.
    IgnoreLateUntil { ignore_until_minutes: u16 },
}

/// Recurring, date-ranged waiver for a specific weekday.
///
/// At most one exclusion may be active per (employee, weekday, date);
/// overlapping ranges are rejected at write time, not by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyExclusion {
    pub employee_id: String,
    /// ISO weekday, Monday = 1
    pub weekday: u8,
    #[serde(flatten)]
    pub mode: ExclusionMode,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
}

impl WeeklyExclusion {
    /// Whether this exclusion applies to `date` (weekday match plus
    /// effective interval containment).
    #[must_use]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date.weekday().number_from_monday() as u8 == self.weekday
            && self.effective_from <= date
            && self.effective_to.map_or(true, |to| to >= date)
    }

    /// Whether this exclusion's date range and weekday collide with
    /// `other`'s. Used by stores for write-time rejection.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.weekday != other.weekday {
            return false;
        }
        let self_to = self.effective_to.unwrap_or(NaiveDate::MAX);
        let other_to = other.effective_to.unwrap_or(NaiveDate::MAX);
        self.effective_from <= other_to && other.effective_from <= self_to
    }
}

/// The single applicable schedule view for one employee-day, produced by the
/// schedule resolver and consumed by the day evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSchedule {
    pub employee_id: String,
    pub date: NaiveDate,
    pub policy: SchedulePolicy,
    pub grace_minutes: u16,
    pub break_minutes: u16,
    /// Weekly-pattern entry superseding the flex core/bandwidth for this day
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pattern_day: Option<PatternDay>,
    /// Whether a per-date exception contributed any field
    pub exception_applied: bool,
}
