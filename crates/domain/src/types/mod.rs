//! Domain types and models

pub mod evaluation;
pub mod schedule;

pub use evaluation::{
    DayEvaluation, DayStatus, EmployeeMonthSummary, PunchEvent, WindowPresence,
};
pub use schedule::{
    ExclusionMode, PatternDay, PatternWindow, ResolvedSchedule, ScheduleDefinition,
    ScheduleException, ScheduleKind, SchedulePatch, SchedulePolicy, WeeklyExclusion,
    WeeklyPattern,
};
