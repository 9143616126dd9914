//! Batch evaluation of a roster over a month

pub mod service;

pub use service::{AttendanceService, DayOutcome, MonthlyPunchSheet};
