//! Error types used throughout the attendance engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Rollcall
///
/// The three failure families map onto the engine's recovery policy:
/// validation errors are recovered locally (drop the punch, fail the day),
/// resolution errors (`NoScheduleForDate`, `InvalidSchedule`) are surfaced
/// per-day while the batch continues, and collaborator errors propagate to
/// the caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum RollcallError {
    #[error("No schedule for date: {0}")]
    NoScheduleForDate(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Rollcall operations
pub type Result<T> = std::result::Result<T, RollcallError>;

/// Convert a `RollcallError` into a stable label suitable for logging.
#[inline]
#[must_use]
pub fn error_label(error: &RollcallError) -> &'static str {
    match error {
        RollcallError::NoScheduleForDate(_) => "no_schedule_for_date",
        RollcallError::InvalidSchedule(_) => "invalid_schedule",
        RollcallError::Validation(_) => "validation",
        RollcallError::Collaborator(_) => "collaborator",
        RollcallError::Config(_) => "config",
        RollcallError::Internal(_) => "internal",
    }
}
