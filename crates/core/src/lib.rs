//! # Rollcall Core
//!
//! Pure business logic layer of the attendance engine - no infrastructure
//! dependencies.
//!
//! This crate contains:
//! - Punch normalization and biometric token normalization
//! - Schedule resolution (exception > weekly pattern > base precedence)
//! - The day-evaluation rules engine
//! - Per-employee monthly aggregation and batch evaluation
//! - Port/adapter interfaces (traits) for the portal's record stores
//!
//! ## Architecture Principles
//! - Only depends on `rollcall-domain`
//! - No database, HTTP, or platform code
//! - All external collaborators via traits
//! - Pure, testable business logic

pub mod batch;
pub mod evaluation;
pub mod identity;
pub mod punch;
pub mod schedule;
pub mod summary;

// Re-export specific items to avoid ambiguity
pub use batch::{AttendanceService, DayOutcome, MonthlyPunchSheet};
pub use evaluation::evaluate_day;
pub use identity::ports::IdentityMapStore;
pub use identity::{normalize_token, TokenResolver};
pub use punch::{normalize_punches, parse_time_of_day, punch_events};
pub use schedule::ports::{ExceptionStore, ExclusionStore, ScheduleStore};
pub use schedule::{ScheduleCache, ScheduleResolver};
pub use summary::summarize_month;
