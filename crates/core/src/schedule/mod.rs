//! Schedule resolution
//!
//! Picks the single applicable schedule view for an employee-day from the
//! base definition, weekly pattern, and per-date exception.

pub mod cache;
pub mod layers;
pub mod ports;
pub mod resolver;

pub use cache::ScheduleCache;
pub use layers::ScheduleFields;
pub use resolver::ScheduleResolver;
