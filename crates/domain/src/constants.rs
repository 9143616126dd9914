//! Domain-level constants
//!
//! Centralized location for all domain-level constants used throughout the
//! attendance engine.

// Time arithmetic
pub const MINUTES_PER_DAY: u16 = 1440;
pub const MAX_MINUTE_OF_DAY: u16 = 1439;

// Weekly pattern limits
pub const MAX_PATTERN_WINDOWS: usize = 3;

// Biometric token normalization
pub const DEFAULT_TOKEN_PAD_WIDTH: usize = 6;

// Batch evaluation
pub const DEFAULT_BATCH_CONCURRENCY: usize = 8;

// Weekday range (ISO, Monday = 1)
pub const MIN_WEEKDAY: u8 = 1;
pub const MAX_WEEKDAY: u8 = 7;
