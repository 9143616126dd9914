//! Raw punch normalization

pub mod normalizer;

pub use normalizer::{normalize_punches, parse_time_of_day, punch_events};
