//! Day evaluation rules engine

pub mod evaluator;

pub use evaluator::{evaluate_day, validate_policy};
