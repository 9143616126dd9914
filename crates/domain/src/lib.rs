//! # Rollcall Domain
//!
//! Business domain types and models for the Rollcall attendance engine.
//!
//! This crate contains:
//! - Schedule, exception, and exclusion record types
//! - Evaluation output types (day evaluations, monthly summaries)
//! - Domain error types and Result definitions
//! - Engine configuration and domain constants
//!
//! ## Architecture
//! - No dependencies on other Rollcall crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
