//! # Rollcall Infra
//!
//! Adapter layer of the attendance engine.
//!
//! This crate contains:
//! - In-memory implementations of the core record-store ports, standing in
//!   for the portal's schedule/exception/exclusion services and the
//!   identity-map store
//! - The configuration loader (environment-first, file fallback)
//! - Tracing initialisation
//!
//! The in-memory stores enforce the write-time invariants the engine itself
//! deliberately does not: overlapping schedule ranges and overlapping weekly
//! exclusions are rejected on `put`.

pub mod config;
pub mod memory;
pub mod observability;

pub use config::loader;
pub use memory::{
    InMemoryExceptionStore, InMemoryExclusionStore, InMemoryIdentityMap, InMemoryScheduleStore,
};
pub use observability::init_tracing;
