//! In-memory record stores
//!
//! Stand-ins for the portal's record services, used by tests, demos, and
//! single-process deployments. Each implements one of the core ports.

pub mod identity_map;
pub mod records;

pub use identity_map::InMemoryIdentityMap;
pub use records::{InMemoryExceptionStore, InMemoryExclusionStore, InMemoryScheduleStore};
