//! Shared test support utilities

pub mod stores;

pub use stores::{MockExceptionStore, MockExclusionStore, MockScheduleStore};
