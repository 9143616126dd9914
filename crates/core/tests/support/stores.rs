//! Mock store implementations for testing
//!
//! Provides in-memory mocks for the core record-store ports, enabling
//! deterministic integration tests without the portal's services. A mock can
//! also be armed to fail, for exercising collaborator-error reporting.

use async_trait::async_trait;
use chrono::NaiveDate;
use rollcall_core::{ExceptionStore, ExclusionStore, ScheduleStore};
use rollcall_domain::{
    Result, RollcallError, ScheduleDefinition, ScheduleException, WeeklyExclusion,
};

/// In-memory mock for `ScheduleStore`.
#[derive(Default)]
pub struct MockScheduleStore {
    definitions: Vec<ScheduleDefinition>,
    fail: bool,
}

impl MockScheduleStore {
    pub fn new(definitions: Vec<ScheduleDefinition>) -> Self {
        Self { definitions, fail: false }
    }

    /// Make every lookup fail with a collaborator error.
    pub fn failing() -> Self {
        Self { definitions: Vec::new(), fail: true }
    }
}

#[async_trait]
impl ScheduleStore for MockScheduleStore {
    async fn active_definitions(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleDefinition>> {
        if self.fail {
            return Err(RollcallError::Collaborator("schedule service unavailable".into()));
        }
        Ok(self
            .definitions
            .iter()
            .filter(|d| d.employee_id == employee_id && d.is_active_on(date))
            .cloned()
            .collect())
    }
}

/// In-memory mock for `ExceptionStore`.
#[derive(Default)]
pub struct MockExceptionStore {
    exceptions: Vec<ScheduleException>,
}

impl MockExceptionStore {
    pub fn new(exceptions: Vec<ScheduleException>) -> Self {
        Self { exceptions }
    }
}

#[async_trait]
impl ExceptionStore for MockExceptionStore {
    async fn exception_for(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<ScheduleException>> {
        Ok(self
            .exceptions
            .iter()
            .find(|e| e.employee_id == employee_id && e.date == date)
            .cloned())
    }
}

/// In-memory mock for `ExclusionStore`.
#[derive(Default)]
pub struct MockExclusionStore {
    exclusions: Vec<WeeklyExclusion>,
}

impl MockExclusionStore {
    pub fn new(exclusions: Vec<WeeklyExclusion>) -> Self {
        Self { exclusions }
    }
}

#[async_trait]
impl ExclusionStore for MockExclusionStore {
    async fn exclusion_for(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<WeeklyExclusion>> {
        Ok(self
            .exclusions
            .iter()
            .find(|e| e.employee_id == employee_id && e.is_active_on(date))
            .cloned())
    }
}
