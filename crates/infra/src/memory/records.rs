//! In-memory schedule, exception, and exclusion stores
//!
//! The write paths enforce the invariants the spec pins to write time: one
//! employee's schedule ranges must not overlap, and at most one weekly
//! exclusion may cover a given (employee, weekday, date).

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use rollcall_core::{ExceptionStore, ExclusionStore, ScheduleStore};
use rollcall_domain::constants::{MAX_WEEKDAY, MIN_WEEKDAY};
use rollcall_domain::{
    Result, RollcallError, ScheduleDefinition, ScheduleException, WeeklyExclusion,
};

/// In-memory `ScheduleStore`, keyed by employee.
#[derive(Default)]
pub struct InMemoryScheduleStore {
    definitions: DashMap<String, Vec<ScheduleDefinition>>,
}

impl InMemoryScheduleStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, rejecting overlap with the employee's existing
    /// effective ranges.
    pub fn put(&self, definition: ScheduleDefinition) -> Result<()> {
        let mut entry = self.definitions.entry(definition.employee_id.clone()).or_default();
        if let Some(existing) = entry.iter().find(|d| d.overlaps(&definition)) {
            return Err(RollcallError::Validation(format!(
                "schedule range starting {} overlaps existing range starting {}",
                definition.effective_from, existing.effective_from
            )));
        }
        entry.push(definition);
        Ok(())
    }

    /// Remove every definition for an employee.
    pub fn remove_employee(&self, employee_id: &str) {
        self.definitions.remove(employee_id);
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn active_definitions(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleDefinition>> {
        Ok(self
            .definitions
            .get(employee_id)
            .map(|defs| defs.iter().filter(|d| d.is_active_on(date)).cloned().collect())
            .unwrap_or_default())
    }
}

/// In-memory `ExceptionStore`, keyed by employee-date.
#[derive(Default)]
pub struct InMemoryExceptionStore {
    exceptions: DashMap<(String, NaiveDate), ScheduleException>,
}

impl InMemoryExceptionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the exception for an employee-date.
    pub fn put(&self, exception: ScheduleException) {
        self.exceptions
            .insert((exception.employee_id.clone(), exception.date), exception);
    }

    /// Remove the exception for an employee-date.
    pub fn remove(&self, employee_id: &str, date: NaiveDate) {
        self.exceptions.remove(&(employee_id.to_string(), date));
    }
}

#[async_trait]
impl ExceptionStore for InMemoryExceptionStore {
    async fn exception_for(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<ScheduleException>> {
        Ok(self
            .exceptions
            .get(&(employee_id.to_string(), date))
            .map(|entry| entry.value().clone()))
    }
}

/// In-memory `ExclusionStore`, keyed by employee.
#[derive(Default)]
pub struct InMemoryExclusionStore {
    exclusions: DashMap<String, Vec<WeeklyExclusion>>,
}

impl InMemoryExclusionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exclusion, rejecting an out-of-range weekday or overlap on the
    /// same weekday and range.
    pub fn put(&self, exclusion: WeeklyExclusion) -> Result<()> {
        if !(MIN_WEEKDAY..=MAX_WEEKDAY).contains(&exclusion.weekday) {
            return Err(RollcallError::Validation(format!(
                "weekday {} outside ISO range 1-7",
                exclusion.weekday
            )));
        }
        let mut entry = self.exclusions.entry(exclusion.employee_id.clone()).or_default();
        if entry.iter().any(|e| e.overlaps(&exclusion)) {
            return Err(RollcallError::Validation(format!(
                "weekly exclusion for weekday {} overlaps an existing one",
                exclusion.weekday
            )));
        }
        entry.push(exclusion);
        Ok(())
    }
}

#[async_trait]
impl ExclusionStore for InMemoryExclusionStore {
    async fn exclusion_for(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<WeeklyExclusion>> {
        Ok(self
            .exclusions
            .get(employee_id)
            .and_then(|list| list.iter().find(|e| e.is_active_on(date)).cloned()))
    }
}
