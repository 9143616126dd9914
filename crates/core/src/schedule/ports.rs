//! Port interfaces for the portal's policy-record stores
//!
//! Schedule, exception, and exclusion records are authored elsewhere in the
//! portal; the engine only reads them. Lookups may be latent or failing -
//! collaborator errors propagate to the caller untouched, and the engine
//! holds no transactional state to roll back.

use async_trait::async_trait;
use chrono::NaiveDate;
use rollcall_domain::{Result, ScheduleDefinition, ScheduleException, WeeklyExclusion};

/// Read access to effective-dated schedule definitions.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// All definitions whose effective interval nominally contains `date`.
    ///
    /// Under the no-overlap invariant this is zero or one record; the
    /// resolver tie-breaks defect data on latest `effective_from`.
    async fn active_definitions(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleDefinition>>;
}

/// Read access to per-date schedule exceptions.
#[async_trait]
pub trait ExceptionStore: Send + Sync {
    /// The exception for exactly this employee-date, if any.
    async fn exception_for(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<ScheduleException>>;
}

/// Read access to recurring weekly exclusions.
#[async_trait]
pub trait ExclusionStore: Send + Sync {
    /// The exclusion active for this employee on `date`'s weekday, if any.
    /// At most one can be active; overlaps are rejected at write time.
    async fn exclusion_for(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<WeeklyExclusion>>;
}
