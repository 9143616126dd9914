//! Schedule resolver - core resolution logic
//!
//! Precedence, highest wins: per-date exception fields, then the base
//! definition active for the date. A weekly-pattern entry (FLEX only)
//! supersedes the schedule-level core/bandwidth figures for its weekday and
//! rides along on the resolved view for the evaluator.

use std::sync::Arc;

use chrono::NaiveDate;
use rollcall_domain::{
    PatternDay, ResolvedSchedule, Result, RollcallError, SchedulePolicy,
};
use tracing::{debug, warn};

use super::cache::ScheduleCache;
use super::layers::ScheduleFields;
use super::ports::{ExceptionStore, ScheduleStore};
use crate::evaluation::validate_policy;

/// Resolves the single applicable schedule view for an employee-day.
pub struct ScheduleResolver {
    schedules: Arc<dyn ScheduleStore>,
    exceptions: Arc<dyn ExceptionStore>,
}

impl ScheduleResolver {
    /// Create a new resolver over the portal's record stores.
    pub fn new(schedules: Arc<dyn ScheduleStore>, exceptions: Arc<dyn ExceptionStore>) -> Self {
        Self { schedules, exceptions }
    }

    /// Resolve the effective schedule for `(employee_id, date)`, going
    /// through the caller-owned cache.
    ///
    /// # Errors
    /// - `NoScheduleForDate` when no definition's interval contains the date
    /// - `InvalidSchedule` when the merged fields don't form a usable policy
    /// - Collaborator errors from the stores, propagated untouched
    pub async fn resolve(
        &self,
        cache: &ScheduleCache,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<ResolvedSchedule> {
        if let Some(hit) = cache.get(employee_id, date) {
            return Ok(hit);
        }

        let mut candidates = self.schedules.active_definitions(employee_id, date).await?;
        candidates.retain(|def| def.is_active_on(date));
        if candidates.len() > 1 {
            // Should not occur under the no-overlap invariant; tie-break on
            // latest effective_from rather than guessing.
            warn!(
                employee_id,
                %date,
                count = candidates.len(),
                "overlapping schedule definitions; taking latest effective_from"
            );
        }
        let base = candidates
            .into_iter()
            .max_by_key(|def| def.effective_from)
            .ok_or_else(|| {
                RollcallError::NoScheduleForDate(format!("{employee_id} on {date}"))
            })?;

        let exception = self.exceptions.exception_for(employee_id, date).await?;
        let exception_applied = exception.as_ref().map_or(false, |e| !e.patch.is_empty());

        let fields = ScheduleFields::from_definition(&base);
        let fields = match &exception {
            Some(e) => fields.merged(&[&e.patch]),
            None => fields.merged(&[]),
        };
        let (policy, grace_minutes, break_minutes) = fields.into_policy()?;
        validate_policy(&policy, break_minutes)?;

        // A weekly pattern only applies to flexible schedules, and only when
        // an entry exists for the date's weekday.
        let pattern_day: Option<PatternDay> = match policy {
            SchedulePolicy::Flex { .. } => {
                base.weekly_pattern.as_ref().and_then(|p| p.day_for(date)).cloned()
            }
            _ => None,
        };
        if let Some(day) = &pattern_day {
            if !day.is_well_formed() {
                return Err(RollcallError::InvalidSchedule(format!(
                    "weekly pattern for {employee_id} on {date} has malformed windows"
                )));
            }
        }

        debug!(
            employee_id,
            %date,
            kind = ?policy.kind(),
            exception_applied,
            pattern = pattern_day.is_some(),
            "schedule resolved"
        );

        let resolved = ResolvedSchedule {
            employee_id: employee_id.to_string(),
            date,
            policy,
            grace_minutes,
            break_minutes,
            pattern_day,
            exception_applied,
        };
        cache.put(resolved.clone());
        Ok(resolved)
    }
}
