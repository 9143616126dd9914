//! Attendance service - composes resolution, evaluation, and summarization
//!
//! Evaluation is stateless per call, so a roster x month batch fans out over
//! a bounded worker pool with no ordering guarantee across employees. Every
//! employee-day yields exactly one outcome: an evaluation or a per-item
//! error. Failures never abort the batch and are never silently dropped.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use rollcall_domain::constants::DEFAULT_BATCH_CONCURRENCY;
use rollcall_domain::{
    error_label, DayEvaluation, EmployeeMonthSummary, Result, RollcallError, EngineConfig,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::evaluation::evaluate_day;
use crate::schedule::cache::ScheduleCache;
use crate::schedule::ports::{ExceptionStore, ExclusionStore, ScheduleStore};
use crate::schedule::resolver::ScheduleResolver;
use crate::summary::summarize_month;

/// One employee's raw punches for a month, keyed by date. Days of the month
/// absent from the map are evaluated with no punches (toward ABSENT).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPunchSheet {
    pub employee_id: String,
    pub days: BTreeMap<NaiveDate, Vec<String>>,
}

/// Per-item result of a batch run. The error case carries which employee-day
/// could not be evaluated and why.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOutcome {
    pub employee_id: String,
    pub date: NaiveDate,
    pub outcome: Result<DayEvaluation>,
}

/// Facade over the attendance engine: resolve, evaluate, summarize.
pub struct AttendanceService {
    resolver: ScheduleResolver,
    exclusions: Arc<dyn ExclusionStore>,
    concurrency: usize,
}

impl AttendanceService {
    /// Create a service over the portal's record stores.
    pub fn new(
        schedules: Arc<dyn ScheduleStore>,
        exceptions: Arc<dyn ExceptionStore>,
        exclusions: Arc<dyn ExclusionStore>,
    ) -> Self {
        Self {
            resolver: ScheduleResolver::new(schedules, exceptions),
            exclusions,
            concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }

    /// Apply engine configuration (worker pool bound).
    #[must_use]
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.concurrency = config.batch_concurrency.max(1);
        self
    }

    /// Evaluate a single employee-day end to end: resolve the schedule
    /// through the caller-owned cache, look up the weekly exclusion, and run
    /// the rules engine.
    pub async fn evaluate_employee_day(
        &self,
        cache: &ScheduleCache,
        employee_id: &str,
        date: NaiveDate,
        raw_punches: &[String],
    ) -> Result<DayEvaluation> {
        let resolved = self.resolver.resolve(cache, employee_id, date).await?;
        let exclusion = self.exclusions.exclusion_for(employee_id, date).await?;
        evaluate_day(&resolved, raw_punches, exclusion.as_ref())
    }

    /// Evaluate a whole roster for one month on a bounded worker pool.
    ///
    /// Returns one outcome per employee-day, in no particular order across
    /// employees. Per-day failures (no schedule, invalid schedule,
    /// collaborator errors) are reported in the outcome and do not abort the
    /// rest of the batch.
    pub async fn evaluate_month(
        &self,
        cache: &ScheduleCache,
        sheets: &[MonthlyPunchSheet],
        year: i32,
        month: u32,
    ) -> Result<Vec<DayOutcome>> {
        let days = month_days(year, month)?;
        let empty: Vec<String> = Vec::new();

        let work = sheets.iter().flat_map(|sheet| {
            days.iter().map(|&date| {
                let punches = sheet.days.get(&date).unwrap_or(&empty).clone();
                (sheet.employee_id.clone(), date, punches)
            })
        });

        let outcomes = stream::iter(work)
            .map(|(employee_id, date, punches)| async move {
                let outcome =
                    self.evaluate_employee_day(cache, &employee_id, date, &punches).await;
                if let Err(error) = &outcome {
                    warn!(
                        employee_id = %employee_id,
                        %date,
                        kind = error_label(error),
                        error = %error,
                        "employee-day could not be evaluated"
                    );
                }
                DayOutcome { employee_id, date, outcome }
            })
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(outcomes)
    }

    /// Fold one employee's successful outcomes into a monthly summary.
    #[must_use]
    pub fn summarize_employee(
        &self,
        employee_id: &str,
        outcomes: &[DayOutcome],
    ) -> EmployeeMonthSummary {
        let days: Vec<DayEvaluation> = outcomes
            .iter()
            .filter(|o| o.employee_id == employee_id)
            .filter_map(|o| o.outcome.as_ref().ok())
            .cloned()
            .collect();
        summarize_month(employee_id, &days)
    }
}

/// Every calendar day of `(year, month)`.
fn month_days(year: i32, month: u32) -> Result<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| RollcallError::Validation(format!("invalid month {year}-{month:02}")))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| RollcallError::Internal("month arithmetic overflow".into()))?;
    Ok(first.iter_days().take_while(|d| *d < next_first).collect())
}
