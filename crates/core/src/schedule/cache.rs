//! Explicit resolved-schedule cache
//!
//! The cache is an object the batch caller owns and passes into resolution,
//! never module-level state. Writers of schedule or exception records must
//! call `invalidate` (or drop the cache) before re-evaluating; the engine
//! does not watch the stores.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use rollcall_domain::ResolvedSchedule;

/// Caller-owned cache of resolved schedules keyed by employee-day.
#[derive(Default)]
pub struct ScheduleCache {
    entries: RwLock<HashMap<(String, NaiveDate), ResolvedSchedule>>,
}

impl ScheduleCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached view for an employee-day, if resolution already ran.
    #[must_use]
    pub fn get(&self, employee_id: &str, date: NaiveDate) -> Option<ResolvedSchedule> {
        self.entries.read().get(&(employee_id.to_string(), date)).cloned()
    }

    /// Store a resolved view.
    pub fn put(&self, resolved: ResolvedSchedule) {
        self.entries
            .write()
            .insert((resolved.employee_id.clone(), resolved.date), resolved);
    }

    /// Drop every cached day for one employee. Call after writing that
    /// employee's schedule, exception, or pattern records.
    pub fn invalidate(&self, employee_id: &str) {
        self.entries.write().retain(|(id, _), _| id != employee_id);
    }

    /// Drop everything.
    pub fn invalidate_all(&self) {
        self.entries.write().clear();
    }

    /// Number of cached employee-days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rollcall_domain::SchedulePolicy;

    use super::*;

    fn resolved(employee_id: &str, date: NaiveDate) -> ResolvedSchedule {
        ResolvedSchedule {
            employee_id: employee_id.into(),
            date,
            policy: SchedulePolicy::Fixed { start_time: 480, end_time: 1020 },
            grace_minutes: 10,
            break_minutes: 60,
            pattern_day: None,
            exception_applied: false,
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).expect("valid date")
    }

    #[test]
    fn put_get_and_invalidate_per_employee() {
        let cache = ScheduleCache::new();
        cache.put(resolved("E-1", date(4)));
        cache.put(resolved("E-1", date(5)));
        cache.put(resolved("E-2", date(4)));
        assert_eq!(cache.len(), 3);
        assert!(cache.get("E-1", date(4)).is_some());

        cache.invalidate("E-1");
        assert!(cache.get("E-1", date(4)).is_none());
        assert!(cache.get("E-1", date(5)).is_none());
        assert!(cache.get("E-2", date(4)).is_some());

        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
