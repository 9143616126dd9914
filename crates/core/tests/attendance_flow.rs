//! End-to-end engine tests: resolution through evaluation to summary.

mod support;

use std::sync::Arc;

use chrono::NaiveDate;
use rollcall_core::{AttendanceService, MonthlyPunchSheet, ScheduleCache};
use rollcall_domain::{
    DayStatus, EngineConfig, ExclusionMode, RollcallError, ScheduleDefinition, ScheduleException,
    SchedulePatch, SchedulePolicy, WeeklyExclusion,
};
use support::{MockExceptionStore, MockExclusionStore, MockScheduleStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn office_hours(employee_id: &str) -> ScheduleDefinition {
    ScheduleDefinition {
        employee_id: employee_id.into(),
        policy: SchedulePolicy::Fixed { start_time: 480, end_time: 1020 },
        grace_minutes: 10,
        break_minutes: 60,
        effective_from: date(2024, 1, 1),
        effective_to: None,
        weekly_pattern: None,
    }
}

fn service(
    definitions: Vec<ScheduleDefinition>,
    exceptions: Vec<ScheduleException>,
    exclusions: Vec<WeeklyExclusion>,
) -> AttendanceService {
    AttendanceService::new(
        Arc::new(MockScheduleStore::new(definitions)),
        Arc::new(MockExceptionStore::new(exceptions)),
        Arc::new(MockExclusionStore::new(exclusions)),
    )
}

fn sheet(employee_id: &str, days: &[(NaiveDate, &[&str])]) -> MonthlyPunchSheet {
    MonthlyPunchSheet {
        employee_id: employee_id.into(),
        days: days
            .iter()
            .map(|(d, punches)| (*d, punches.iter().map(|s| (*s).to_string()).collect()))
            .collect(),
    }
}

#[tokio::test]
async fn single_day_resolves_and_evaluates() {
    let svc = service(vec![office_hours("E-1")], vec![], vec![]);
    let cache = ScheduleCache::new();

    let eval = svc
        .evaluate_employee_day(&cache, "E-1", date(2024, 3, 4), &["08:05".into(), "17:00".into()])
        .await
        .expect("evaluates");
    assert_eq!(eval.status, DayStatus::Present);
    assert_eq!(eval.worked_minutes, 535);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn exception_reshapes_one_day_and_cache_invalidation_picks_up_writes() {
    let exception = ScheduleException {
        employee_id: "E-1".into(),
        date: date(2024, 3, 4),
        patch: SchedulePatch { start_time: Some(600), ..SchedulePatch::default() },
    };
    let svc = service(vec![office_hours("E-1")], vec![exception], vec![]);
    let cache = ScheduleCache::new();

    // 08:25 against the overridden 10:00 start is early, not late
    let eval = svc
        .evaluate_employee_day(&cache, "E-1", date(2024, 3, 4), &["08:25".into(), "17:00".into()])
        .await
        .expect("evaluates");
    assert!(!eval.is_late);

    // The neighboring day uses the base 08:00 start
    let eval = svc
        .evaluate_employee_day(&cache, "E-1", date(2024, 3, 5), &["08:25".into(), "17:00".into()])
        .await
        .expect("evaluates");
    assert!(eval.is_late);
    assert_eq!(eval.late_minutes, 15);

    // Simulate an exception being revoked: a fresh store without it, same
    // cache. Until invalidated, the stale view answers.
    let revoked = service(vec![office_hours("E-1")], vec![], vec![]);
    let stale = revoked
        .evaluate_employee_day(&cache, "E-1", date(2024, 3, 4), &["08:25".into(), "17:00".into()])
        .await
        .expect("evaluates");
    assert!(!stale.is_late);

    cache.invalidate("E-1");
    let fresh = revoked
        .evaluate_employee_day(&cache, "E-1", date(2024, 3, 4), &["08:25".into(), "17:00".into()])
        .await
        .expect("evaluates");
    assert!(fresh.is_late);
}

#[tokio::test]
async fn month_batch_reports_every_day_and_isolates_failures() {
    // E-1 has a schedule; E-2 has none and must fail per-day, not abort
    let exclusions = vec![WeeklyExclusion {
        employee_id: "E-1".into(),
        weekday: 5, // Fridays excused
        mode: ExclusionMode::Excused,
        effective_from: date(2024, 1, 1),
        effective_to: None,
    }];
    let svc = service(vec![office_hours("E-1")], vec![], exclusions)
        .with_config(&EngineConfig { batch_concurrency: 4, ..EngineConfig::default() });
    let cache = ScheduleCache::new();

    let sheets = vec![
        sheet(
            "E-1",
            &[
                (date(2024, 3, 4), &["08:05", "17:00"][..]),
                (date(2024, 3, 5), &["08:25", "17:00"][..]),
            ],
        ),
        sheet("E-2", &[(date(2024, 3, 4), &["08:00", "17:00"][..])]),
    ];

    let outcomes = svc.evaluate_month(&cache, &sheets, 2024, 3).await.expect("batch runs");
    // Two employees, 31 days each: every employee-day reported exactly once
    assert_eq!(outcomes.len(), 62);

    let e1_ok = outcomes
        .iter()
        .filter(|o| o.employee_id == "E-1" && o.outcome.is_ok())
        .count();
    assert_eq!(e1_ok, 31);

    // E-2 fails every day with NoScheduleForDate, and is still reported
    let e2: Vec<_> = outcomes.iter().filter(|o| o.employee_id == "E-2").collect();
    assert_eq!(e2.len(), 31);
    assert!(e2.iter().all(|o| matches!(
        o.outcome,
        Err(RollcallError::NoScheduleForDate(_))
    )));

    // Summary folds only the evaluated days
    let summary = svc.summarize_employee("E-1", &outcomes);
    assert_eq!(summary.days_evaluated, 31);
    assert_eq!(summary.late_days, 1);
    // 2024-03 has five Fridays (1, 8, 15, 22, 29), all excused
    assert_eq!(summary.excused_days, 5);
    // Everything neither punched nor excused is absent
    assert_eq!(summary.absent_days, 31 - 2 - 5);

    let e2_summary = svc.summarize_employee("E-2", &outcomes);
    assert_eq!(e2_summary.days_evaluated, 0);
}

#[tokio::test]
async fn collaborator_failure_propagates_per_item() {
    let svc = AttendanceService::new(
        Arc::new(MockScheduleStore::failing()),
        Arc::new(MockExceptionStore::default()),
        Arc::new(MockExclusionStore::default()),
    );
    let cache = ScheduleCache::new();

    let err = svc
        .evaluate_employee_day(&cache, "E-1", date(2024, 3, 4), &[])
        .await
        .expect_err("collaborator down");
    assert!(matches!(err, RollcallError::Collaborator(_)));

    // In a batch the failure is carried per item, not raised
    let outcomes = svc
        .evaluate_month(&cache, &[sheet("E-1", &[])], 2024, 3)
        .await
        .expect("batch still runs");
    assert_eq!(outcomes.len(), 31);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o.outcome, Err(RollcallError::Collaborator(_)))));
}

#[tokio::test]
async fn ignore_late_until_waiver_flows_through_the_service() {
    let mut def = office_hours("E-1");
    def.grace_minutes = 0;
    let exclusions = vec![WeeklyExclusion {
        employee_id: "E-1".into(),
        weekday: 1,
        mode: ExclusionMode::IgnoreLateUntil { ignore_until_minutes: 510 },
        effective_from: date(2024, 1, 1),
        effective_to: None,
    }];
    let svc = service(vec![def], vec![], exclusions);
    let cache = ScheduleCache::new();

    let eval = svc
        .evaluate_employee_day(&cache, "E-1", date(2024, 3, 4), &["08:20".into(), "17:00".into()])
        .await
        .expect("evaluates");
    assert!(!eval.is_late);
    assert_eq!(eval.late_minutes, 0);
    assert!(eval.weekly_exclusion_applied);
    assert_eq!(eval.status, DayStatus::Present);
}
