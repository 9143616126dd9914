//! Employee month summarizer
//!
//! A pure, order-independent fold over one employee's day evaluations for one
//! month. Every input is already fully evaluated; nothing is recomputed here,
//! so feeding the rows in any order produces the same summary.

use rollcall_domain::{DayEvaluation, DayStatus, EmployeeMonthSummary};

/// Fold one employee's day evaluations into monthly totals.
///
/// `late_days`/`undertime_days` count the independent flags, so a day that is
/// both late and undertime increments both counters.
#[must_use]
pub fn summarize_month(employee_id: &str, days: &[DayEvaluation]) -> EmployeeMonthSummary {
    days.iter().fold(
        EmployeeMonthSummary { employee_id: employee_id.to_string(), ..Default::default() },
        |mut summary, day| {
            summary.days_evaluated += 1;
            summary.worked_minutes += u64::from(day.worked_minutes);
            summary.late_minutes += u64::from(day.late_minutes);
            summary.undertime_minutes += u64::from(day.undertime_minutes);
            if day.is_late {
                summary.late_days += 1;
            }
            if day.is_undertime {
                summary.undertime_days += 1;
            }
            match day.status {
                DayStatus::Present => summary.present_days += 1,
                DayStatus::Absent => summary.absent_days += 1,
                DayStatus::Excused => summary.excused_days += 1,
                DayStatus::Late | DayStatus::Undertime | DayStatus::LateAndUndertime => {}
            }
            if day.weekly_pattern_applied {
                summary.pattern_days += 1;
            }
            if day.weekly_exclusion_applied {
                summary.exclusion_days += 1;
            }
            summary
        },
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn day(d: u32, status: DayStatus, is_late: bool, is_undertime: bool) -> DayEvaluation {
        DayEvaluation {
            employee_id: "E-1".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, d).expect("valid date"),
            status,
            is_late,
            is_undertime,
            worked_minutes: 400,
            late_minutes: u32::from(is_late) * 10,
            undertime_minutes: u32::from(is_undertime) * 80,
            required_minutes: 480,
            schedule_start: 480,
            schedule_end: 1020,
            weekly_pattern_applied: false,
            weekly_exclusion_applied: false,
            window_presence: Vec::new(),
        }
    }

    #[test]
    fn totals_and_counts_add_up() {
        let days = vec![
            day(1, DayStatus::Present, false, false),
            day(2, DayStatus::Late, true, false),
            day(3, DayStatus::LateAndUndertime, true, true),
            day(4, DayStatus::Absent, false, true),
            day(5, DayStatus::Excused, false, false),
        ];
        let summary = summarize_month("E-1", &days);
        assert_eq!(summary.days_evaluated, 5);
        assert_eq!(summary.present_days, 1);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.excused_days, 1);
        // Independent flag counts: the LATE_AND_UNDERTIME day hits both
        assert_eq!(summary.late_days, 2);
        assert_eq!(summary.undertime_days, 2);
        assert_eq!(summary.worked_minutes, 2000);
        assert_eq!(summary.late_minutes, 20);
        assert_eq!(summary.undertime_minutes, 160);
    }

    #[test]
    fn fold_is_commutative_over_input_order() {
        let days = vec![
            day(1, DayStatus::Present, false, false),
            day(2, DayStatus::Late, true, false),
            day(3, DayStatus::Undertime, false, true),
            day(4, DayStatus::Absent, false, true),
        ];
        let forward = summarize_month("E-1", &days);

        let mut reversed = days.clone();
        reversed.reverse();
        assert_eq!(summarize_month("E-1", &reversed), forward);

        // An arbitrary interleaving as well
        let shuffled = vec![days[2].clone(), days[0].clone(), days[3].clone(), days[1].clone()];
        assert_eq!(summarize_month("E-1", &shuffled), forward);
    }

    #[test]
    fn empty_month_is_all_zeroes() {
        let summary = summarize_month("E-9", &[]);
        assert_eq!(summary.days_evaluated, 0);
        assert_eq!(summary.worked_minutes, 0);
        assert_eq!(summary.employee_id, "E-9");
    }
}
