//! Day evaluator - computes lateness, undertime, worked time, and status for
//! one employee-day.
//!
//! All arithmetic is integer minutes on i64 intermediates. Late and undertime
//! deltas stay unfloored until the very end (the exclusion overlay compares
//! against the raw delta); only the reported values are floored at zero.
//! Lateness and undertime are independent facts and are never collapsed.

use rollcall_domain::constants::MINUTES_PER_DAY;
use rollcall_domain::{
    DayEvaluation, DayStatus, ExclusionMode, PatternDay, ResolvedSchedule, Result, RollcallError,
    SchedulePolicy, WeeklyExclusion, WindowPresence,
};
use tracing::trace;

use crate::punch::normalize_punches;

/// Structural sanity of a policy before any arithmetic runs.
///
/// A degenerate policy (inverted fixed span, core outside bandwidth, break
/// longer than the span) fails with `InvalidSchedule` for that single day;
/// the batch continues for other days.
pub fn validate_policy(policy: &SchedulePolicy, break_minutes: u16) -> Result<()> {
    match *policy {
        SchedulePolicy::Fixed { start_time, end_time } => {
            if end_time <= start_time {
                return Err(RollcallError::InvalidSchedule(format!(
                    "fixed schedule end {end_time} not after start {start_time}"
                )));
            }
            if i64::from(break_minutes) > i64::from(end_time) - i64::from(start_time) {
                return Err(RollcallError::InvalidSchedule(
                    "break longer than the scheduled span".into(),
                ));
            }
        }
        SchedulePolicy::Flex { core_start, core_end, bandwidth_start, bandwidth_end, .. } => {
            let ordered = bandwidth_start <= core_start
                && core_start < core_end
                && core_end <= bandwidth_end;
            if !ordered {
                return Err(RollcallError::InvalidSchedule(
                    "flex core hours must sit inside the bandwidth window".into(),
                ));
            }
        }
        SchedulePolicy::Shift { shift_start, shift_end } => {
            if shift_start == shift_end {
                return Err(RollcallError::InvalidSchedule(
                    "shift start and end coincide".into(),
                ));
            }
            let span = if shift_end < shift_start {
                i64::from(shift_end) + i64::from(MINUTES_PER_DAY) - i64::from(shift_start)
            } else {
                i64::from(shift_end) - i64::from(shift_start)
            };
            if i64::from(break_minutes) > span {
                return Err(RollcallError::InvalidSchedule(
                    "break longer than the shift span".into(),
                ));
            }
        }
    }
    Ok(())
}

/// Pre-overlay outcome of the per-type arithmetic.
struct BaseOutcome {
    required: i64,
    worked: i64,
    /// Unfloored lateness delta of the first offense; `<= 0` means on time
    late_raw: i64,
    /// Reported lateness, already floored; for pattern days this is the sum
    /// across windows and can exceed `late_raw`
    late_total: i64,
    /// The punch the IGNORE_LATE_UNTIL waiver is judged against
    qualifying_punch: Option<i64>,
    schedule_start: u16,
    schedule_end: u16,
    pattern_applied: bool,
    windows: Vec<WindowPresence>,
}

/// Evaluate one employee-day: normalize the raw punches, run the per-type
/// arithmetic, overlay any weekly exclusion, and derive the status.
///
/// The exclusion is applied only when it is active for the schedule's date
/// (weekday match inside the effective range).
///
/// # Errors
/// `InvalidSchedule` when the resolved policy or pattern day is degenerate.
pub fn evaluate_day<S: AsRef<str>>(
    schedule: &ResolvedSchedule,
    raw_punches: &[S],
    exclusion: Option<&WeeklyExclusion>,
) -> Result<DayEvaluation> {
    validate_policy(&schedule.policy, schedule.break_minutes)?;

    let punches: Vec<i64> =
        normalize_punches(raw_punches).into_iter().map(i64::from).collect();
    let grace = i64::from(schedule.grace_minutes);

    let base = match (&schedule.policy, &schedule.pattern_day) {
        (SchedulePolicy::Flex { .. }, Some(day)) => {
            if !day.is_well_formed() {
                return Err(RollcallError::InvalidSchedule(
                    "weekly pattern day has malformed windows".into(),
                ));
            }
            evaluate_pattern_day(day, grace, &punches)
        }
        (SchedulePolicy::Fixed { start_time, end_time }, _) => evaluate_span(
            i64::from(*start_time),
            i64::from(*end_time),
            grace,
            i64::from(schedule.break_minutes),
            &punches,
        ),
        (SchedulePolicy::Shift { shift_start, shift_end }, _) => {
            evaluate_shift(*shift_start, *shift_end, grace, schedule.break_minutes, &punches)
        }
        (
            SchedulePolicy::Flex {
                core_start,
                core_end,
                bandwidth_start,
                bandwidth_end,
                required_daily_minutes,
            },
            None,
        ) => evaluate_flex(
            i64::from(*core_start),
            i64::from(*core_end),
            i64::from(*bandwidth_start),
            i64::from(*bandwidth_end),
            i64::from(*required_daily_minutes),
            grace,
            &punches,
        ),
    };

    let has_punches = !punches.is_empty();
    let undertime_raw = if has_punches { base.required - base.worked } else { base.required };

    let mut late_minutes = base.late_total;
    let mut undertime_minutes = undertime_raw.max(0);
    let mut exclusion_applied = false;
    let mut excused = false;

    if let Some(exclusion) = exclusion.filter(|e| e.is_active_on(schedule.date)) {
        match exclusion.mode {
            ExclusionMode::Excused => {
                late_minutes = 0;
                undertime_minutes = 0;
                exclusion_applied = true;
                excused = true;
            }
            ExclusionMode::IgnoreLateUntil { ignore_until_minutes } => {
                // Compare the qualifying punch against the cutoff using the
                // raw, unfloored delta: only actual lateness gets waived.
                let waivable = base.late_raw > 0
                    && base
                        .qualifying_punch
                        .map_or(false, |p| p <= i64::from(ignore_until_minutes));
                if waivable {
                    late_minutes = 0;
                    exclusion_applied = true;
                }
            }
        }
    }

    let is_late = late_minutes > 0;
    let is_undertime = undertime_minutes > 0;
    let status = if excused {
        DayStatus::Excused
    } else if !has_punches {
        DayStatus::Absent
    } else {
        DayStatus::from_flags(is_late, is_undertime)
    };

    trace!(
        employee_id = %schedule.employee_id,
        date = %schedule.date,
        ?status,
        worked = base.worked,
        "day evaluated"
    );

    Ok(DayEvaluation {
        employee_id: schedule.employee_id.clone(),
        date: schedule.date,
        status,
        is_late,
        is_undertime,
        worked_minutes: base.worked.max(0) as u32,
        late_minutes: late_minutes as u32,
        undertime_minutes: undertime_minutes as u32,
        required_minutes: base.required.max(0) as u32,
        schedule_start: base.schedule_start,
        schedule_end: base.schedule_end,
        weekly_pattern_applied: base.pattern_applied,
        weekly_exclusion_applied: exclusion_applied,
        window_presence: base.windows,
    })
}

/// FIXED arithmetic over a start/end span. Also the tail of SHIFT evaluation
/// once the shift has been normalized onto a monotonic axis.
fn evaluate_span(start: i64, end: i64, grace: i64, brk: i64, punches: &[i64]) -> BaseOutcome {
    let required = end - start - brk;
    let first = punches.first().copied();
    let worked = match (punches.first(), punches.last()) {
        (Some(&f), Some(&l)) if punches.len() >= 2 => (l - f).max(0),
        _ => 0,
    };
    let late_raw = first.map_or(0, |f| f - (start + grace));
    BaseOutcome {
        required,
        worked,
        late_raw,
        late_total: late_raw.max(0),
        qualifying_punch: first,
        schedule_start: start as u16,
        schedule_end: end as u16,
        pattern_applied: false,
        windows: Vec::new(),
    }
}

/// SHIFT arithmetic. A shift whose end precedes its start crosses midnight:
/// the end gains a day, and any punch that logically falls after midnight
/// gains a day too, before any arithmetic, so ordering stays monotonic.
fn evaluate_shift(
    shift_start: u16,
    shift_end: u16,
    grace: i64,
    break_minutes: u16,
    punches: &[i64],
) -> BaseOutcome {
    let start = i64::from(shift_start);
    let raw_end = i64::from(shift_end);
    if raw_end >= start {
        return evaluate_span(start, raw_end, grace, i64::from(break_minutes), punches);
    }

    let end = raw_end + i64::from(MINUTES_PER_DAY);
    // A punch closer to the shift's end-of-night than to its evening start
    // belongs to the morning after. Midpoint of the dead zone between the
    // raw end and the start splits the two.
    let cutoff = (raw_end + start) / 2;
    let mut shifted: Vec<i64> = punches
        .iter()
        .map(|&p| if p < cutoff { p + i64::from(MINUTES_PER_DAY) } else { p })
        .collect();
    shifted.sort_unstable();
    evaluate_span(start, end, grace, i64::from(break_minutes), &shifted)
}

/// FLEX without a pattern: presence judged against the core window, worked
/// time against the wider bandwidth window with punches clamped to its edges.
fn evaluate_flex(
    core_start: i64,
    core_end: i64,
    bandwidth_start: i64,
    bandwidth_end: i64,
    required: i64,
    grace: i64,
    punches: &[i64],
) -> BaseOutcome {
    let first = punches.first().copied();
    let worked = match (punches.first(), punches.last()) {
        (Some(&f), Some(&l)) if punches.len() >= 2 => {
            let clamped_first = f.max(bandwidth_start);
            let clamped_last = l.min(bandwidth_end);
            (clamped_last - clamped_first).max(0)
        }
        _ => 0,
    };
    let late_raw = first.map_or(0, |f| f - (core_start + grace));
    BaseOutcome {
        required,
        worked,
        late_raw,
        late_total: late_raw.max(0),
        qualifying_punch: first,
        schedule_start: core_start as u16,
        schedule_end: core_end as u16,
        pattern_applied: false,
        windows: Vec::new(),
    }
}

/// FLEX with a weekly-pattern day: lateness per window, worked time as the
/// summed clamped overlap of the punch presence intervals with each window.
///
/// Punches alternate in/out, so consecutive pairs form presence intervals; a
/// trailing unpaired punch contributes no worked time (matching the
/// single-punch rule of the other policy types). An interval that starts
/// before a window opens covers it from the start, so waiting at the door is
/// never lateness.
fn evaluate_pattern_day(day: &PatternDay, grace: i64, punches: &[i64]) -> BaseOutcome {
    let mut windows = day.windows.clone();
    windows.sort_by_key(|w| w.start);

    let intervals: Vec<(i64, i64)> =
        punches.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();

    let mut worked = 0i64;
    let mut total_late = 0i64;
    let mut first_late_raw = 0i64;
    let mut qualifying_punch = None;
    let mut presence = Vec::with_capacity(windows.len());

    for window in &windows {
        let w_start = i64::from(window.start);
        let w_end = i64::from(window.end);

        let mut overlap = 0i64;
        let mut covering_start = None;
        for &(start, end) in &intervals {
            let clamped = (end.min(w_end) - start.max(w_start)).max(0);
            if clamped > 0 {
                overlap += clamped;
                if covering_start.is_none() {
                    covering_start = Some(start);
                }
            }
        }
        worked += overlap;

        let in_window = punches.iter().copied().find(|&p| p >= w_start && p <= w_end);
        let attended = overlap > 0 || in_window.is_some();

        // Arrival is the start of the earliest interval touching the window
        // (possibly before it opened), falling back to the earliest punch
        // inside the window when nothing paired up.
        let arrival = covering_start.or(in_window);
        let late_raw = arrival.map_or(0, |a| a - (w_start + grace));
        if late_raw > 0 {
            total_late += late_raw;
            if qualifying_punch.is_none() {
                first_late_raw = late_raw;
                qualifying_punch = arrival;
            }
        }
        presence.push(WindowPresence {
            start: window.start,
            end: window.end,
            attended,
            late_minutes: late_raw.max(0) as u32,
        });
    }

    let schedule_start = windows.first().map_or(0, |w| w.start);
    let schedule_end = windows.last().map_or(0, |w| w.end);

    // late_raw carries the first offending window's raw delta so the
    // exclusion overlay can compare the unfloored value; the reported total
    // is the sum across windows.
    BaseOutcome {
        required: i64::from(day.required_minutes),
        worked,
        late_raw: if total_late > 0 { first_late_raw } else { 0 },
        late_total: total_late,
        qualifying_punch,
        schedule_start,
        schedule_end,
        pattern_applied: true,
        windows: presence,
    }
}
