//! Override layering
//!
//! The precedence between a per-date exception and the base schedule is
//! expressed as an ordered list of [`SchedulePatch`] layers merged over the
//! flattened base fields by a generic apply-non-null combinator. New override
//! layers slot in without touching the evaluator. The merged field set is
//! validated back into a typed [`SchedulePolicy`] at the end, so downstream
//! code never sees a half-overridden schedule.

use rollcall_domain::{Result, RollcallError, ScheduleDefinition, ScheduleKind, SchedulePatch, SchedulePolicy};

/// Flattened, override-friendly view of a schedule's fields.
///
/// Only the fields matching `kind` are meaningful; [`Self::into_policy`]
/// enforces that when re-typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleFields {
    pub kind: ScheduleKind,
    pub start_time: Option<u16>,
    pub end_time: Option<u16>,
    pub core_start: Option<u16>,
    pub core_end: Option<u16>,
    pub bandwidth_start: Option<u16>,
    pub bandwidth_end: Option<u16>,
    pub required_daily_minutes: Option<u16>,
    pub shift_start: Option<u16>,
    pub shift_end: Option<u16>,
    pub grace_minutes: u16,
    pub break_minutes: u16,
}

impl ScheduleFields {
    /// Flatten a base definition into the override field set.
    #[must_use]
    pub fn from_definition(definition: &ScheduleDefinition) -> Self {
        let mut fields = Self {
            kind: definition.policy.kind(),
            start_time: None,
            end_time: None,
            core_start: None,
            core_end: None,
            bandwidth_start: None,
            bandwidth_end: None,
            required_daily_minutes: None,
            shift_start: None,
            shift_end: None,
            grace_minutes: definition.grace_minutes,
            break_minutes: definition.break_minutes,
        };
        match definition.policy {
            SchedulePolicy::Fixed { start_time, end_time } => {
                fields.start_time = Some(start_time);
                fields.end_time = Some(end_time);
            }
            SchedulePolicy::Flex {
                core_start,
                core_end,
                bandwidth_start,
                bandwidth_end,
                required_daily_minutes,
            } => {
                fields.core_start = Some(core_start);
                fields.core_end = Some(core_end);
                fields.bandwidth_start = Some(bandwidth_start);
                fields.bandwidth_end = Some(bandwidth_end);
                fields.required_daily_minutes = Some(required_daily_minutes);
            }
            SchedulePolicy::Shift { shift_start, shift_end } => {
                fields.shift_start = Some(shift_start);
                fields.shift_end = Some(shift_end);
            }
        }
        fields
    }

    /// Merge one patch layer: set fields win, unset fields fall through.
    #[must_use]
    pub fn apply(mut self, patch: &SchedulePatch) -> Self {
        fn take<T: Copy>(slot: &mut Option<T>, patch_value: Option<T>) {
            if patch_value.is_some() {
                *slot = patch_value;
            }
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        take(&mut self.start_time, patch.start_time);
        take(&mut self.end_time, patch.end_time);
        take(&mut self.core_start, patch.core_start);
        take(&mut self.core_end, patch.core_end);
        take(&mut self.bandwidth_start, patch.bandwidth_start);
        take(&mut self.bandwidth_end, patch.bandwidth_end);
        take(&mut self.required_daily_minutes, patch.required_daily_minutes);
        take(&mut self.shift_start, patch.shift_start);
        take(&mut self.shift_end, patch.shift_end);
        if let Some(grace) = patch.grace_minutes {
            self.grace_minutes = grace;
        }
        if let Some(brk) = patch.break_minutes {
            self.break_minutes = brk;
        }
        self
    }

    /// Merge an ordered list of layers, lowest precedence first.
    #[must_use]
    pub fn merged(self, layers: &[&SchedulePatch]) -> Self {
        layers.iter().fold(self, |fields, patch| fields.apply(patch))
    }

    /// Re-type the merged fields into a schedule policy, failing with
    /// `InvalidSchedule` when a field required by the declared kind is
    /// missing. This is where illegal override combinations die.
    pub fn into_policy(self) -> Result<(SchedulePolicy, u16, u16)> {
        let kind = self.kind;
        let missing = |field: &str| {
            RollcallError::InvalidSchedule(format!("{kind:?} schedule missing {field}"))
        };
        let policy = match kind {
            ScheduleKind::Fixed => SchedulePolicy::Fixed {
                start_time: self.start_time.ok_or_else(|| missing("start_time"))?,
                end_time: self.end_time.ok_or_else(|| missing("end_time"))?,
            },
            ScheduleKind::Flex => SchedulePolicy::Flex {
                core_start: self.core_start.ok_or_else(|| missing("core_start"))?,
                core_end: self.core_end.ok_or_else(|| missing("core_end"))?,
                bandwidth_start: self.bandwidth_start.ok_or_else(|| missing("bandwidth_start"))?,
                bandwidth_end: self.bandwidth_end.ok_or_else(|| missing("bandwidth_end"))?,
                required_daily_minutes: self
                    .required_daily_minutes
                    .ok_or_else(|| missing("required_daily_minutes"))?,
            },
            ScheduleKind::Shift => SchedulePolicy::Shift {
                shift_start: self.shift_start.ok_or_else(|| missing("shift_start"))?,
                shift_end: self.shift_end.ok_or_else(|| missing("shift_end"))?,
            },
        };
        Ok((policy, self.grace_minutes, self.break_minutes))
    }
}
