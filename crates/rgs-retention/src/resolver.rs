//! # Retention Resolver
//!
//! Derives an item's disposition position from two store facts: the
//! governing schedule (an ordered step list) and the names of the steps
//! already completed. The next step is the first schedule step whose
//! ordinal equals the completed count; once the completed count reaches the
//! schedule length the schedule is exhausted and there is no next step.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use rgs_core::{
    DispositionStep, ItemRef, Kind, ObjectStore, ResolutionError, RetentionSchedule, ScheduleLevel,
    ScheduleStore,
};

/// Where in the schedule a named step is looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Anywhere in the schedule's step list.
    Any,
    /// The upcoming step only.
    Next,
    /// The last completed step only.
    Previous,
}

/// Stateless resolver over the host's schedule and object stores.
#[derive(Clone)]
pub struct RetentionResolver {
    schedules: Arc<dyn ScheduleStore>,
    objects: Arc<dyn ObjectStore>,
}

impl RetentionResolver {
    /// Build a resolver over the given stores.
    pub fn new(schedules: Arc<dyn ScheduleStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { schedules, objects }
    }

    /// Whether the item participates in a retention schedule.
    ///
    /// True only when a governing schedule exists *and* its level matches
    /// the item's kind: record-level schedules govern records, folder-level
    /// schedules govern folders. A record under a folder-level schedule is
    /// not disposable, and vice versa.
    pub fn is_disposable(&self, item: &ItemRef) -> Result<bool, ResolutionError> {
        match self.schedules.schedule_for(item)? {
            Some(schedule) => self.level_matches(item, &schedule),
            None => Ok(false),
        }
    }

    /// The schedule governing the item, if any.
    pub fn schedule_for(&self, item: &ItemRef) -> Result<Option<RetentionSchedule>, ResolutionError> {
        self.schedules.schedule_for(item)
    }

    /// The upcoming disposition step, if the item is disposable and the
    /// schedule is not exhausted.
    pub fn next_step(&self, item: &ItemRef) -> Result<Option<DispositionStep>, ResolutionError> {
        let Some(schedule) = self.disposable_schedule(item)? else {
            return Ok(None);
        };
        let completed = self.schedules.completed_steps(item)?.len();
        Ok(schedule.step_at(completed).cloned())
    }

    /// The name of the last completed disposition step, if any step has
    /// completed against a disposable item.
    pub fn previous_completed_step(&self, item: &ItemRef) -> Result<Option<String>, ResolutionError> {
        if self.disposable_schedule(item)?.is_none() {
            return Ok(None);
        }
        Ok(self.schedules.completed_steps(item)?.last().cloned())
    }

    /// Whether the next step's eligibility criteria are satisfied at `now`.
    ///
    /// False when there is no next step.
    pub fn is_eligible_at(&self, item: &ItemRef, now: DateTime<Utc>) -> Result<bool, ResolutionError> {
        let Some(step) = self.next_step(item)? else {
            return Ok(false);
        };
        let occurred = self.schedules.occurred_events(item)?;
        let eligible = step.eligibility.is_satisfied(now, &occurred);
        debug!(item = %item, step = %step.name, eligible, "next step eligibility");
        Ok(eligible)
    }

    /// [`Self::is_eligible_at`] against the current wall clock.
    pub fn is_eligible_now(&self, item: &ItemRef) -> Result<bool, ResolutionError> {
        self.is_eligible_at(item, Utc::now())
    }

    /// Whether a step named `name` occurs at `position` for the item.
    ///
    /// Unconditionally false for non-disposable items. Name comparison is
    /// exact and case-sensitive.
    pub fn has_step_named(
        &self,
        item: &ItemRef,
        name: &str,
        position: StepPosition,
    ) -> Result<bool, ResolutionError> {
        let Some(schedule) = self.disposable_schedule(item)? else {
            return Ok(false);
        };
        let result = match position {
            StepPosition::Any => schedule.has_step_named(name),
            StepPosition::Next => self
                .next_step(item)?
                .is_some_and(|step| step.name == name),
            StepPosition::Previous => self
                .previous_completed_step(item)?
                .is_some_and(|previous| previous == name),
        };
        debug!(item = %item, name, ?position, result, "step position query");
        Ok(result)
    }

    /// Whether a step named `name` could ever be scheduled for the item:
    /// a schedule exists at the correct level for the item's kind and the
    /// name occurs in its step list. Progress through the schedule is not
    /// consulted.
    pub fn may_be_scheduled(&self, item: &ItemRef, name: &str) -> Result<bool, ResolutionError> {
        let Some(schedule) = self.disposable_schedule(item)? else {
            return Ok(false);
        };
        Ok(schedule.has_step_named(name))
    }

    /// The governing schedule, filtered by level match.
    fn disposable_schedule(
        &self,
        item: &ItemRef,
    ) -> Result<Option<RetentionSchedule>, ResolutionError> {
        match self.schedules.schedule_for(item)? {
            Some(schedule) if self.level_matches(item, &schedule)? => Ok(Some(schedule)),
            _ => Ok(None),
        }
    }

    fn level_matches(
        &self,
        item: &ItemRef,
        schedule: &RetentionSchedule,
    ) -> Result<bool, ResolutionError> {
        let kind = self.objects.kind_of(item)?;
        Ok(matches!(
            (schedule.level, kind),
            (ScheduleLevel::Record, Kind::Record) | (ScheduleLevel::Folder, Kind::Folder)
        ))
    }
}
