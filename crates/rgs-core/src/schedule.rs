//! # Retention Schedule Primitives
//!
//! The data model for retention/disposition schedules: an ordered, non-empty
//! list of named steps, a level flag saying whether the schedule applies to
//! records or to folders, and the eligibility criteria that decide when the
//! next step may run.
//!
//! The engine only queries schedules; it never writes them. The host's
//! schedule store supplies `RetentionSchedule` values and, separately, the
//! per-item progress (which step names have completed and which events have
//! occurred).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::item::ScheduleId;

/// Whether a schedule governs individual records or whole folders.
///
/// A record-level schedule never applies to folders and vice versa; level
/// mismatches make an item simply not disposable under that schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleLevel {
    /// Disposition is applied per record.
    Record,
    /// Disposition is applied per folder.
    Folder,
}

/// When the next disposition step becomes runnable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityCriteria {
    /// Eligible as soon as the step becomes the next step.
    Immediate,
    /// Eligible once the given instant has passed.
    AfterInstant(DateTime<Utc>),
    /// Eligible once the named event has been recorded against the item.
    EventOccurred(String),
}

impl EligibilityCriteria {
    /// Whether the criteria are satisfied at `now` given the events that
    /// have occurred against the item.
    pub fn is_satisfied(&self, now: DateTime<Utc>, occurred: &BTreeSet<String>) -> bool {
        match self {
            Self::Immediate => true,
            Self::AfterInstant(instant) => now >= *instant,
            Self::EventOccurred(event) => occurred.contains(event),
        }
    }
}

/// A single named step in a retention schedule.
///
/// Step names are compared exactly and case-sensitively everywhere in the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispositionStep {
    /// Declared name of the step (for example `"Review"` or `"Destroy"`).
    pub name: String,
    /// When this step becomes runnable once it is next.
    pub eligibility: EligibilityCriteria,
}

impl DispositionStep {
    /// A step that is eligible immediately.
    pub fn immediate(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            eligibility: EligibilityCriteria::Immediate,
        }
    }

    /// A step gated on an instant.
    pub fn after(name: impl Into<String>, instant: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            eligibility: EligibilityCriteria::AfterInstant(instant),
        }
    }

    /// A step gated on an event.
    pub fn on_event(name: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            eligibility: EligibilityCriteria::EventOccurred(event.into()),
        }
    }
}

/// Error raised when constructing a schedule with no steps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("retention schedule {id} must have at least one step")]
pub struct EmptySchedule {
    /// The offending schedule identifier.
    pub id: ScheduleId,
}

/// An ordered, non-empty sequence of disposition steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionSchedule {
    /// Schedule identifier.
    pub id: ScheduleId,
    /// Whether the schedule applies to records or folders.
    pub level: ScheduleLevel,
    steps: Vec<DispositionStep>,
}

impl RetentionSchedule {
    /// Build a schedule, rejecting an empty step list.
    pub fn new(
        id: ScheduleId,
        level: ScheduleLevel,
        steps: Vec<DispositionStep>,
    ) -> Result<Self, EmptySchedule> {
        if steps.is_empty() {
            return Err(EmptySchedule { id });
        }
        Ok(Self { id, level, steps })
    }

    /// The ordered step list.
    pub fn steps(&self) -> &[DispositionStep] {
        &self.steps
    }

    /// The step at `ordinal`, if the schedule is that long.
    pub fn step_at(&self, ordinal: usize) -> Option<&DispositionStep> {
        self.steps.get(ordinal)
    }

    /// Whether any step in the schedule carries `name` (exact match).
    pub fn has_step_named(&self, name: &str) -> bool {
        self.steps.iter().any(|step| step.name == name)
    }
}
