//! Request types for updating models.
//!
//! These carry already-validated values; parsing of user supplied strings
//! happens in [`crate::params`] conversions before a request is built.

use jiff::civil::Date;

/// Changes to apply to a schedule. `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct UpdateScheduleRequest {
    pub name: Option<String>,
    pub start_date: Option<Date>,
    pub is_active: Option<bool>,
    pub is_loop: Option<bool>,
}

impl UpdateScheduleRequest {
    /// Whether the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.is_active.is_none()
            && self.is_loop.is_none()
    }
}

/// Changes to apply to a schedule step.
#[derive(Debug, Default, Clone)]
pub struct UpdateStepRequest {
    pub workout_id: Option<u64>,
    pub duration: Option<u32>,
}

impl UpdateStepRequest {
    pub fn is_empty(&self) -> bool {
        self.workout_id.is_none() && self.duration.is_none()
    }
}

/// Changes to apply to a single log entry.
#[derive(Debug, Default, Clone)]
pub struct UpdateLogRequest {
    pub exercise: Option<String>,
    pub reps: Option<u32>,
    /// `Some(None)` clears the weight
    pub weight: Option<Option<f64>>,
    pub date: Option<Date>,
}

impl UpdateLogRequest {
    pub fn is_empty(&self) -> bool {
        self.exercise.is_none()
            && self.reps.is_none()
            && self.weight.is_none()
            && self.date.is_none()
    }
}
