//! The workout currently in effect for a user.

use serde::Serialize;

use super::{Schedule, Workout};

/// Result of resolving a user's current workout.
///
/// `schedule` is only set when the workout was supplied by the active
/// schedule; a standalone fallback workout comes without one.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CurrentWorkout {
    pub workout: Option<Workout>,
    pub schedule: Option<Schedule>,
}

impl CurrentWorkout {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.workout.is_none() && self.schedule.is_none()
    }
}
