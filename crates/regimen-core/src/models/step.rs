//! Schedule step model definition.

use serde::{Deserialize, Serialize};

/// One phase of a schedule: a workout repeated for a number of weeks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleStep {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the parent schedule
    pub schedule_id: u64,

    /// Workout performed during this phase
    pub workout_id: u64,

    /// Name of the workout, joined in when the step is loaded
    pub workout_name: String,

    /// Length of the phase in whole weeks
    pub duration: u32,

    /// Position of the step within the schedule (0-indexed)
    pub order: u32,
}
