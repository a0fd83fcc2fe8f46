//! Schedule model definition.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::ScheduleStep;
use crate::resolver;

/// A named, ordered sequence of workout phases belonging to one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    /// Unique identifier for the schedule
    pub id: u64,

    /// Owning user
    pub user_id: u64,

    /// Name of the schedule
    pub name: String,

    /// First day of the first step
    pub start_date: Date,

    /// Whether this is the user's schedule in effect
    pub is_active: bool,

    /// Whether the steps repeat indefinitely once exhausted
    pub is_loop: bool,

    /// Timestamp when the schedule was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the schedule was last modified (UTC)
    pub updated_at: Timestamp,

    /// Steps ordered by position
    #[serde(default)]
    pub steps: Vec<ScheduleStep>,
}

impl Schedule {
    /// Sum of all step durations in weeks.
    pub fn total_weeks(&self) -> u64 {
        resolver::total_weeks(&self.steps)
    }

    /// Last day of the final step, or `None` for loops.
    ///
    /// See [`resolver::end_date`].
    pub fn end_date(&self) -> Option<Date> {
        resolver::end_date(self)
    }

    /// The step in effect on `as_of`.
    ///
    /// See [`resolver::current_step`].
    pub fn current_step(&self, as_of: Date) -> Option<&ScheduleStep> {
        resolver::current_step(self, as_of)
    }
}
