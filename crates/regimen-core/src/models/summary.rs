//! Schedule summary types for overview listings.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::Schedule;

/// Summary information about a schedule with step statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Schedule ID
    pub id: u64,
    /// Name of the schedule
    pub name: String,
    /// Start date
    pub start_date: Date,
    /// Whether the schedule is the active one
    pub is_active: bool,
    /// Whether the schedule repeats
    pub is_loop: bool,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Number of steps
    pub step_count: u32,
    /// Sum of step durations in weeks
    pub total_weeks: u64,
    /// End date, `None` for loops
    pub end_date: Option<Date>,
}

impl From<&Schedule> for ScheduleSummary {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id,
            name: schedule.name.clone(),
            start_date: schedule.start_date,
            is_active: schedule.is_active,
            is_loop: schedule.is_loop,
            created_at: schedule.created_at,
            step_count: schedule.steps.len() as u32,
            total_weeks: schedule.total_weeks(),
            end_date: schedule.end_date(),
        }
    }
}
