//! Month calendar of logged training days.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Impression, WorkoutLog};

/// A logged day in the calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarDay {
    /// Impression of the day's session, neutral if none was recorded
    pub impression: Impression,
    /// Workout of the first log of the day
    pub workout_id: u64,
}

/// Logged days of one month, keyed by day of month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i16,
    pub month: i8,
    pub days: BTreeMap<i8, CalendarDay>,
}

impl CalendarMonth {
    /// Group the month's logs by day. `impression_for` looks up the session
    /// impression of a day; days without a session are neutral.
    pub fn from_logs<F>(year: i16, month: i8, logs: &[WorkoutLog], mut impression_for: F) -> Self
    where
        F: FnMut(&WorkoutLog) -> Option<Impression>,
    {
        let mut days = BTreeMap::new();
        for log in logs {
            if log.date.year() != year || log.date.month() != month {
                continue;
            }
            if days.contains_key(&log.date.day()) {
                continue;
            }
            let impression = impression_for(log).unwrap_or_default();
            days.insert(
                log.date.day(),
                CalendarDay {
                    impression,
                    workout_id: log.workout_id,
                },
            );
        }
        Self { year, month, days }
    }

    pub fn get(&self, day: i8) -> Option<&CalendarDay> {
        self.days.get(&day)
    }
}
