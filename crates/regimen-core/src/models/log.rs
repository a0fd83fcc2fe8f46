//! Training log models: sessions, individual log entries and the grouped
//! per-workout log book.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Impression, Workout};

/// One training day of a user. There is at most one session per user and
/// date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
    pub id: u64,
    pub user_id: u64,
    /// Workout the session was first logged against
    pub workout_id: u64,
    pub date: Date,
    pub impression: Impression,
    pub notes: Option<String>,
}

/// A single logged exercise set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLog {
    pub id: u64,
    pub user_id: u64,
    pub workout_id: u64,
    /// Exercise name
    pub exercise: String,
    pub reps: u32,
    /// Weight in the user's unit, if the set used one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub date: Date,
}

/// All logs of one workout grouped by exercise, then by date.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutLogBook {
    pub workout: Workout,
    pub exercises: BTreeMap<String, BTreeMap<Date, Vec<WorkoutLog>>>,
}

impl WorkoutLogBook {
    /// Group `logs` of `workout` by exercise and date.
    pub fn new(workout: Workout, logs: Vec<WorkoutLog>) -> Self {
        let mut exercises: BTreeMap<String, BTreeMap<Date, Vec<WorkoutLog>>> = BTreeMap::new();
        for log in logs {
            exercises
                .entry(log.exercise.clone())
                .or_default()
                .entry(log.date)
                .or_default()
                .push(log);
        }
        Self { workout, exercises }
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}
