//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{ScheduleSummary, Workout};

/// Newtype wrapper for displaying schedule overview rows.
///
/// # Examples
///
/// ```rust
/// use jiff::{Timestamp, civil::date};
/// use regimen_core::{display::ScheduleSummaries, models::ScheduleSummary};
///
/// let summary = ScheduleSummary {
///     id: 1,
///     name: "Base building".to_string(),
///     start_date: date(2024, 1, 1),
///     is_active: true,
///     is_loop: false,
///     created_at: Timestamp::UNIX_EPOCH,
///     step_count: 2,
///     total_weeks: 6,
///     end_date: Some(date(2024, 2, 12)),
/// };
///
/// let output = ScheduleSummaries(vec![summary]).to_string();
/// assert!(output.contains("Base building"));
/// assert!(output.contains("(active)"));
/// ```
pub struct ScheduleSummaries(pub Vec<ScheduleSummary>);

impl ScheduleSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleSummary> {
        self.0.iter()
    }
}

impl Index<usize> for ScheduleSummaries {
    type Output = ScheduleSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a ScheduleSummaries {
    type Item = &'a ScheduleSummary;
    type IntoIter = std::slice::Iter<'a, ScheduleSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ScheduleSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No schedules found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a list of workouts, one line each.
pub struct Workouts(pub Vec<Workout>);

impl Workouts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Workout> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Workouts {
    type Item = &'a Workout;
    type IntoIter = std::slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Workouts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No workouts found.");
        }

        for workout in &self.0 {
            write!(f, "- **{}** (ID: {})", workout.name, workout.id)?;
            if let Some(desc) = &workout.description {
                write!(f, ": {desc}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
