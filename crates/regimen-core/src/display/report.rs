//! Schedule log report: a schedule together with everything logged for its
//! workouts since it started.

use std::{collections::BTreeMap, fmt};

use jiff::civil::Date;
use serde::Serialize;

use super::datetime::DayLabel;
use crate::models::{Schedule, WorkoutLog};

/// Serializes to JSON for export and renders as markdown.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub schedule: Schedule,
    pub end_date: Option<Date>,
    pub total_weeks: u64,
    /// Logs grouped by day, oldest first
    pub days: BTreeMap<Date, Vec<WorkoutLog>>,
}

impl ScheduleReport {
    pub fn new(schedule: Schedule, logs: Vec<WorkoutLog>) -> Self {
        let mut days: BTreeMap<Date, Vec<WorkoutLog>> = BTreeMap::new();
        for log in logs {
            days.entry(log.date).or_default().push(log);
        }

        Self {
            end_date: schedule.end_date(),
            total_weeks: schedule.total_weeks(),
            schedule,
            days,
        }
    }

    /// Number of logged entries in the report.
    pub fn entry_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Report: {}", self.schedule.name)?;
        writeln!(f)?;
        writeln!(f, "- Start: {}", DayLabel(&self.schedule.start_date))?;
        match self.end_date {
            Some(end) => writeln!(f, "- End: {}", DayLabel(&end))?,
            None => writeln!(f, "- Loop of {} weeks", self.total_weeks)?,
        }
        writeln!(f, "- Logged entries: {}", self.entry_count())?;

        if !self.schedule.steps.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Steps")?;
            writeln!(f)?;
            for step in &self.schedule.steps {
                write!(f, "{step}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "## Logs")?;
        writeln!(f)?;

        if self.days.is_empty() {
            return writeln!(f, "Nothing logged since the schedule started.");
        }

        writeln!(f, "| Date | Exercise | Reps | Weight |")?;
        writeln!(f, "|------|----------|------|--------|")?;
        for (date, logs) in &self.days {
            for log in logs {
                let weight = log.weight.map(|w| w.to_string()).unwrap_or_default();
                writeln!(
                    f,
                    "| {} | {} | {} | {weight} |",
                    date, log.exercise, log.reps
                )?;
            }
        }

        Ok(())
    }
}
