//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data structures stay free of
//! presentation logic. All output is markdown.

use std::fmt;

use super::datetime::{DayLabel, LocalDateTime};
use crate::models::{
    Impression, Schedule, ScheduleStep, ScheduleSummary, Workout, WorkoutLog, WorkoutLogBook,
    WorkoutSession,
};

impl fmt::Display for Impression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        Ok(())
    }
}

impl fmt::Display for ScheduleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weeks = if self.duration == 1 { "week" } else { "weeks" };
        writeln!(
            f,
            "{}. {} ({} {weeks}, step ID: {}, workout ID: {})",
            self.order + 1,
            self.workout_name,
            self.duration,
            self.id,
            self.workout_id
        )
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(
            f,
            "- Status: {}",
            if self.is_active { "active" } else { "inactive" }
        )?;
        writeln!(f, "- Start: {}", DayLabel(&self.start_date))?;
        match self.end_date() {
            Some(end) => writeln!(f, "- End: {}", DayLabel(&end))?,
            None => writeln!(f, "- Repeats: every {} weeks", self.total_weeks())?,
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this schedule.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for ScheduleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_active { " (active)" } else { "" };
        writeln!(f, "## {} (ID: {}){marker}", self.name, self.id)?;
        writeln!(f)?;

        writeln!(
            f,
            "- **Steps**: {} ({} weeks)",
            self.step_count, self.total_weeks
        )?;
        writeln!(f, "- **Start**: {}", DayLabel(&self.start_date))?;
        match self.end_date {
            Some(end) => writeln!(f, "- **End**: {}", DayLabel(&end))?,
            None => writeln!(f, "- **Loop**: yes")?,
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for WorkoutLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} reps", self.exercise, self.reps)?;
        if let Some(weight) = self.weight {
            write!(f, " @ {weight}")?;
        }
        writeln!(f, " on {} (log ID: {})", self.date, self.id)
    }
}

impl fmt::Display for WorkoutSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Session on {} ({} {})",
            DayLabel(&self.date),
            self.impression.marker(),
            self.impression
        )?;
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "> {notes}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WorkoutLogBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Log: {} (ID: {})", self.workout.name, self.workout.id)?;
        writeln!(f)?;

        if self.is_empty() {
            return writeln!(f, "Nothing logged yet.");
        }

        for (exercise, days) in &self.exercises {
            writeln!(f, "## {exercise}")?;
            writeln!(f)?;
            for (date, logs) in days {
                let sets: Vec<String> = logs
                    .iter()
                    .map(|log| match log.weight {
                        Some(weight) => format!("{}x{weight}", log.reps),
                        None => log.reps.to_string(),
                    })
                    .collect();
                writeln!(f, "- {}: {}", DayLabel(date), sets.join(", "))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use super::*;

    fn step(id: u64, order: u32, duration: u32) -> ScheduleStep {
        ScheduleStep {
            id,
            schedule_id: 1,
            workout_id: 10 + id,
            workout_name: format!("Workout {id}"),
            duration,
            order,
        }
    }

    #[test]
    fn test_schedule_display() {
        let schedule = Schedule {
            id: 3,
            user_id: 1,
            name: "Base".to_string(),
            start_date: date(2013, 4, 21),
            is_active: true,
            is_loop: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            steps: vec![step(1, 0, 3), step(2, 1, 1)],
        };

        let output = schedule.to_string();
        assert!(output.contains("# 3. Base"));
        assert!(output.contains("- Status: active"));
        assert!(output.contains("2013-05-19"));
        assert!(output.contains("1. Workout 1 (3 weeks"));
        assert!(output.contains("2. Workout 2 (1 week,"));
    }

    #[test]
    fn test_loop_schedule_display() {
        let schedule = Schedule {
            id: 3,
            user_id: 1,
            name: "Cycle".to_string(),
            start_date: date(2013, 4, 21),
            is_active: false,
            is_loop: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            steps: vec![],
        };

        let output = schedule.to_string();
        assert!(output.contains("Repeats: every 0 weeks"));
        assert!(output.contains("No steps in this schedule."));
    }

    #[test]
    fn test_log_book_display() {
        let workout = Workout {
            id: 5,
            user_id: 1,
            name: "Legs".to_string(),
            description: None,
            created_at: Timestamp::UNIX_EPOCH,
        };
        let log = |id, reps, weight| WorkoutLog {
            id,
            user_id: 1,
            workout_id: 5,
            exercise: "Squat".to_string(),
            reps,
            weight,
            date: date(2024, 3, 4),
        };

        let book = WorkoutLogBook::new(workout, vec![log(1, 5, Some(100.0)), log(2, 8, None)]);
        let output = book.to_string();
        assert!(output.contains("## Squat"));
        assert!(output.contains("- Mon 2024-03-04: 5x100, 8"));
    }
}
