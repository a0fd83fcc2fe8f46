//! Display for the workout currently in effect.

use std::fmt;

use super::datetime::DayLabel;
use crate::models::CurrentWorkout;

impl fmt::Display for CurrentWorkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(workout) = &self.workout else {
            return writeln!(
                f,
                "No current workout. Create a workout or start a schedule."
            );
        };

        write!(f, "{workout}")?;
        writeln!(f)?;

        match &self.schedule {
            Some(schedule) => {
                write!(f, "From schedule **{}** (ID: {})", schedule.name, schedule.id)?;
                match schedule.end_date() {
                    Some(end) => writeln!(f, ", ends {}", DayLabel(&end)),
                    None => writeln!(f, ", repeating"),
                }
            }
            None => writeln!(f, "Standalone workout, no schedule is running."),
        }
    }
}
