//! Month calendar of logged training days.

use std::fmt;

use jiff::civil::Date;
use serde::Serialize;

use super::datetime::MonthLabel;
use crate::models::{CalendarMonth, CurrentWorkout, Impression};

/// The calendar page: one month of logged days plus the context shown next
/// to it.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub month: CalendarMonth,
    /// Highlighted in the grid when it falls into the month
    pub today: Date,
    pub current: CurrentWorkout,
    /// Months with at least one log, newest first
    pub log_months: Vec<(i16, i8)>,
}

impl CalendarView {
    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>, day: i8) -> fmt::Result {
        let text = match self.month.get(day) {
            Some(logged) => format!("{day} {}", logged.impression.marker()),
            None => day.to_string(),
        };

        let is_today = self.today.year() == self.month.year
            && self.today.month() == self.month.month
            && self.today.day() == day;

        if is_today {
            write!(f, " **{text}** |")
        } else {
            write!(f, " {text} |")
        }
    }

    fn fmt_grid(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Mon | Tue | Wed | Thu | Fri | Sat | Sun |")?;
        writeln!(f, "|-----|-----|-----|-----|-----|-----|-----|")?;

        let Ok(first) = Date::new(self.month.year, self.month.month, 1) else {
            return Ok(());
        };
        let leading = first.weekday().to_monday_zero_offset();
        let days = first.days_in_month();

        write!(f, "|")?;
        for _ in 0..leading {
            write!(f, "     |")?;
        }

        let mut column = leading;
        for day in 1..=days {
            if column == 7 {
                writeln!(f)?;
                write!(f, "|")?;
                column = 0;
            }
            self.fmt_cell(f, day)?;
            column += 1;
        }

        for _ in column..7 {
            write!(f, "     |")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", MonthLabel(self.month.year, self.month.month))?;
        writeln!(f)?;

        self.fmt_grid(f)?;
        writeln!(f)?;

        writeln!(
            f,
            "{} good, {} neutral, {} bad",
            Impression::Good.marker(),
            Impression::Neutral.marker(),
            Impression::Bad.marker()
        )?;

        if let Some(workout) = &self.current.workout {
            writeln!(f)?;
            writeln!(f, "Current workout: **{}** (ID: {})", workout.name, workout.id)?;
        }

        if !self.log_months.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Months with logs")?;
            writeln!(f)?;
            for (year, month) in &self.log_months {
                writeln!(f, "- {}", MonthLabel(*year, *month))?;
            }
        }

        Ok(())
    }
}
