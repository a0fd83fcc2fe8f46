//! Date and time display utilities.

use std::fmt;

use jiff::{Timestamp, civil::Date, tz::TimeZone};

/// A `Timestamp` shown in the system time zone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A civil date with its abbreviated weekday, e.g. `Mon 2024-03-04`.
pub struct DayLabel<'a>(pub &'a Date);

impl fmt::Display for DayLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %Y-%m-%d"))
    }
}

/// A month as its English name and year, e.g. `March 2024`.
pub struct MonthLabel(pub i16, pub i8);

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        match usize::try_from(i16::from(self.1) - 1).ok().and_then(|i| NAMES.get(i)) {
            Some(name) => write!(f, "{name} {}", self.0),
            None => write!(f, "{}-{:02}", self.0, self.1),
        }
    }
}
