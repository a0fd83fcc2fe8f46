//! Column conversion helpers shared by the query modules.
//!
//! Dates are stored as `YYYY-MM-DD` text and timestamps as RFC 3339 text,
//! so they sort lexicographically in SQL.

use std::str::FromStr;

use jiff::{Timestamp, civil::Date};
use rusqlite::{Row, types::Type};

/// Reads an integer id column.
pub(crate) fn id_column(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

/// Reads a `YYYY-MM-DD` text column.
pub(crate) fn date_column(row: &Row, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a text column holding an enum's database representation.
pub(crate) fn enum_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let text: String = row.get(idx)?;
    text.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// First and last day of a month, for `BETWEEN` range queries.
pub(crate) fn month_bounds(year: i16, month: i8) -> crate::error::Result<(Date, Date)> {
    let first = Date::new(year, month, 1).map_err(|e| {
        crate::error::ManagerError::invalid_input("month", format!("{year}-{month}: {e}"))
    })?;
    Ok((first, first.last_of_month()))
}
