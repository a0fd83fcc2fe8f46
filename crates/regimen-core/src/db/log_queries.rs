//! Training session and workout log operations and queries.

use std::collections::HashMap;

use jiff::civil::Date;
use rusqlite::{Connection, OptionalExtension, params};

use super::utils::{date_column, enum_column, id_column, month_bounds};
use crate::{
    error::{DatabaseResultExt, ManagerError, Result},
    models::{Impression, UpdateLogRequest, WorkoutLog, WorkoutSession},
    params::LogEntry,
};

const LOG_COLUMNS: &str = "id, user_id, workout_id, exercise, reps, weight, date";
const SELECT_SESSION_SQL: &str = "SELECT id, user_id, workout_id, date, impression, notes FROM workout_sessions WHERE user_id = ?1 AND date = ?2";
const INSERT_SESSION_SQL: &str = "INSERT INTO workout_sessions (user_id, workout_id, date, impression, notes) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_SESSION_SQL: &str =
    "UPDATE workout_sessions SET impression = ?1, notes = ?2 WHERE id = ?3";
const INSERT_LOG_SQL: &str = "INSERT INTO workout_logs (user_id, workout_id, exercise, reps, weight, date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_LOG_SQL: &str =
    "UPDATE workout_logs SET exercise = ?1, reps = ?2, weight = ?3, date = ?4 WHERE id = ?5";
const DELETE_LOG_SQL: &str = "DELETE FROM workout_logs WHERE id = ?1";
const SELECT_SESSION_IMPRESSIONS_SQL: &str = "SELECT date, impression FROM workout_sessions WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3";
const SELECT_LOG_MONTHS_SQL: &str = "SELECT DISTINCT substr(date, 1, 7) AS month FROM workout_logs WHERE user_id = ?1 ORDER BY month DESC";

impl super::Database {
    /// Helper function to construct a WorkoutLog from a row selected with
    /// [`LOG_COLUMNS`].
    fn build_log_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkoutLog> {
        Ok(WorkoutLog {
            id: id_column(row, 0)?,
            user_id: id_column(row, 1)?,
            workout_id: id_column(row, 2)?,
            exercise: row.get(3)?,
            reps: row.get::<_, i64>(4)? as u32,
            weight: row.get(5)?,
            date: date_column(row, 6)?,
        })
    }

    fn build_session_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkoutSession> {
        Ok(WorkoutSession {
            id: id_column(row, 0)?,
            user_id: id_column(row, 1)?,
            workout_id: id_column(row, 2)?,
            date: date_column(row, 3)?,
            impression: enum_column(row, 4)?,
            notes: row.get(5)?,
        })
    }

    fn query_session(conn: &Connection, user_id: u64, date: Date) -> Result<Option<WorkoutSession>> {
        conn.query_row(
            SELECT_SESSION_SQL,
            params![user_id as i64, date.to_string()],
            Self::build_session_from_row,
        )
        .optional()
        .db_context("Failed to query session")
    }

    fn query_logs(
        &self,
        condition: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<WorkoutLog>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {LOG_COLUMNS} FROM workout_logs WHERE {condition} ORDER BY date, id"
            ))
            .db_context("Failed to prepare query")?;

        let logs = stmt
            .query_map(params, Self::build_log_from_row)
            .db_context("Failed to query logs")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch logs")?;

        Ok(logs)
    }

    /// Records a training session of `user_id` on `date`.
    ///
    /// The user's session for that day is reused when it exists, with its
    /// impression and notes replaced by the given ones; otherwise a new
    /// session is created for `workout_id`. Blank entries are skipped. Returns
    /// the session and the stored log entries.
    pub fn log_session(
        &mut self,
        user_id: u64,
        workout_id: u64,
        date: Date,
        impression: Option<Impression>,
        notes: Option<&str>,
        entries: &[LogEntry],
    ) -> Result<(WorkoutSession, Vec<WorkoutLog>)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let session = match Self::query_session(&tx, user_id, date)? {
            Some(mut session) => {
                if impression.is_some() || notes.is_some() {
                    if let Some(impression) = impression {
                        session.impression = impression;
                    }
                    if let Some(notes) = notes {
                        session.notes = Some(notes.to_string());
                    }
                    tx.execute(
                        UPDATE_SESSION_SQL,
                        params![session.impression.as_str(), &session.notes, session.id as i64],
                    )
                    .db_context("Failed to update session")?;
                }
                session
            }
            None => {
                let impression = impression.unwrap_or_default();
                tx.execute(
                    INSERT_SESSION_SQL,
                    params![
                        user_id as i64,
                        workout_id as i64,
                        date.to_string(),
                        impression.as_str(),
                        notes
                    ],
                )
                .db_context("Failed to insert session")?;

                WorkoutSession {
                    id: tx.last_insert_rowid() as u64,
                    user_id,
                    workout_id,
                    date,
                    impression,
                    notes: notes.map(String::from),
                }
            }
        };

        let mut logs = Vec::new();
        for entry in entries.iter().filter(|entry| !entry.is_blank()) {
            let exercise = entry.exercise.trim();
            tx.execute(
                INSERT_LOG_SQL,
                params![
                    user_id as i64,
                    workout_id as i64,
                    exercise,
                    entry.reps as i64,
                    entry.weight,
                    date.to_string()
                ],
            )
            .db_context("Failed to insert log entry")?;

            logs.push(WorkoutLog {
                id: tx.last_insert_rowid() as u64,
                user_id,
                workout_id,
                exercise: exercise.to_string(),
                reps: entry.reps,
                weight: entry.weight,
                date,
            });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        log::debug!(
            "logged {} entries for user {user_id} on {date} (session {})",
            logs.len(),
            session.id
        );

        Ok((session, logs))
    }

    /// The user's session on `date`, if any.
    pub fn get_session(&self, user_id: u64, date: Date) -> Result<Option<WorkoutSession>> {
        Self::query_session(&self.connection, user_id, date)
    }

    /// Retrieves a log entry by its ID.
    pub fn get_log(&self, id: u64) -> Result<Option<WorkoutLog>> {
        self.connection
            .query_row(
                &format!("SELECT {LOG_COLUMNS} FROM workout_logs WHERE id = ?1"),
                params![id as i64],
                Self::build_log_from_row,
            )
            .optional()
            .db_context("Failed to query log entry")
    }

    /// Retrieves a log entry, failing with `LogNotFound` if it is missing.
    pub fn require_log(&self, id: u64) -> Result<WorkoutLog> {
        self.get_log(id)?.ok_or(ManagerError::LogNotFound { id })
    }

    /// Applies the changes in `request` and returns the updated entry.
    pub fn update_log(&mut self, id: u64, request: UpdateLogRequest) -> Result<WorkoutLog> {
        let current = self.require_log(id)?;

        let updated = WorkoutLog {
            exercise: request.exercise.unwrap_or(current.exercise),
            reps: request.reps.unwrap_or(current.reps),
            weight: request.weight.unwrap_or(current.weight),
            date: request.date.unwrap_or(current.date),
            ..current
        };

        self.connection
            .execute(
                UPDATE_LOG_SQL,
                params![
                    &updated.exercise,
                    updated.reps as i64,
                    updated.weight,
                    updated.date.to_string(),
                    id as i64
                ],
            )
            .db_context("Failed to update log entry")?;

        Ok(updated)
    }

    /// Permanently deletes a log entry. Returns the deleted entry.
    pub fn delete_log(&mut self, id: u64) -> Result<WorkoutLog> {
        let log = self.require_log(id)?;

        self.connection
            .execute(DELETE_LOG_SQL, params![id as i64])
            .db_context("Failed to delete log entry")?;

        Ok(log)
    }

    /// All logs of a workout ordered by date.
    pub fn logs_for_workout(&self, workout_id: u64) -> Result<Vec<WorkoutLog>> {
        self.query_logs("workout_id = ?1", &[&(workout_id as i64)])
    }

    /// The user's logs dated within the given month.
    pub fn month_logs(&self, user_id: u64, year: i16, month: i8) -> Result<Vec<WorkoutLog>> {
        let (first, last) = month_bounds(year, month)?;
        self.query_logs(
            "user_id = ?1 AND date BETWEEN ?2 AND ?3",
            &[&(user_id as i64), &first.to_string(), &last.to_string()],
        )
    }

    /// Logs of the user's workouts scheduled in `schedule_id`, dated on or
    /// after `since`.
    pub fn logs_for_schedule(
        &self,
        schedule_id: u64,
        user_id: u64,
        since: Date,
    ) -> Result<Vec<WorkoutLog>> {
        self.query_logs(
            "user_id = ?1 AND date >= ?2 AND workout_id IN (SELECT workout_id FROM schedule_steps WHERE schedule_id = ?3)",
            &[&(user_id as i64), &since.to_string(), &(schedule_id as i64)],
        )
    }

    /// Session impressions of the user within the given month, by date.
    pub fn session_impressions(
        &self,
        user_id: u64,
        year: i16,
        month: i8,
    ) -> Result<HashMap<Date, Impression>> {
        let (first, last) = month_bounds(year, month)?;

        let mut stmt = self
            .connection
            .prepare(SELECT_SESSION_IMPRESSIONS_SQL)
            .db_context("Failed to prepare query")?;

        let impressions = stmt
            .query_map(
                params![user_id as i64, first.to_string(), last.to_string()],
                |row| Ok((date_column(row, 0)?, enum_column::<Impression>(row, 1)?)),
            )
            .db_context("Failed to query sessions")?
            .collect::<std::result::Result<HashMap<_, _>, _>>()
            .db_context("Failed to fetch sessions")?;

        Ok(impressions)
    }

    /// Months in which the user logged anything, newest first.
    pub fn log_months(&self, user_id: u64) -> Result<Vec<(i16, i8)>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_LOG_MONTHS_SQL)
            .db_context("Failed to prepare query")?;

        let months = stmt
            .query_map(params![user_id as i64], |row| row.get::<_, String>(0))
            .db_context("Failed to query log months")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch log months")?;

        Ok(months
            .iter()
            .filter_map(|month| {
                let (year, month) = month.split_once('-')?;
                Some((year.parse().ok()?, month.parse().ok()?))
            })
            .collect())
    }
}
