//! Schedule CRUD operations and queries.

use jiff::{Timestamp, civil::Date};
use rusqlite::{Connection, OptionalExtension, params};

use super::utils::{date_column, id_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, ManagerError, Result},
    models::{Schedule, ScheduleSummary, UpdateScheduleRequest},
    resolver,
};

const SCHEDULE_COLUMNS: &str =
    "id, user_id, name, start_date, is_active, is_loop, created_at, updated_at";
const INSERT_SCHEDULE_SQL: &str = "INSERT INTO schedules (user_id, name, start_date, is_active, is_loop, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const DEACTIVATE_OTHER_SCHEDULES_SQL: &str =
    "UPDATE schedules SET is_active = 0, updated_at = ?1 WHERE user_id = ?2 AND id != ?3 AND is_active = 1";
const UPDATE_SCHEDULE_SQL: &str = "UPDATE schedules SET name = ?1, start_date = ?2, is_active = ?3, is_loop = ?4, updated_at = ?5 WHERE id = ?6";
const ACTIVATE_SCHEDULE_SQL: &str =
    "UPDATE schedules SET is_active = 1, start_date = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_SCHEDULE_STEPS_SQL: &str = "DELETE FROM schedule_steps WHERE schedule_id = ?1";
const DELETE_SCHEDULE_SQL: &str = "DELETE FROM schedules WHERE id = ?1";
const SELECT_SUMMARIES_BY_USER_SQL: &str = "SELECT id, name, start_date, is_active, is_loop, created_at, step_count, total_weeks FROM schedule_summaries WHERE user_id = ?1 ORDER BY is_active DESC, start_date DESC, id DESC";

impl super::Database {
    /// Helper function to construct a Schedule without steps from a row
    /// selected with [`SCHEDULE_COLUMNS`].
    fn build_schedule_from_row(row: &rusqlite::Row) -> rusqlite::Result<Schedule> {
        Ok(Schedule {
            id: id_column(row, 0)?,
            user_id: id_column(row, 1)?,
            name: row.get(2)?,
            start_date: date_column(row, 3)?,
            is_active: row.get(4)?,
            is_loop: row.get(5)?,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
            steps: Vec::new(),
        })
    }

    fn query_schedule(conn: &Connection, id: u64) -> Result<Option<Schedule>> {
        conn.query_row(
            &format!("SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE id = ?1"),
            params![id as i64],
            Self::build_schedule_from_row,
        )
        .optional()
        .db_context("Failed to query schedule")
    }

    /// Clears the active flag on every other schedule of `user_id`.
    fn deactivate_others(conn: &Connection, user_id: u64, keep_id: i64, now: &str) -> Result<()> {
        let deactivated = conn
            .execute(
                DEACTIVATE_OTHER_SCHEDULES_SQL,
                params![now, user_id as i64, keep_id],
            )
            .db_context("Failed to deactivate schedules")?;

        if deactivated > 0 {
            log::debug!("deactivated {deactivated} schedule(s) of user {user_id}");
        }

        Ok(())
    }

    /// Creates a new schedule. When `is_active` is set, every other schedule
    /// of the user is deactivated in the same transaction.
    pub fn create_schedule(
        &mut self,
        user_id: u64,
        name: &str,
        start_date: Date,
        is_active: bool,
        is_loop: bool,
    ) -> Result<Schedule> {
        if name.trim().is_empty() {
            return Err(ManagerError::invalid_input(
                "name",
                "Schedule name cannot be empty",
            ));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        if is_active {
            // No schedule has id 0, so this deactivates all of them
            Self::deactivate_others(&tx, user_id, 0, &now_str)?;
        }

        tx.execute(
            INSERT_SCHEDULE_SQL,
            params![
                user_id as i64,
                name,
                start_date.to_string(),
                is_active,
                is_loop,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert schedule")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Schedule {
            id,
            user_id,
            name: name.to_string(),
            start_date,
            is_active,
            is_loop,
            created_at: now,
            updated_at: now,
            steps: Vec::new(),
        })
    }

    /// Retrieves a schedule with its steps.
    pub fn get_schedule(&self, id: u64) -> Result<Option<Schedule>> {
        let mut schedule = Self::query_schedule(&self.connection, id)?;

        // Eagerly load steps if the schedule exists
        if let Some(ref mut schedule) = schedule {
            schedule.steps = self.get_steps(schedule.id)?;
        }

        Ok(schedule)
    }

    /// Retrieves a schedule, failing with `ScheduleNotFound` if it is missing.
    pub fn require_schedule(&self, id: u64) -> Result<Schedule> {
        self.get_schedule(id)?
            .ok_or(ManagerError::ScheduleNotFound { id })
    }

    /// The user's active schedule with its steps, if any.
    pub fn get_active_schedule(&self, user_id: u64) -> Result<Option<Schedule>> {
        let mut schedule = self
            .connection
            .query_row(
                &format!(
                    "SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE user_id = ?1 AND is_active = 1"
                ),
                params![user_id as i64],
                Self::build_schedule_from_row,
            )
            .optional()
            .db_context("Failed to query active schedule")?;

        if let Some(ref mut schedule) = schedule {
            schedule.steps = self.get_steps(schedule.id)?;
        }

        Ok(schedule)
    }

    /// Overview rows of the user's schedules, active first, then by start
    /// date descending.
    pub fn list_schedule_summaries(&self, user_id: u64) -> Result<Vec<ScheduleSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SUMMARIES_BY_USER_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map(params![user_id as i64], |row| {
                let start_date = date_column(row, 2)?;
                let is_loop: bool = row.get(4)?;
                let total_weeks = row.get::<_, i64>(7)? as u64;

                Ok(ScheduleSummary {
                    id: id_column(row, 0)?,
                    name: row.get(1)?,
                    start_date,
                    is_active: row.get(3)?,
                    is_loop,
                    created_at: timestamp_column(row, 5)?,
                    step_count: row.get::<_, i64>(6)? as u32,
                    total_weeks,
                    end_date: (!is_loop).then(|| resolver::weeks_after(start_date, total_weeks)),
                })
            })
            .db_context("Failed to query schedules")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch schedules")?;

        Ok(summaries)
    }

    /// Applies the changes in `request` and returns the updated schedule.
    pub fn update_schedule(&mut self, id: u64, request: UpdateScheduleRequest) -> Result<Schedule> {
        if let Some(ref name) = request.name
            && name.trim().is_empty()
        {
            return Err(ManagerError::invalid_input(
                "name",
                "Schedule name cannot be empty",
            ));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current =
            Self::query_schedule(&tx, id)?.ok_or(ManagerError::ScheduleNotFound { id })?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        let updated = Schedule {
            name: request.name.unwrap_or(current.name),
            start_date: request.start_date.unwrap_or(current.start_date),
            is_active: request.is_active.unwrap_or(current.is_active),
            is_loop: request.is_loop.unwrap_or(current.is_loop),
            updated_at: now,
            ..current
        };

        if updated.is_active {
            Self::deactivate_others(&tx, updated.user_id, id as i64, &now_str)?;
        }

        tx.execute(
            UPDATE_SCHEDULE_SQL,
            params![
                &updated.name,
                updated.start_date.to_string(),
                updated.is_active,
                updated.is_loop,
                &now_str,
                id as i64
            ],
        )
        .db_context("Failed to update schedule")?;

        tx.commit().db_context("Failed to commit transaction")?;

        let mut updated = updated;
        updated.steps = self.get_steps(id)?;

        Ok(updated)
    }

    /// Makes the schedule the user's active one, restarting it on `today`.
    ///
    /// All other schedules of the owner are deactivated in the same
    /// transaction, so the user ends up with exactly this schedule active.
    pub fn activate_schedule(&mut self, id: u64, today: Date) -> Result<Schedule> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let schedule =
            Self::query_schedule(&tx, id)?.ok_or(ManagerError::ScheduleNotFound { id })?;

        let now_str = Timestamp::now().to_string();

        // Deactivate first so the partial unique index never sees two
        // active rows
        Self::deactivate_others(&tx, schedule.user_id, id as i64, &now_str)?;

        tx.execute(
            ACTIVATE_SCHEDULE_SQL,
            params![today.to_string(), &now_str, id as i64],
        )
        .db_context("Failed to activate schedule")?;

        tx.commit().db_context("Failed to commit transaction")?;

        log::info!(
            "activated schedule {id} for user {} starting {today}",
            schedule.user_id
        );

        self.require_schedule(id)
    }

    /// Permanently deletes a schedule and its steps. Returns the deleted
    /// schedule.
    pub fn delete_schedule(&mut self, id: u64) -> Result<Schedule> {
        let schedule = self.require_schedule(id)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_SCHEDULE_STEPS_SQL, params![id as i64])
            .db_context("Failed to delete schedule steps")?;

        let affected = tx
            .execute(DELETE_SCHEDULE_SQL, params![id as i64])
            .db_context("Failed to delete schedule")?;

        if affected == 0 {
            return Err(ManagerError::ScheduleNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(schedule)
    }
}
