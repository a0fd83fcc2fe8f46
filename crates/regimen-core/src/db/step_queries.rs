//! Schedule step CRUD operations and queries.
//!
//! Step order within a schedule is kept unique and contiguous (`0..n`) by
//! every write in this module.

use jiff::Timestamp;
use rusqlite::{Connection, OptionalExtension, params};

use super::utils::id_column;
use crate::{
    error::{DatabaseResultExt, ManagerError, Result},
    models::{ScheduleStep, UpdateStepRequest},
};

const SELECT_SCHEDULE_OWNER_SQL: &str = "SELECT user_id FROM schedules WHERE id = ?1";
const SELECT_WORKOUT_OWNER_SQL: &str = "SELECT user_id FROM workouts WHERE id = ?1";
const GET_NEXT_STEP_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(step_order), -1) + 1 FROM schedule_steps WHERE schedule_id = ?1";
const INSERT_STEP_SQL: &str = "INSERT INTO schedule_steps (schedule_id, workout_id, duration, step_order) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_SCHEDULE_TIMESTAMP_SQL: &str = "UPDATE schedules SET updated_at = ?1 WHERE id = ?2";
// Shifting in two passes through negative values keeps the unique
// (schedule_id, step_order) index satisfied after every row update
const UPDATE_STEP_ORDERS_SHIFT_OUT_SQL: &str = "UPDATE schedule_steps SET step_order = -step_order - 2 WHERE schedule_id = ?1 AND step_order >= ?2";
const UPDATE_STEP_ORDERS_SHIFT_IN_SQL: &str = "UPDATE schedule_steps SET step_order = -step_order - 1 WHERE schedule_id = ?1 AND step_order < 0";
const UPDATE_STEP_ORDERS_NEGATE_SQL: &str =
    "UPDATE schedule_steps SET step_order = -1 - step_order WHERE schedule_id = ?1";
const SELECT_STEP_IDS_IN_ORDER_SQL: &str =
    "SELECT id FROM schedule_steps WHERE schedule_id = ?1 ORDER BY step_order DESC, id";
const SELECT_STEP_DETAILS_SQL: &str =
    "SELECT schedule_id, workout_id, duration FROM schedule_steps WHERE id = ?1";
const UPDATE_STEP_SQL: &str = "UPDATE schedule_steps SET workout_id = ?1, duration = ?2 WHERE id = ?3";
const SELECT_STEPS_BY_SCHEDULE_SQL: &str = "SELECT st.id, st.schedule_id, st.workout_id, w.name, st.duration, st.step_order FROM schedule_steps st JOIN workouts w ON w.id = st.workout_id WHERE st.schedule_id = ?1 ORDER BY st.step_order, st.id";
const SELECT_STEP_BY_ID_SQL: &str = "SELECT st.id, st.schedule_id, st.workout_id, w.name, st.duration, st.step_order FROM schedule_steps st JOIN workouts w ON w.id = st.workout_id WHERE st.id = ?1";
const SELECT_STEP_ORDER_SQL: &str = "SELECT schedule_id, step_order FROM schedule_steps WHERE id = ?1";
const UPDATE_STEP_ORDER_TEMP_SQL: &str = "UPDATE schedule_steps SET step_order = -1 WHERE id = ?1";
const UPDATE_STEP_ORDER_SQL: &str = "UPDATE schedule_steps SET step_order = ?1 WHERE id = ?2";
const DELETE_STEP_SQL: &str = "DELETE FROM schedule_steps WHERE id = ?1";

/// Rejects durations shorter than one week.
pub(crate) fn validate_duration(duration: u32) -> Result<()> {
    if duration == 0 {
        return Err(ManagerError::invalid_input(
            "duration",
            "Step duration must be at least one week",
        ));
    }
    Ok(())
}

impl super::Database {
    /// Helper function to construct a ScheduleStep from a database row
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<ScheduleStep> {
        Ok(ScheduleStep {
            id: id_column(row, 0)?,
            schedule_id: id_column(row, 1)?,
            workout_id: id_column(row, 2)?,
            workout_name: row.get(3)?,
            duration: row.get::<_, i64>(4)? as u32,
            order: row.get::<_, i64>(5)? as u32,
        })
    }

    /// Checks that the schedule and workout exist and share an owner.
    fn check_step_references(conn: &Connection, schedule_id: u64, workout_id: u64) -> Result<()> {
        let schedule_owner: i64 = conn
            .query_row(SELECT_SCHEDULE_OWNER_SQL, params![schedule_id as i64], |row| {
                row.get(0)
            })
            .map_err(ManagerError::not_found_or(
                ManagerError::ScheduleNotFound { id: schedule_id },
                "Failed to check schedule existence",
            ))?;

        let workout_owner: i64 = conn
            .query_row(SELECT_WORKOUT_OWNER_SQL, params![workout_id as i64], |row| {
                row.get(0)
            })
            .map_err(ManagerError::not_found_or(
                ManagerError::WorkoutNotFound { id: workout_id },
                "Failed to check workout existence",
            ))?;

        if schedule_owner != workout_owner {
            return Err(ManagerError::invalid_input(
                "workout_id",
                format!("Workout {workout_id} does not belong to the owner of schedule {schedule_id}"),
            ));
        }

        Ok(())
    }

    fn touch_schedule(conn: &Connection, schedule_id: u64) -> Result<()> {
        conn.execute(
            UPDATE_SCHEDULE_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), schedule_id as i64],
        )
        .db_context("Failed to update schedule timestamp")?;
        Ok(())
    }

    /// Renumbers the steps of a schedule to `0..n`, keeping their relative
    /// order.
    pub(crate) fn compact_step_orders(conn: &Connection, schedule_id: u64) -> Result<()> {
        // Negating reverses the order, so read the ids back in descending
        // order to restore it
        conn.execute(UPDATE_STEP_ORDERS_NEGATE_SQL, params![schedule_id as i64])
            .db_context("Failed to prepare step renumbering")?;

        let ids: Vec<i64> = {
            let mut stmt = conn
                .prepare(SELECT_STEP_IDS_IN_ORDER_SQL)
                .db_context("Failed to prepare query")?;
            let ids = stmt
                .query_map(params![schedule_id as i64], |row| row.get(0))
                .db_context("Failed to query step ids")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch step ids")?;
            ids
        };

        for (position, id) in ids.into_iter().enumerate() {
            conn.execute(UPDATE_STEP_ORDER_SQL, params![position as i64, id])
                .db_context("Failed to renumber step")?;
        }

        Ok(())
    }

    /// Appends a step to the end of the schedule.
    pub fn add_step(
        &mut self,
        schedule_id: u64,
        workout_id: u64,
        duration: u32,
    ) -> Result<ScheduleStep> {
        validate_duration(duration)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::check_step_references(&tx, schedule_id, workout_id)?;

        let next_order: i64 = tx
            .query_row(GET_NEXT_STEP_ORDER_SQL, params![schedule_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next step order")?;

        tx.execute(
            INSERT_STEP_SQL,
            params![
                schedule_id as i64,
                workout_id as i64,
                duration as i64,
                next_order
            ],
        )
        .db_context("Failed to insert step")?;

        let id = tx.last_insert_rowid() as u64;

        Self::touch_schedule(&tx, schedule_id)?;

        let step = tx
            .query_row(SELECT_STEP_BY_ID_SQL, params![id as i64], Self::build_step_from_row)
            .db_context("Failed to load inserted step")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(step)
    }

    /// Inserts a step at `position`, shifting the steps at or after it.
    /// `position` may equal the step count to append.
    pub fn insert_step(
        &mut self,
        schedule_id: u64,
        position: u32,
        workout_id: u64,
        duration: u32,
    ) -> Result<ScheduleStep> {
        validate_duration(duration)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::check_step_references(&tx, schedule_id, workout_id)?;

        let step_count: i64 = tx
            .query_row(GET_NEXT_STEP_ORDER_SQL, params![schedule_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to count steps")?;

        if i64::from(position) > step_count {
            return Err(ManagerError::invalid_input(
                "position",
                format!("Position {position} is out of range. Schedule has {step_count} steps"),
            ));
        }

        tx.execute(
            UPDATE_STEP_ORDERS_SHIFT_OUT_SQL,
            params![schedule_id as i64, position as i64],
        )
        .db_context("Failed to shift step orders")?;
        tx.execute(UPDATE_STEP_ORDERS_SHIFT_IN_SQL, params![schedule_id as i64])
            .db_context("Failed to shift step orders")?;

        tx.execute(
            INSERT_STEP_SQL,
            params![
                schedule_id as i64,
                workout_id as i64,
                duration as i64,
                position as i64
            ],
        )
        .db_context("Failed to insert step")?;

        let id = tx.last_insert_rowid() as u64;

        Self::touch_schedule(&tx, schedule_id)?;

        let step = tx
            .query_row(SELECT_STEP_BY_ID_SQL, params![id as i64], Self::build_step_from_row)
            .db_context("Failed to load inserted step")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(step)
    }

    /// Changes the workout or duration of a step.
    pub fn update_step(&mut self, step_id: u64, request: UpdateStepRequest) -> Result<()> {
        if let Some(duration) = request.duration {
            validate_duration(duration)?;
        }

        if request.is_empty() {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (schedule_id, current_workout, current_duration): (i64, i64, i64) = tx
            .query_row(SELECT_STEP_DETAILS_SQL, params![step_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .map_err(ManagerError::not_found_or(
                ManagerError::StepNotFound { id: step_id },
                "Failed to get current step",
            ))?;

        let new_workout = request.workout_id.map(|id| id as i64).unwrap_or(current_workout);
        let new_duration = request
            .duration
            .map(i64::from)
            .unwrap_or(current_duration);

        if request.workout_id.is_some() {
            Self::check_step_references(&tx, schedule_id as u64, new_workout as u64)?;
        }

        tx.execute(
            UPDATE_STEP_SQL,
            params![new_workout, new_duration, step_id as i64],
        )
        .db_context("Failed to update step")?;

        Self::touch_schedule(&tx, schedule_id as u64)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Retrieves all steps of a schedule in order.
    pub fn get_steps(&self, schedule_id: u64) -> Result<Vec<ScheduleStep>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_BY_SCHEDULE_SQL)
            .db_context("Failed to prepare query")?;

        let steps = stmt
            .query_map(params![schedule_id as i64], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")?;

        Ok(steps)
    }

    /// Retrieves a single step by its ID.
    pub fn get_step(&self, step_id: u64) -> Result<Option<ScheduleStep>> {
        self.connection
            .query_row(
                SELECT_STEP_BY_ID_SQL,
                params![step_id as i64],
                Self::build_step_from_row,
            )
            .optional()
            .db_context("Failed to get step")
    }

    /// Retrieves a step, failing with `StepNotFound` if it is missing.
    pub fn require_step(&self, step_id: u64) -> Result<ScheduleStep> {
        self.get_step(step_id)?
            .ok_or(ManagerError::StepNotFound { id: step_id })
    }

    /// Swaps the order of two steps within the same schedule.
    pub fn swap_steps(&mut self, step_id1: u64, step_id2: u64) -> Result<()> {
        if step_id1 == step_id2 {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (schedule_id1, order1): (i64, i64) = tx
            .query_row(SELECT_STEP_ORDER_SQL, params![step_id1 as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(ManagerError::not_found_or(
                ManagerError::StepNotFound { id: step_id1 },
                "Failed to query first step",
            ))?;

        let (schedule_id2, order2): (i64, i64) = tx
            .query_row(SELECT_STEP_ORDER_SQL, params![step_id2 as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(ManagerError::not_found_or(
                ManagerError::StepNotFound { id: step_id2 },
                "Failed to query second step",
            ))?;

        if schedule_id1 != schedule_id2 {
            return Err(ManagerError::invalid_input(
                "step_ids",
                "Steps must be from the same schedule to swap",
            ));
        }

        // Use a temporary negative value to avoid unique constraint violation
        tx.execute(UPDATE_STEP_ORDER_TEMP_SQL, params![step_id1 as i64])
            .db_context("Failed to update first step order")?;
        tx.execute(UPDATE_STEP_ORDER_SQL, params![order1, step_id2 as i64])
            .db_context("Failed to update second step order")?;
        tx.execute(UPDATE_STEP_ORDER_SQL, params![order2, step_id1 as i64])
            .db_context("Failed to update first step final order")?;

        Self::touch_schedule(&tx, schedule_id1 as u64)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Removes a step and closes the gap it leaves.
    pub fn remove_step(&mut self, step_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (schedule_id, _order): (i64, i64) = tx
            .query_row(SELECT_STEP_ORDER_SQL, params![step_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(ManagerError::not_found_or(
                ManagerError::StepNotFound { id: step_id },
                "Failed to query step",
            ))?;

        tx.execute(DELETE_STEP_SQL, params![step_id as i64])
            .db_context("Failed to delete step")?;

        Self::compact_step_orders(&tx, schedule_id as u64)?;
        Self::touch_schedule(&tx, schedule_id as u64)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
