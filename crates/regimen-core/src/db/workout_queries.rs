//! Workout CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, params};

use super::utils::{id_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, ManagerError, Result},
    models::Workout,
};

const INSERT_WORKOUT_SQL: &str =
    "INSERT INTO workouts (user_id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_WORKOUT_SQL: &str =
    "SELECT id, user_id, name, description, created_at FROM workouts WHERE id = ?1";
const SELECT_WORKOUTS_BY_USER_SQL: &str = "SELECT id, user_id, name, description, created_at FROM workouts WHERE user_id = ?1 ORDER BY created_at DESC, id DESC";
const SELECT_LATEST_STANDALONE_WORKOUT_SQL: &str = "SELECT w.id, w.user_id, w.name, w.description, w.created_at FROM workouts w \
     WHERE w.user_id = ?1 \
     AND NOT EXISTS (SELECT 1 FROM schedule_steps s WHERE s.workout_id = w.id) \
     ORDER BY w.created_at DESC, w.id DESC LIMIT 1";
const DELETE_WORKOUT_SQL: &str = "DELETE FROM workouts WHERE id = ?1";
const SELECT_SCHEDULES_USING_WORKOUT_SQL: &str =
    "SELECT DISTINCT schedule_id FROM schedule_steps WHERE workout_id = ?1";

impl super::Database {
    /// Helper function to construct a Workout from a database row
    fn build_workout_from_row(row: &rusqlite::Row) -> rusqlite::Result<Workout> {
        Ok(Workout {
            id: id_column(row, 0)?,
            user_id: id_column(row, 1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            created_at: timestamp_column(row, 4)?,
        })
    }

    /// Creates a new workout for `user_id`.
    pub fn create_workout(
        &mut self,
        user_id: u64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Workout> {
        if name.trim().is_empty() {
            return Err(ManagerError::invalid_input(
                "name",
                "Workout name cannot be empty",
            ));
        }

        let now = Timestamp::now();

        self.connection
            .execute(
                INSERT_WORKOUT_SQL,
                params![user_id as i64, name, description, now.to_string()],
            )
            .db_context("Failed to insert workout")?;

        Ok(Workout {
            id: self.connection.last_insert_rowid() as u64,
            user_id,
            name: name.to_string(),
            description: description.map(String::from),
            created_at: now,
        })
    }

    /// Retrieves a workout by its ID.
    pub fn get_workout(&self, id: u64) -> Result<Option<Workout>> {
        self.connection
            .query_row(
                SELECT_WORKOUT_SQL,
                params![id as i64],
                Self::build_workout_from_row,
            )
            .optional()
            .db_context("Failed to query workout")
    }

    /// Retrieves a workout, failing with `WorkoutNotFound` if it is missing.
    pub fn require_workout(&self, id: u64) -> Result<Workout> {
        self.get_workout(id)?
            .ok_or(ManagerError::WorkoutNotFound { id })
    }

    /// Lists a user's workouts, newest first.
    pub fn list_workouts(&self, user_id: u64) -> Result<Vec<Workout>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_WORKOUTS_BY_USER_SQL)
            .db_context("Failed to prepare query")?;

        let workouts = stmt
            .query_map(params![user_id as i64], Self::build_workout_from_row)
            .db_context("Failed to query workouts")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch workouts")?;

        Ok(workouts)
    }

    /// The most recently created workout of the user that no schedule step
    /// references.
    pub fn latest_standalone_workout(&self, user_id: u64) -> Result<Option<Workout>> {
        self.connection
            .query_row(
                SELECT_LATEST_STANDALONE_WORKOUT_SQL,
                params![user_id as i64],
                Self::build_workout_from_row,
            )
            .optional()
            .db_context("Failed to query standalone workout")
    }

    /// Permanently deletes a workout together with the schedule steps,
    /// sessions and logs referencing it.
    pub fn delete_workout(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let schedule_ids: Vec<i64> = {
            let mut stmt = tx
                .prepare(SELECT_SCHEDULES_USING_WORKOUT_SQL)
                .db_context("Failed to prepare query")?;
            let ids = stmt
                .query_map(params![id as i64], |row| row.get(0))
                .db_context("Failed to query schedules using workout")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch schedules using workout")?;
            ids
        };

        let affected = tx
            .execute(DELETE_WORKOUT_SQL, params![id as i64])
            .db_context("Failed to delete workout")?;

        if affected == 0 {
            return Err(ManagerError::WorkoutNotFound { id });
        }

        // Cascading step deletes leave gaps in the affected schedules
        for schedule_id in schedule_ids {
            Self::compact_step_orders(&tx, schedule_id as u64)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
