//! Training log operations for the Manager.
//!
//! Every write here invalidates the cached calendar of each month it
//! touches.

use jiff::civil::Date;

use super::{Manager, today};
use crate::{
    access::{Action, UserId, authorize},
    cache::CacheKey,
    error::Result,
    models::{WorkoutLog, WorkoutLogBook, WorkoutSession},
    params::{Id, LogSession, UpdateLog},
};

impl Manager {
    fn invalidate_month(&self, user: UserId, date: Date) {
        self.cache
            .invalidate(&CacheKey::workout_log(user, date.year(), date.month()));
    }

    /// Logs a training session of a workout. The date defaults to today.
    ///
    /// The user's existing session for that day is reused. Entries without a
    /// name or without both reps and weight are skipped.
    pub async fn log_session(
        &self,
        user: UserId,
        params: &LogSession,
    ) -> Result<(WorkoutSession, Vec<WorkoutLog>)> {
        let (date, impression) = params.validate()?;
        let date = date.unwrap_or_else(today);
        let workout_id = params.workout_id;
        let notes = params
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from);
        let entries = params.entries.clone();

        let logged = self
            .with_db(move |db| {
                let workout = db.require_workout(workout_id)?;
                authorize(user, &workout, Action::Log)?;
                db.log_session(
                    user,
                    workout_id,
                    date,
                    impression,
                    notes.as_deref(),
                    &entries,
                )
            })
            .await?;

        self.invalidate_month(user, date);

        Ok(logged)
    }

    /// Edits a single log entry and returns the updated entry.
    pub async fn update_log(&self, user: UserId, params: &UpdateLog) -> Result<WorkoutLog> {
        let log_id = params.id;
        let mut request = params.validate()?;
        if let Some(exercise) = request.exercise.as_mut() {
            *exercise = exercise.trim().to_string();
        }

        let (previous_date, updated) = self
            .with_db(move |db| {
                let log = db.require_log(log_id)?;
                authorize(user, &log, Action::Edit)?;
                let updated = db.update_log(log_id, request)?;
                Ok((log.date, updated))
            })
            .await?;

        self.invalidate_month(user, previous_date);
        self.invalidate_month(user, updated.date);

        Ok(updated)
    }

    /// Deletes a single log entry. Returns the deleted entry.
    pub async fn delete_log(&self, user: UserId, params: &Id) -> Result<WorkoutLog> {
        let log_id = params.id;

        let deleted = self
            .with_db(move |db| {
                let log = db.require_log(log_id)?;
                authorize(user, &log, Action::Delete)?;
                db.delete_log(log_id)
            })
            .await?;

        self.invalidate_month(user, deleted.date);

        Ok(deleted)
    }

    /// All logs of a workout grouped by exercise and date.
    pub async fn workout_log(&self, user: UserId, params: &Id) -> Result<WorkoutLogBook> {
        let workout_id = params.id;

        self.with_db(move |db| {
            let workout = db.require_workout(workout_id)?;
            authorize(user, &workout, Action::View)?;
            let logs = db.logs_for_workout(workout_id)?;
            Ok(WorkoutLogBook::new(workout, logs))
        })
        .await
    }
}
