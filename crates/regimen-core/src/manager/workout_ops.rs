//! Workout operations for the Manager.

use std::collections::BTreeSet;

use super::Manager;
use crate::{
    access::{Action, UserId, authorize},
    cache::CacheKey,
    error::{ManagerError, Result},
    models::Workout,
    params::{CreateWorkout, DeleteWorkout, Id},
};

impl Manager {
    /// Creates a workout owned by `user`.
    pub async fn create_workout(&self, user: UserId, params: &CreateWorkout) -> Result<Workout> {
        let name = params.name.trim().to_string();
        let description = params
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        self.with_db(move |db| db.create_workout(user, &name, description.as_deref()))
            .await
    }

    /// Retrieves a workout.
    pub async fn get_workout(&self, user: UserId, params: &Id) -> Result<Workout> {
        let workout_id = params.id;

        self.with_db(move |db| {
            let workout = db.require_workout(workout_id)?;
            authorize(user, &workout, Action::View)?;
            Ok(workout)
        })
        .await
    }

    /// Lists the user's workouts, newest first.
    pub async fn list_workouts(&self, user: UserId) -> Result<Vec<Workout>> {
        self.with_db(move |db| db.list_workouts(user)).await
    }

    /// Permanently deletes a workout together with its schedule steps and
    /// logs. Requires `params.confirmed`.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::InvalidInput` if `confirmed` is false
    pub async fn delete_workout(&self, user: UserId, params: &DeleteWorkout) -> Result<Workout> {
        if !params.confirmed {
            return Err(ManagerError::invalid_input(
                "confirmed",
                "Workout deletion requires explicit confirmation. Set 'confirmed' to true to proceed. Its schedule steps and logs are deleted as well.",
            ));
        }

        let workout_id = params.id;

        let (workout, months) = self
            .with_db(move |db| {
                let workout = db.require_workout(workout_id)?;
                authorize(user, &workout, Action::Delete)?;

                let months: BTreeSet<(i16, i8)> = db
                    .logs_for_workout(workout_id)?
                    .iter()
                    .map(|log| (log.date.year(), log.date.month()))
                    .collect();

                db.delete_workout(workout_id)?;
                Ok((workout, months))
            })
            .await?;

        for (year, month) in months {
            self.cache
                .invalidate(&CacheKey::workout_log(workout.user_id, year, month));
        }

        Ok(workout)
    }
}
