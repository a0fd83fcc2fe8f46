//! Schedule step operations for the Manager.
//!
//! Every step operation needs edit permission on the owning schedule. Steps
//! referencing a workout additionally need the workout to be visible to the
//! user.

use super::Manager;
use crate::{
    access::{Action, UserId, authorize},
    db::Database,
    error::{ManagerError, Result},
    models::{ScheduleStep, UpdateStepRequest},
    params::{Id, InsertStep, StepCreate, SwapSteps, UpdateStep},
};

/// Authorizes editing the schedule and using the workout.
fn authorize_step_write(
    db: &Database,
    user: UserId,
    schedule_id: u64,
    workout_id: Option<u64>,
) -> Result<()> {
    let schedule = db.require_schedule(schedule_id)?;
    authorize(user, &schedule, Action::Edit)?;

    if let Some(workout_id) = workout_id {
        let workout = db.require_workout(workout_id)?;
        authorize(user, &workout, Action::View)?;
    }

    Ok(())
}

impl Manager {
    /// Appends a step to the end of a schedule.
    pub async fn add_step(&self, user: UserId, params: &StepCreate) -> Result<ScheduleStep> {
        let StepCreate {
            schedule_id,
            workout_id,
            duration,
        } = *params;

        self.with_db(move |db| {
            authorize_step_write(db, user, schedule_id, Some(workout_id))?;
            db.add_step(schedule_id, workout_id, duration)
        })
        .await
    }

    /// Inserts a step at a position, shifting later steps back.
    pub async fn insert_step(&self, user: UserId, params: &InsertStep) -> Result<ScheduleStep> {
        let StepCreate {
            schedule_id,
            workout_id,
            duration,
        } = params.step;
        let position = params.position;

        self.with_db(move |db| {
            authorize_step_write(db, user, schedule_id, Some(workout_id))?;
            db.insert_step(schedule_id, position, workout_id, duration)
        })
        .await
    }

    /// Retrieves a step.
    pub async fn get_step(&self, user: UserId, params: &Id) -> Result<ScheduleStep> {
        let step_id = params.id;

        self.with_db(move |db| {
            let step = db.require_step(step_id)?;
            let schedule = db.require_schedule(step.schedule_id)?;
            authorize(user, &schedule, Action::View)?;
            Ok(step)
        })
        .await
    }

    /// Changes a step's workout or duration and returns the updated step.
    pub async fn update_step(&self, user: UserId, params: &UpdateStep) -> Result<ScheduleStep> {
        let step_id = params.id;
        let request: UpdateStepRequest = params.into();

        self.with_db(move |db| {
            let step = db.require_step(step_id)?;
            authorize_step_write(db, user, step.schedule_id, request.workout_id)?;
            db.update_step(step_id, request)?;
            db.require_step(step_id)
        })
        .await
    }

    /// Swaps the positions of two steps of the same schedule.
    pub async fn swap_steps(&self, user: UserId, params: &SwapSteps) -> Result<()> {
        let SwapSteps { step1_id, step2_id } = *params;

        self.with_db(move |db| {
            let first = db.require_step(step1_id)?;
            let second = db.require_step(step2_id)?;

            if first.schedule_id != second.schedule_id {
                return Err(ManagerError::invalid_input(
                    "step_ids",
                    "Steps must be from the same schedule to swap",
                ));
            }

            authorize_step_write(db, user, first.schedule_id, None)?;
            db.swap_steps(step1_id, step2_id)
        })
        .await
    }

    /// Removes a step. Returns the removed step.
    pub async fn remove_step(&self, user: UserId, params: &Id) -> Result<ScheduleStep> {
        let step_id = params.id;

        self.with_db(move |db| {
            let step = db.require_step(step_id)?;
            authorize_step_write(db, user, step.schedule_id, None)?;
            db.remove_step(step_id)?;
            Ok(step)
        })
        .await
    }
}
