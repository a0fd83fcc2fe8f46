//! Schedule operations for the Manager.

use super::{Manager, today};
use crate::{
    access::{Action, UserId, authorize},
    error::{ManagerError, Result},
    models::{Schedule, ScheduleSummary},
    params::{CreateSchedule, DeleteSchedule, Id, UpdateSchedule},
};

impl Manager {
    /// Creates a schedule owned by `user`. The start date defaults to today.
    ///
    /// Creating an active schedule deactivates the user's other schedules.
    pub async fn create_schedule(&self, user: UserId, params: &CreateSchedule) -> Result<Schedule> {
        let start_date = params.validate()?.unwrap_or_else(today);
        let name = params.name.trim().to_string();
        let is_active = params.is_active;
        let is_loop = params.is_loop;

        log::debug!("user {user} creating schedule '{name}'");

        self.with_db(move |db| db.create_schedule(user, &name, start_date, is_active, is_loop))
            .await
    }

    /// Retrieves a schedule with its steps.
    pub async fn get_schedule(&self, user: UserId, params: &Id) -> Result<Schedule> {
        let schedule_id = params.id;

        self.with_db(move |db| {
            let schedule = db.require_schedule(schedule_id)?;
            authorize(user, &schedule, Action::View)?;
            Ok(schedule)
        })
        .await
    }

    /// Lists the user's schedules, active first, then newest start date.
    pub async fn list_schedules(&self, user: UserId) -> Result<Vec<ScheduleSummary>> {
        self.with_db(move |db| db.list_schedule_summaries(user))
            .await
    }

    /// Applies a partial update to a schedule.
    pub async fn update_schedule(&self, user: UserId, params: &UpdateSchedule) -> Result<Schedule> {
        let schedule_id = params.id;
        let mut request = params.validate()?;
        if let Some(name) = request.name.as_mut() {
            *name = name.trim().to_string();
        }

        self.with_db(move |db| {
            let schedule = db.require_schedule(schedule_id)?;
            authorize(user, &schedule, Action::Edit)?;
            db.update_schedule(schedule_id, request)
        })
        .await
    }

    /// Permanently deletes a schedule and its steps. Requires
    /// `params.confirmed`.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::InvalidInput` if `confirmed` is false
    pub async fn delete_schedule(&self, user: UserId, params: &DeleteSchedule) -> Result<Schedule> {
        if !params.confirmed {
            return Err(ManagerError::invalid_input(
                "confirmed",
                "Schedule deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.",
            ));
        }

        let schedule_id = params.id;

        self.with_db(move |db| {
            let schedule = db.require_schedule(schedule_id)?;
            authorize(user, &schedule, Action::Delete)?;
            db.delete_schedule(schedule_id)
        })
        .await
    }

    /// Starts a schedule today and makes it the user's only active one.
    pub async fn start_schedule(&self, user: UserId, params: &Id) -> Result<Schedule> {
        self.start_schedule_on(user, params, today()).await
    }

    /// Starts a schedule on `start_date` and makes it the user's only active
    /// one.
    pub async fn start_schedule_on(
        &self,
        user: UserId,
        params: &Id,
        start_date: jiff::civil::Date,
    ) -> Result<Schedule> {
        let schedule_id = params.id;

        self.with_db(move |db| {
            let schedule = db.require_schedule(schedule_id)?;
            authorize(user, &schedule, Action::Start)?;
            db.activate_schedule(schedule_id, start_date)
        })
        .await
    }
}
