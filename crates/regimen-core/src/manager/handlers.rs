//! Handler operations that return display wrapper types for the Manager.

use jiff::civil::Date;

use super::{Manager, today};
use crate::{
    access::{Action, UserId, authorize},
    cache::CacheKey,
    db::Database,
    display::{CalendarView, ScheduleReport, ScheduleSummaries, Workouts},
    error::{ManagerError, Result},
    models::{CalendarMonth, CurrentWorkout},
    params::{CalendarQuery, Id},
};

/// Resolves the workout in effect for `user` on `as_of`.
///
/// The active schedule wins when it resolves to a step. Otherwise the
/// user's most recent standalone workout is returned without a schedule.
pub(crate) fn resolve_current_workout(
    db: &Database,
    user: UserId,
    as_of: Date,
) -> Result<CurrentWorkout> {
    if let Some(schedule) = db.get_active_schedule(user)?
        && let Some(step) = schedule.current_step(as_of)
    {
        let workout = db.require_workout(step.workout_id)?;
        return Ok(CurrentWorkout {
            workout: Some(workout),
            schedule: Some(schedule),
        });
    }

    Ok(CurrentWorkout {
        workout: db.latest_standalone_workout(user)?,
        schedule: None,
    })
}

fn build_calendar_month(db: &Database, user: UserId, year: i16, month: i8) -> Result<CalendarMonth> {
    let logs = db.month_logs(user, year, month)?;
    let impressions = db.session_impressions(user, year, month)?;
    Ok(CalendarMonth::from_logs(year, month, &logs, |log| {
        impressions.get(&log.date).copied()
    }))
}

impl Manager {
    /// The workout the user should do today.
    pub async fn current_workout(&self, user: UserId) -> Result<CurrentWorkout> {
        self.current_workout_on(user, today()).await
    }

    /// The workout the user should do on `as_of`.
    pub async fn current_workout_on(&self, user: UserId, as_of: Date) -> Result<CurrentWorkout> {
        self.with_db(move |db| resolve_current_workout(db, user, as_of))
            .await
    }

    /// Handle listing schedules as overview rows.
    pub async fn list_schedules_summary(&self, user: UserId) -> Result<ScheduleSummaries> {
        Ok(ScheduleSummaries(self.list_schedules(user).await?))
    }

    /// Handle listing workouts.
    pub async fn list_workouts_summary(&self, user: UserId) -> Result<Workouts> {
        Ok(Workouts(self.list_workouts(user).await?))
    }

    /// Month calendar of logged days. Omitted year and month default to the
    /// current month.
    pub async fn calendar(&self, user: UserId, params: &CalendarQuery) -> Result<CalendarView> {
        self.calendar_on(user, params, today()).await
    }

    /// Month calendar as seen on `today`.
    ///
    /// The grouped month is served from the cache when present and stored in
    /// it otherwise, unless a log write invalidated the month while it was
    /// being built.
    pub async fn calendar_on(
        &self,
        user: UserId,
        params: &CalendarQuery,
        today: Date,
    ) -> Result<CalendarView> {
        let year = params.year.unwrap_or(today.year());
        let month = params.month.unwrap_or(today.month());

        if !(1..=12).contains(&month) {
            return Err(ManagerError::invalid_input(
                "month",
                format!("Month must be between 1 and 12, got {month}"),
            ));
        }

        let key = CacheKey::workout_log(user, year, month);
        // Read before the logs so a write committing meanwhile is detected
        let generation = self.cache.generation(&key);
        let cached = self.cache.get(&key);
        let have_cached = cached.is_some();

        let (calendar_month, current, log_months) = self
            .with_db(move |db| {
                let calendar_month = match cached {
                    Some(calendar_month) => calendar_month,
                    None => build_calendar_month(db, user, year, month)?,
                };
                let current = resolve_current_workout(db, user, today)?;
                let log_months = db.log_months(user)?;
                Ok((calendar_month, current, log_months))
            })
            .await?;

        if !have_cached {
            self.cache
                .set_if_current(key, generation, calendar_month.clone());
        }

        Ok(CalendarView {
            month: calendar_month,
            today,
            current,
            log_months,
        })
    }

    /// A schedule with the logs of its workouts since its start date.
    pub async fn schedule_report(&self, user: UserId, params: &Id) -> Result<ScheduleReport> {
        let schedule_id = params.id;

        self.with_db(move |db| {
            let schedule = db.require_schedule(schedule_id)?;
            authorize(user, &schedule, Action::View)?;
            let logs = db.logs_for_schedule(schedule.id, schedule.user_id, schedule.start_date)?;
            Ok(ScheduleReport::new(schedule, logs))
        })
        .await
    }
}
