//! Command handlers for the CLI.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! manager as the `--user` given on the command line and renders the
//! markdown `Display` output of the result.

use anyhow::{Context, Result};
use log::debug;
use regimen_core::{
    CreateResult, DeleteResult, LoggedSession, Manager, OperationStatus, UpdateResult, UserId,
    params::{CalendarQuery, Id, LogSession, SwapSteps, UpdateLog, UpdateSchedule, UpdateStep},
};

use crate::{
    args::{LogCommands, ReportArgs, ScheduleCommands, StepCommands, WorkoutCommands},
    renderer::TerminalRenderer,
};

/// CLI runner holding the manager, the acting user and the renderer
pub struct Cli {
    manager: Manager,
    user: UserId,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(manager: Manager, user: UserId, renderer: TerminalRenderer) -> Self {
        Self {
            manager,
            user,
            renderer,
        }
    }

    fn render(&self, output: impl std::fmt::Display) -> Result<()> {
        self.renderer.render(&output.to_string())
    }

    pub async fn handle_schedule_command(&self, command: ScheduleCommands) -> Result<()> {
        match command {
            ScheduleCommands::Create(args) => {
                let schedule = self
                    .manager
                    .create_schedule(self.user, &args.into())
                    .await
                    .context("Failed to create schedule")?;
                self.render(CreateResult::new(schedule))
            }
            ScheduleCommands::List => self.list_schedules().await,
            ScheduleCommands::Show(args) => {
                let schedule = self
                    .manager
                    .get_schedule(self.user, &args.into())
                    .await
                    .context("Failed to get schedule")?;
                self.render(schedule)
            }
            ScheduleCommands::Edit(args) => self.edit_schedule(args.into()).await,
            ScheduleCommands::Delete(args) => {
                let schedule = self
                    .manager
                    .delete_schedule(self.user, &args.into())
                    .await
                    .context("Failed to delete schedule")?;
                self.render(DeleteResult::new(schedule))
            }
            ScheduleCommands::Start(args) => {
                let schedule = self
                    .manager
                    .start_schedule(self.user, &args.into())
                    .await
                    .context("Failed to start schedule")?;
                self.render(OperationStatus::success(format!(
                    "Started schedule '{}' (ID: {}) today. Any other schedule is now inactive.",
                    schedule.name, schedule.id
                )))?;
                self.current_workout().await
            }
            ScheduleCommands::Report(args) => self.schedule_report(args).await,
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Add(args) => {
                let step = self
                    .manager
                    .add_step(self.user, &args.into())
                    .await
                    .context("Failed to add step")?;
                self.render(CreateResult::new(step))
            }
            StepCommands::Insert(args) => {
                let step = self
                    .manager
                    .insert_step(self.user, &args.into())
                    .await
                    .context("Failed to insert step")?;
                self.render(CreateResult::new(step))
            }
            StepCommands::Update(args) => {
                let params: UpdateStep = args.into();
                let mut changes = Vec::new();
                if let Some(workout_id) = params.workout_id {
                    changes.push(format!("workout: {workout_id}"));
                }
                if let Some(duration) = params.duration {
                    changes.push(format!("duration: {duration} weeks"));
                }

                let step = self
                    .manager
                    .update_step(self.user, &params)
                    .await
                    .context("Failed to update step")?;
                self.render(UpdateResult::with_changes(step, changes))
            }
            StepCommands::Swap(args) => {
                let params: SwapSteps = args.into();
                self.manager
                    .swap_steps(self.user, &params)
                    .await
                    .context("Failed to swap steps")?;
                self.render(OperationStatus::success(format!(
                    "Swapped steps {} and {}",
                    params.step1_id, params.step2_id
                )))
            }
            StepCommands::Remove(args) => {
                let step = self
                    .manager
                    .remove_step(self.user, &args.into())
                    .await
                    .context("Failed to remove step")?;
                self.render(DeleteResult::new(step))
            }
        }
    }

    pub async fn handle_workout_command(&self, command: WorkoutCommands) -> Result<()> {
        match command {
            WorkoutCommands::Create(args) => {
                let workout = self
                    .manager
                    .create_workout(self.user, &args.into())
                    .await
                    .context("Failed to create workout")?;
                self.render(CreateResult::new(workout))
            }
            WorkoutCommands::List => {
                let workouts = self
                    .manager
                    .list_workouts_summary(self.user)
                    .await
                    .context("Failed to list workouts")?;
                self.render(format!("# Workouts\n\n{workouts}"))
            }
            WorkoutCommands::Show(args) => {
                let workout = self
                    .manager
                    .get_workout(self.user, &args.into())
                    .await
                    .context("Failed to get workout")?;
                self.render(workout)
            }
            WorkoutCommands::Delete(args) => {
                let workout = self
                    .manager
                    .delete_workout(self.user, &args.into())
                    .await
                    .context("Failed to delete workout")?;
                self.render(DeleteResult::new(workout))
            }
            WorkoutCommands::Current => self.current_workout().await,
        }
    }

    pub async fn handle_log_command(&self, command: LogCommands) -> Result<()> {
        match command {
            LogCommands::Add(args) => {
                let params: LogSession = args.into();
                debug!(
                    "logging {} entries for workout {}",
                    params.entries.len(),
                    params.workout_id
                );
                let logged = self
                    .manager
                    .log_session(self.user, &params)
                    .await
                    .context("Failed to log session")?;
                self.render(LoggedSession::from(logged))
            }
            LogCommands::Edit(args) => {
                let params: UpdateLog = args.into();
                let log = self
                    .manager
                    .update_log(self.user, &params)
                    .await
                    .context("Failed to edit log entry")?;
                self.render(UpdateResult::new(log))
            }
            LogCommands::Delete(args) => {
                let log = self
                    .manager
                    .delete_log(self.user, &args.into())
                    .await
                    .context("Failed to delete log entry")?;
                self.render(DeleteResult::new(log))
            }
            LogCommands::Show(args) => {
                let book = self
                    .manager
                    .workout_log(self.user, &args.into())
                    .await
                    .context("Failed to load workout log")?;
                self.render(book)
            }
        }
    }

    pub async fn calendar(&self, query: &CalendarQuery) -> Result<()> {
        let view = self
            .manager
            .calendar(self.user, query)
            .await
            .context("Failed to build calendar")?;
        self.render(view)
    }

    /// Shows the workout due today. This is also what runs without a command.
    pub async fn current_workout(&self) -> Result<()> {
        let current = self
            .manager
            .current_workout(self.user)
            .await
            .context("Failed to resolve current workout")?;
        self.render(current)
    }

    async fn list_schedules(&self) -> Result<()> {
        let summaries = self
            .manager
            .list_schedules_summary(self.user)
            .await
            .context("Failed to list schedules")?;
        self.render(format!("# Schedules\n\n{summaries}"))
    }

    async fn edit_schedule(&self, params: UpdateSchedule) -> Result<()> {
        let mut changes = Vec::new();
        if let Some(name) = &params.name {
            changes.push(format!("name: {name}"));
        }
        if let Some(start_date) = &params.start_date {
            changes.push(format!("start date: {start_date}"));
        }
        if let Some(active) = params.is_active {
            changes.push(if active { "activated" } else { "deactivated" }.to_string());
        }
        if let Some(is_loop) = params.is_loop {
            changes.push(if is_loop { "looping" } else { "not looping" }.to_string());
        }

        let schedule = self
            .manager
            .update_schedule(self.user, &params)
            .await
            .context("Failed to update schedule")?;
        self.render(UpdateResult::with_changes(schedule, changes))
    }

    async fn schedule_report(&self, args: ReportArgs) -> Result<()> {
        let report = self
            .manager
            .schedule_report(self.user, &Id { id: args.id })
            .await
            .context("Failed to build schedule report")?;

        if args.json {
            // JSON is meant for piping, never styled
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
            Ok(())
        } else {
            self.render(report)
        }
    }
}
