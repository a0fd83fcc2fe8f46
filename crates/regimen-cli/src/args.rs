//! Command-line argument definitions using clap.
//!
//! Every command has its own clap struct converted into the matching
//! `regimen_core::params` type through a `From` impl, so the core parameter
//! types stay free of clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Manager
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use regimen_core::params::*;

/// Workout schedules, training logs and a month calendar of logged days
///
/// Regimen arranges workouts into schedules of weekly steps, tells you which
/// workout is due today and records what you did. It runs as a command-line
/// tool or as an MCP (Model Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "regimen")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/regimen/regimen.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// ID of the acting user
    #[arg(long, global = true, default_value_t = 1)]
    pub user: u64,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without a command the current workout is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage schedules
    #[command(alias = "sc")]
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// Manage the steps of a schedule
    #[command(alias = "st")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage workouts
    #[command(alias = "w")]
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Record and edit training logs
    #[command(alias = "l")]
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
    /// Show a month calendar of logged days
    #[command(alias = "cal")]
    Calendar(CalendarArgs),
    /// Start the MCP server
    Serve,
}

// ============================================================================
// Schedules
// ============================================================================

/// Create a new schedule
#[derive(ClapArgs)]
pub struct CreateScheduleArgs {
    /// Name of the schedule
    pub name: String,
    /// First day of the schedule (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub start_date: Option<String>,
    /// Make this the active schedule, deactivating any other
    #[arg(short, long)]
    pub active: bool,
    /// Repeat the steps once they are exhausted
    #[arg(short = 'l', long = "loop")]
    pub is_loop: bool,
}

impl From<CreateScheduleArgs> for CreateSchedule {
    fn from(val: CreateScheduleArgs) -> Self {
        CreateSchedule {
            name: val.name,
            start_date: val.start_date,
            is_active: val.active,
            is_loop: val.is_loop,
        }
    }
}

/// Identify a resource by its ID
#[derive(ClapArgs)]
pub struct IdArgs {
    /// Unique identifier of the resource
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a schedule
///
/// Only the given fields change. Activating a schedule here keeps its start
/// date; use `schedule start` to restart it today.
#[derive(ClapArgs)]
pub struct EditScheduleArgs {
    /// ID of the schedule to edit
    pub id: u64,
    /// New name
    #[arg(short, long)]
    pub name: Option<String>,
    /// New start date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<String>,
    /// Activate (true) or deactivate (false) the schedule
    #[arg(long)]
    pub active: Option<bool>,
    /// Turn looping on (true) or off (false)
    #[arg(long = "loop")]
    pub is_loop: Option<bool>,
}

impl From<EditScheduleArgs> for UpdateSchedule {
    fn from(val: EditScheduleArgs) -> Self {
        UpdateSchedule {
            id: val.id,
            name: val.name,
            start_date: val.start_date,
            is_active: val.active,
            is_loop: val.is_loop,
        }
    }
}

/// Delete a schedule and its steps permanently
#[derive(ClapArgs)]
pub struct DeleteScheduleArgs {
    /// ID of the schedule to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteScheduleArgs> for DeleteSchedule {
    fn from(val: DeleteScheduleArgs) -> Self {
        DeleteSchedule {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Export a schedule with everything logged for it
#[derive(ClapArgs)]
pub struct ReportArgs {
    /// ID of the schedule to report on
    pub id: u64,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// Create a new schedule
    #[command(alias = "c")]
    Create(CreateScheduleArgs),
    /// List schedules, active first
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a schedule with its steps
    #[command(alias = "s")]
    Show(IdArgs),
    /// Edit a schedule
    #[command(alias = "e")]
    Edit(EditScheduleArgs),
    /// Delete a schedule permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteScheduleArgs),
    /// Make a schedule the active one, starting today
    Start(IdArgs),
    /// Export a schedule with its logs
    #[command(alias = "r")]
    Report(ReportArgs),
}

// ============================================================================
// Steps
// ============================================================================

/// Append a step to a schedule
#[derive(ClapArgs)]
pub struct AddStepArgs {
    /// ID of the schedule to add the step to
    pub schedule_id: u64,
    /// ID of the workout the step runs
    pub workout_id: u64,
    /// Duration in weeks (at least 1)
    #[arg(short, long, default_value_t = 1)]
    pub duration: u32,
}

impl From<AddStepArgs> for StepCreate {
    fn from(val: AddStepArgs) -> Self {
        StepCreate {
            schedule_id: val.schedule_id,
            workout_id: val.workout_id,
            duration: val.duration,
        }
    }
}

/// Insert a step at a position of a schedule
///
/// Position is 0-indexed. Steps at or after the position move down by one.
#[derive(ClapArgs)]
pub struct InsertStepArgs {
    /// ID of the schedule to insert the step into
    pub schedule_id: u64,
    /// 0-based position (0 = first)
    pub position: u32,
    /// ID of the workout the step runs
    pub workout_id: u64,
    /// Duration in weeks (at least 1)
    #[arg(short, long, default_value_t = 1)]
    pub duration: u32,
}

impl From<InsertStepArgs> for InsertStep {
    fn from(val: InsertStepArgs) -> Self {
        InsertStep {
            step: StepCreate {
                schedule_id: val.schedule_id,
                workout_id: val.workout_id,
                duration: val.duration,
            },
            position: val.position,
        }
    }
}

/// Change the workout or duration of a step
#[derive(ClapArgs)]
pub struct UpdateStepArgs {
    /// ID of the step to update
    pub id: u64,
    /// New workout ID
    #[arg(short, long)]
    pub workout_id: Option<u64>,
    /// New duration in weeks
    #[arg(short, long)]
    pub duration: Option<u32>,
}

impl From<UpdateStepArgs> for UpdateStep {
    fn from(val: UpdateStepArgs) -> Self {
        UpdateStep {
            id: val.id,
            workout_id: val.workout_id,
            duration: val.duration,
        }
    }
}

/// Swap the positions of two steps of the same schedule
#[derive(ClapArgs)]
pub struct SwapStepsArgs {
    /// ID of the first step
    pub step1_id: u64,
    /// ID of the second step
    pub step2_id: u64,
}

impl From<SwapStepsArgs> for SwapSteps {
    fn from(val: SwapStepsArgs) -> Self {
        SwapSteps {
            step1_id: val.step1_id,
            step2_id: val.step2_id,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Append a step to a schedule
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// Insert a step at a position
    #[command(alias = "i")]
    Insert(InsertStepArgs),
    /// Change a step's workout or duration
    #[command(alias = "u")]
    Update(UpdateStepArgs),
    /// Swap two steps
    #[command(alias = "sw")]
    Swap(SwapStepsArgs),
    /// Remove a step
    #[command(aliases = ["rm", "d"])]
    Remove(IdArgs),
}

// ============================================================================
// Workouts
// ============================================================================

/// Create a new workout
#[derive(ClapArgs)]
pub struct CreateWorkoutArgs {
    /// Name of the workout
    pub name: String,
    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreateWorkoutArgs> for CreateWorkout {
    fn from(val: CreateWorkoutArgs) -> Self {
        CreateWorkout {
            name: val.name,
            description: val.description,
        }
    }
}

/// Delete a workout with its steps and logs
#[derive(ClapArgs)]
pub struct DeleteWorkoutArgs {
    /// ID of the workout to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteWorkoutArgs> for DeleteWorkout {
    fn from(val: DeleteWorkoutArgs) -> Self {
        DeleteWorkout {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum WorkoutCommands {
    /// Create a new workout
    #[command(alias = "c")]
    Create(CreateWorkoutArgs),
    /// List workouts, newest first
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a workout
    #[command(alias = "s")]
    Show(IdArgs),
    /// Delete a workout permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteWorkoutArgs),
    /// Show the workout due today
    Current,
}

// ============================================================================
// Logs
// ============================================================================

/// Session impression as a command-line value
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ImpressionArg {
    Bad,
    Neutral,
    Good,
}

impl std::fmt::Display for ImpressionArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpressionArg::Bad => write!(f, "bad"),
            ImpressionArg::Neutral => write!(f, "neutral"),
            ImpressionArg::Good => write!(f, "good"),
        }
    }
}

/// Parses `EXERCISE:REPS[xWEIGHT]`, e.g. `Squat:5x100` or `Plank:0x60`.
fn parse_entry(value: &str) -> Result<LogEntry, String> {
    let (exercise, amount) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected EXERCISE:REPS[xWEIGHT], got '{value}'"))?;

    let (reps, weight) = match amount.split_once(['x', 'X']) {
        Some((reps, weight)) => (reps, Some(weight)),
        None => (amount, None),
    };

    let reps = reps
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid reps in '{value}': {e}"))?;
    let weight = weight
        .map(|w| w.trim().parse::<f64>())
        .transpose()
        .map_err(|e| format!("invalid weight in '{value}': {e}"))?;

    Ok(LogEntry {
        exercise: exercise.trim().to_string(),
        reps,
        weight,
    })
}

/// Log a training session of a workout
///
/// Entries are given as EXERCISE:REPS[xWEIGHT]. Logging twice on the same
/// day adds entries to that day's session.
#[derive(ClapArgs)]
pub struct LogSessionArgs {
    /// ID of the workout performed
    pub workout_id: u64,
    /// Exercise entries, e.g. "Squat:5x100" "Pull-up:8"
    #[arg(value_parser = parse_entry)]
    pub entries: Vec<LogEntry>,
    /// Day of the session (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// How the session felt
    #[arg(short, long)]
    pub impression: Option<ImpressionArg>,
    /// Free-form notes for the session
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<LogSessionArgs> for LogSession {
    fn from(val: LogSessionArgs) -> Self {
        LogSession {
            workout_id: val.workout_id,
            date: val.date,
            impression: val.impression.map(|i| i.to_string()),
            notes: val.notes,
            entries: val.entries,
        }
    }
}

/// Edit a single log entry
#[derive(ClapArgs)]
pub struct EditLogArgs {
    /// ID of the log entry
    pub id: u64,
    /// New exercise name
    #[arg(short, long)]
    pub exercise: Option<String>,
    /// New number of repetitions
    #[arg(short, long)]
    pub reps: Option<u32>,
    /// New weight
    #[arg(short, long, conflicts_with = "clear_weight")]
    pub weight: Option<f64>,
    /// Remove the weight
    #[arg(long)]
    pub clear_weight: bool,
    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

impl From<EditLogArgs> for UpdateLog {
    fn from(val: EditLogArgs) -> Self {
        UpdateLog {
            id: val.id,
            exercise: val.exercise,
            reps: val.reps,
            weight: val.weight,
            clear_weight: val.clear_weight,
            date: val.date,
        }
    }
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// Log a training session
    #[command(alias = "a")]
    Add(LogSessionArgs),
    /// Edit a log entry
    #[command(alias = "e")]
    Edit(EditLogArgs),
    /// Delete a log entry
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
    /// Show all logs of a workout
    #[command(alias = "s")]
    Show(IdArgs),
}

// ============================================================================
// Calendar
// ============================================================================

/// Month calendar of logged days; defaults to the current month
#[derive(ClapArgs)]
pub struct CalendarArgs {
    /// Year to show
    #[arg(short, long)]
    pub year: Option<i16>,
    /// Month to show (1-12)
    #[arg(short, long)]
    pub month: Option<i8>,
}

impl From<CalendarArgs> for CalendarQuery {
    fn from(val: CalendarArgs) -> Self {
        CalendarQuery {
            year: val.year,
            month: val.month,
        }
    }
}
