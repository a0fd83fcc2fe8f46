//! Core library for the Regimen workout tracker.
//!
//! Users define workouts, log training sessions and arrange workouts into
//! schedules: ordered sequences of steps, each running one workout for a
//! number of weeks. The [`resolver`] works out which step is in effect on a
//! given day; the [`Manager`] wraps persistence, authorization and caching
//! behind an async API used by the CLI and the MCP server.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use regimen_core::{
//!     ManagerBuilder,
//!     params::{CreateWorkout, LogEntry, LogSession},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ManagerBuilder::new()
//!     .with_database_path(Some("regimen.db"))
//!     .build()
//!     .await?;
//!
//! let user = 1;
//! let workout = manager
//!     .create_workout(user, &CreateWorkout {
//!         name: "Legs".to_string(),
//!         description: None,
//!     })
//!     .await?;
//!
//! manager
//!     .log_session(user, &LogSession {
//!         workout_id: workout.id,
//!         impression: Some("good".to_string()),
//!         entries: vec![LogEntry {
//!             exercise: "Squat".to_string(),
//!             reps: 5,
//!             weight: Some(100.0),
//!         }],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! println!("{}", manager.calendar(user, &Default::default()).await?);
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod cache;
pub mod db;
pub mod display;
pub mod error;
pub mod manager;
pub mod models;
pub mod params;
pub mod resolver;

// Re-export commonly used types
pub use access::{Action, UserId};
pub use cache::{CacheKey, CacheNamespace, CalendarCache, MemoryCache};
pub use db::Database;
pub use display::{
    CalendarView, CreateResult, DeleteResult, LoggedSession, OperationStatus, ScheduleReport,
    ScheduleSummaries, UpdateResult, Workouts,
};
pub use error::{ManagerError, Result};
pub use manager::{Manager, ManagerBuilder};
pub use models::{
    CurrentWorkout, Impression, Schedule, ScheduleStep, ScheduleSummary, Workout, WorkoutLog,
    WorkoutSession,
};
