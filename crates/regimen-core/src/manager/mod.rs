//! High-level manager API for workouts, schedules and training logs.
//!
//! This module provides the main [`Manager`] interface. The manager sits
//! between the interfaces (CLI, MCP) and the database: every operation opens
//! the database on a blocking task, checks that the acting user owns the
//! resources involved and then performs the work.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (display types) │───▶│ (*_ops, access) │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Manager`] instances
//! - [`schedule_ops`]: Schedule CRUD and activation
//! - [`step_ops`]: Adding, reordering and removing schedule steps
//! - [`workout_ops`]: Workout CRUD
//! - [`log_ops`]: Session logging and log entry edits
//! - [`handlers`]: Current workout, calendar, reports and list wrappers
//!
//! # Usage
//!
//! ```rust,no_run
//! use regimen_core::{
//!     ManagerBuilder,
//!     params::{CreateSchedule, CreateWorkout, Id, StepCreate},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ManagerBuilder::new()
//!     .with_database_path(Some("/tmp/regimen.db"))
//!     .build()
//!     .await?;
//!
//! let user = 1;
//! let workout = manager
//!     .create_workout(user, &CreateWorkout {
//!         name: "Full body".to_string(),
//!         description: None,
//!     })
//!     .await?;
//! let schedule = manager
//!     .create_schedule(user, &CreateSchedule {
//!         name: "Base building".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! manager
//!     .add_step(user, &StepCreate {
//!         schedule_id: schedule.id,
//!         workout_id: workout.id,
//!         duration: 4,
//!     })
//!     .await?;
//! manager.start_schedule(user, &Id { id: schedule.id }).await?;
//!
//! println!("{}", manager.current_workout(user).await?);
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use jiff::{Zoned, civil::Date};
use tokio::task;

use crate::{
    cache::CalendarCache,
    db::Database,
    error::{ManagerError, Result},
};

pub mod builder;
pub mod handlers;
pub mod log_ops;
pub mod schedule_ops;
pub mod step_ops;
pub mod workout_ops;


pub use builder::ManagerBuilder;

/// Main manager interface. Cheap to clone; clones share the calendar cache.
#[derive(Clone)]
pub struct Manager {
    pub(crate) db_path: PathBuf,
    pub(crate) cache: Arc<dyn CalendarCache>,
}

impl Manager {
    pub(crate) fn new(db_path: PathBuf, cache: Arc<dyn CalendarCache>) -> Self {
        Self { db_path, cache }
    }

    /// Runs `operation` against a fresh connection on a blocking thread.
    pub(crate) async fn with_db<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(|e| ManagerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Today's date in the system time zone.
pub(crate) fn today() -> Date {
    Zoned::now().date()
}
