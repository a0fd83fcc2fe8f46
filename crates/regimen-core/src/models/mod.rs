//! Data models for workouts, schedules and training logs.
//!
//! This module contains the domain models of the workout tracker. Display
//! implementations for these models live in [`crate::display::models`] so
//! that the data structures stay free of presentation logic.
//!
//! # Model Overview
//!
//! - [`Workout`]: a named training routine owned by one user
//! - [`Schedule`]: an ordered sequence of [`ScheduleStep`]s, each running one
//!   workout for a number of weeks, optionally repeating forever
//! - [`WorkoutSession`]: one training day with an [`Impression`]
//! - [`WorkoutLog`]: a single logged exercise set
//!
//! Derived, never-persisted values such as [`ScheduleSummary`],
//! [`CalendarMonth`] and [`CurrentWorkout`] are computed from these.
//!
//! # Examples
//!
//! ```rust
//! use jiff::{Timestamp, civil::date};
//! use regimen_core::models::{Schedule, ScheduleStep};
//!
//! let schedule = Schedule {
//!     id: 1,
//!     user_id: 1,
//!     name: "Base building".to_string(),
//!     start_date: date(2013, 4, 21),
//!     is_active: true,
//!     is_loop: false,
//!     created_at: Timestamp::UNIX_EPOCH,
//!     updated_at: Timestamp::UNIX_EPOCH,
//!     steps: vec![ScheduleStep {
//!         id: 1,
//!         schedule_id: 1,
//!         workout_id: 10,
//!         workout_name: "Full body".to_string(),
//!         duration: 3,
//!         order: 0,
//!     }],
//! };
//! assert_eq!(schedule.end_date(), Some(date(2013, 5, 12)));
//! ```

pub mod calendar;
pub mod current;
pub mod impression;
pub mod log;
pub mod requests;
pub mod schedule;
pub mod step;
pub mod summary;
pub mod workout;


pub use calendar::{CalendarDay, CalendarMonth};
pub use current::CurrentWorkout;
pub use impression::Impression;
pub use log::{WorkoutLog, WorkoutLogBook, WorkoutSession};
pub use requests::{UpdateLogRequest, UpdateScheduleRequest, UpdateStepRequest};
pub use schedule::Schedule;
pub use step::ScheduleStep;
pub use summary::ScheduleSummary;
pub use workout::Workout;
