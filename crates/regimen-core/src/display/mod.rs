//! Display formatting and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections, operation results and composed pages get wrapper types here.
//! Everything renders as markdown, which the CLI passes through its terminal
//! renderer and the MCP server returns as text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers & page │    │   Formatted     │
//! │ (Schedule, ...) │───▶│     types       │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: [`ScheduleSummaries`], [`Workouts`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`],
//!   [`LoggedSession`]
//! - [`status`]: [`OperationStatus`]
//! - [`calendar`]: the month page, [`CalendarView`]
//! - [`report`]: the schedule log export, [`ScheduleReport`]
//! - [`datetime`]: date and time formatting helpers
//!
//! ```rust
//! use regimen_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Swapped steps 3 and 4");
//! assert_eq!(status.to_string(), "Success: Swapped steps 3 and 4\n");
//! ```

pub mod calendar;
pub mod collections;
pub mod current;
pub mod datetime;
pub mod models;
pub mod report;
pub mod results;
pub mod status;

pub use calendar::CalendarView;
pub use collections::{ScheduleSummaries, Workouts};
pub use datetime::{DayLabel, LocalDateTime, MonthLabel};
pub use report::ScheduleReport;
pub use results::{CreateResult, DeleteResult, LoggedSession, UpdateResult};
pub use status::OperationStatus;
