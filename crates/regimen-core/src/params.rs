//! Parameter structures for Regimen operations
//!
//! This module contains the parameter structures shared by every interface
//! (CLI, MCP). They carry raw user input: dates are `YYYY-MM-DD` strings and
//! impressions are their lowercase names, so interfaces do not need to know
//! about `jiff` or the model enums. Each structure that needs parsing offers a
//! `validate` method producing the typed values the manager works with.
//!
//! ## Parameter Wrapper Pattern
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! The CLI converts its clap structs into these with `From` impls. The MCP
//! server wraps them transparently and derives `JsonSchema` through the
//! `schema` feature:
//!
//! ```ignore
//! #[derive(Deserialize, JsonSchema)]
//! #[serde(transparent)]
//! struct CreateScheduleRequest(regimen_core::params::CreateSchedule);
//! ```

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ManagerError, Result},
    models::{Impression, UpdateLogRequest, UpdateScheduleRequest, UpdateStepRequest},
};

/// Parses a `YYYY-MM-DD` date, naming `field` in the error.
///
/// ```rust
/// use jiff::civil::date;
/// use regimen_core::params::parse_date;
///
/// assert_eq!(parse_date("start_date", "2013-04-21")?, date(2013, 4, 21));
/// assert!(parse_date("start_date", "21/04/2013").is_err());
/// # Ok::<(), regimen_core::ManagerError>(())
/// ```
pub fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        ManagerError::invalid_input(field, format!("Invalid date '{value}', expected YYYY-MM-DD: {e}"))
    })
}

fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>> {
    value.map(|v| parse_date(field, v)).transpose()
}

fn parse_impression(value: Option<&str>) -> Result<Option<Impression>> {
    value
        .map(|v| {
            v.parse::<Impression>().map_err(|_| {
                ManagerError::invalid_input(
                    "impression",
                    format!("Invalid impression: {v}. Must be 'bad', 'neutral', or 'good'"),
                )
            })
        })
        .transpose()
}

/// Generic parameters for operations requiring just an ID.
///
/// Used for show_schedule, start_schedule, schedule_report, remove_step,
/// show_workout, workout_log and delete_log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateSchedule {
    /// Name of the schedule (required)
    pub name: String,
    /// First day of the schedule as YYYY-MM-DD, defaults to today
    pub start_date: Option<String>,
    /// Make this the active schedule, deactivating any other
    #[serde(default)]
    pub is_active: bool,
    /// Repeat the steps indefinitely once exhausted
    #[serde(default)]
    pub is_loop: bool,
}

impl CreateSchedule {
    /// Parses the optional start date.
    pub fn validate(&self) -> Result<Option<Date>> {
        parse_optional_date("start_date", self.start_date.as_deref())
    }
}

/// Parameters for editing a schedule. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateSchedule {
    /// Schedule ID to update (required)
    pub id: u64,
    /// New name
    pub name: Option<String>,
    /// New start date as YYYY-MM-DD
    pub start_date: Option<String>,
    /// Activate or deactivate the schedule
    pub is_active: Option<bool>,
    /// Turn looping on or off
    pub is_loop: Option<bool>,
}

impl UpdateSchedule {
    /// Validate the parameters and build the update request.
    ///
    /// # Errors
    ///
    /// * `ManagerError::InvalidInput` - When the start date does not parse
    pub fn validate(&self) -> Result<UpdateScheduleRequest> {
        Ok(UpdateScheduleRequest {
            name: self.name.clone(),
            start_date: parse_optional_date("start_date", self.start_date.as_deref())?,
            is_active: self.is_active,
            is_loop: self.is_loop,
        })
    }
}

/// Parameters for deleting a schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteSchedule {
    /// ID of the schedule to delete
    pub id: u64,
    /// Must be true, deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Base parameters for step creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepCreate {
    /// ID of the schedule to add the step to
    pub schedule_id: u64,
    /// Workout to run during the step
    pub workout_id: u64,
    /// Length of the step in whole weeks (at least 1)
    pub duration: u32,
}

/// Parameters for inserting a step at a specific position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct InsertStep {
    /// Base step creation parameters
    #[serde(flatten)]
    pub step: StepCreate,
    /// Position to insert the step (0-indexed)
    pub position: u32,
}

/// Parameters for updating an existing step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateStep {
    /// Step ID to update (required)
    pub id: u64,
    /// Replacement workout
    pub workout_id: Option<u64>,
    /// New duration in weeks
    pub duration: Option<u32>,
}

impl From<&UpdateStep> for UpdateStepRequest {
    fn from(params: &UpdateStep) -> Self {
        Self {
            workout_id: params.workout_id,
            duration: params.duration,
        }
    }
}

/// Parameters for swapping the order of two steps.
///
/// Both steps must belong to the same schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SwapSteps {
    /// ID of the first step to swap
    pub step1_id: u64,
    /// ID of the second step to swap
    pub step2_id: u64,
}

/// Parameters for creating a workout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateWorkout {
    /// Name of the workout (required)
    pub name: String,
    /// Optional description of the routine
    pub description: Option<String>,
}

/// Parameters for deleting a workout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteWorkout {
    /// ID of the workout to delete
    pub id: u64,
    /// Must be true; removes the workout's schedule steps and logs as well
    #[serde(default)]
    pub confirmed: bool,
}

/// One exercise set in a logged session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct LogEntry {
    /// Exercise name
    pub exercise: String,
    /// Repetitions performed
    #[serde(default)]
    pub reps: u32,
    /// Weight used, if any
    pub weight: Option<f64>,
}

impl LogEntry {
    /// An entry with a name but neither reps nor weight, or without a name,
    /// is an unused form slot and is not stored.
    pub fn is_blank(&self) -> bool {
        self.exercise.trim().is_empty() || (self.reps == 0 && self.weight.is_none())
    }
}

/// Parameters for logging a training session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct LogSession {
    /// Workout that was trained
    pub workout_id: u64,
    /// Day of the session as YYYY-MM-DD, defaults to today
    pub date: Option<String>,
    /// How the session felt: 'bad', 'neutral' or 'good'
    pub impression: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Exercise sets performed
    #[serde(default)]
    pub entries: Vec<LogEntry>,
}

impl LogSession {
    /// Parses the optional date and impression.
    ///
    /// # Errors
    ///
    /// * `ManagerError::InvalidInput` - When the date or impression is invalid
    ///   or an entry carries a negative weight
    pub fn validate(&self) -> Result<(Option<Date>, Option<Impression>)> {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| entry.weight.is_some_and(|w| !w.is_finite() || w < 0.0))
        {
            return Err(ManagerError::invalid_input(
                "weight",
                format!("Invalid weight for '{}'", entry.exercise),
            ));
        }

        Ok((
            parse_optional_date("date", self.date.as_deref())?,
            parse_impression(self.impression.as_deref())?,
        ))
    }
}

/// Parameters for editing a single log entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateLog {
    /// Log entry ID to update (required)
    pub id: u64,
    /// New exercise name
    pub exercise: Option<String>,
    /// New repetition count
    pub reps: Option<u32>,
    /// New weight
    pub weight: Option<f64>,
    /// Remove the weight from the entry
    #[serde(default)]
    pub clear_weight: bool,
    /// New date as YYYY-MM-DD
    pub date: Option<String>,
}

impl UpdateLog {
    /// Validate the parameters and build the update request.
    pub fn validate(&self) -> Result<UpdateLogRequest> {
        if self.clear_weight && self.weight.is_some() {
            return Err(ManagerError::invalid_input(
                "weight",
                "Cannot set and clear the weight at the same time",
            ));
        }

        if let Some(ref exercise) = self.exercise
            && exercise.trim().is_empty()
        {
            return Err(ManagerError::invalid_input(
                "exercise",
                "Exercise name cannot be empty",
            ));
        }

        let weight = if self.clear_weight {
            Some(None)
        } else {
            self.weight.map(Some)
        };

        Ok(UpdateLogRequest {
            exercise: self.exercise.clone(),
            reps: self.reps,
            weight,
            date: parse_optional_date("date", self.date.as_deref())?,
        })
    }
}

/// Parameters for the month calendar. Omitted values default to the
/// current month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CalendarQuery {
    /// Year to show
    pub year: Option<i16>,
    /// Month to show (1-12)
    pub month: Option<i8>,
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_create_schedule_without_date() {
        let params = CreateSchedule {
            name: "Base".to_string(),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap(), None);
    }

    #[test]
    fn test_update_schedule_invalid_date() {
        let params = UpdateSchedule {
            id: 1,
            start_date: Some("2024-02-30".to_string()),
            ..Default::default()
        };

        match params.validate().unwrap_err() {
            ManagerError::InvalidInput { field, reason } => {
                assert_eq!(field, "start_date");
                assert!(reason.contains("2024-02-30"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_log_session_validate() {
        let params = LogSession {
            workout_id: 1,
            date: Some("2024-03-05".to_string()),
            impression: Some("Good".to_string()),
            ..Default::default()
        };
        let (day, impression) = params.validate().unwrap();
        assert_eq!(day, Some(date(2024, 3, 5)));
        assert_eq!(impression, Some(Impression::Good));
    }

    #[test]
    fn test_log_session_invalid_impression() {
        let params = LogSession {
            workout_id: 1,
            impression: Some("great".to_string()),
            ..Default::default()
        };

        match params.validate().unwrap_err() {
            ManagerError::InvalidInput { field, .. } => assert_eq!(field, "impression"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_log_session_rejects_negative_weight() {
        let params = LogSession {
            workout_id: 1,
            entries: vec![LogEntry {
                exercise: "Squat".to_string(),
                reps: 5,
                weight: Some(-20.0),
            }],
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_blank_entries() {
        let blank = LogEntry {
            exercise: "Squat".to_string(),
            reps: 0,
            weight: None,
        };
        assert!(blank.is_blank());

        let unnamed = LogEntry {
            exercise: "  ".to_string(),
            reps: 5,
            weight: None,
        };
        assert!(unnamed.is_blank());

        let weight_only = LogEntry {
            exercise: "Plank".to_string(),
            reps: 0,
            weight: Some(10.0),
        };
        assert!(!weight_only.is_blank());
    }

    #[test]
    fn test_update_log_weight_handling() {
        let clear = UpdateLog {
            id: 1,
            clear_weight: true,
            ..Default::default()
        };
        assert_eq!(clear.validate().unwrap().weight, Some(None));

        let set = UpdateLog {
            id: 1,
            weight: Some(60.0),
            ..Default::default()
        };
        assert_eq!(set.validate().unwrap().weight, Some(Some(60.0)));

        let both = UpdateLog {
            id: 1,
            weight: Some(60.0),
            clear_weight: true,
            ..Default::default()
        };
        assert!(both.validate().is_err());
    }

    #[test]
    fn test_insert_step_flattened_json() {
        let params: InsertStep = serde_json::from_str(
            r#"{"schedule_id": 2, "workout_id": 5, "duration": 3, "position": 0}"#,
        )
        .unwrap();
        assert_eq!(params.step.schedule_id, 2);
        assert_eq!(params.step.duration, 3);
        assert_eq!(params.position, 0);
    }
}
