//! MCP tool handlers implementation

use log::debug;
use regimen_core::{
    CreateResult, LoggedSession, Manager, OperationStatus, UserId, params as core,
};
use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// Core parameter types only derive `JsonSchema` behind the `schema` feature
// and know nothing about MCP. The transparent wrapper forwards both
// deserialization and schema generation to the wrapped type.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateSchedule = McpParams<core::CreateSchedule>;
pub type CreateWorkout = McpParams<core::CreateWorkout>;
pub type StepCreate = McpParams<core::StepCreate>;
pub type LogSession = McpParams<core::LogSession>;
pub type CalendarQuery = McpParams<core::CalendarQuery>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Handler implementations for the MCP server, acting as one user
pub struct McpHandlers {
    manager: Manager,
    user: UserId,
}

impl McpHandlers {
    pub fn new(manager: Manager, user: UserId) -> Self {
        Self { manager, user }
    }

    pub async fn create_schedule(&self, params: CreateSchedule) -> McpResult {
        debug!("create_schedule: {params:?}");

        let schedule = self
            .manager
            .create_schedule(self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create schedule", &e))?;

        text(CreateResult::new(schedule))
    }

    pub async fn list_schedules(&self) -> McpResult {
        debug!("list_schedules");

        let summaries = self
            .manager
            .list_schedules_summary(self.user)
            .await
            .map_err(|e| to_mcp_error("Failed to list schedules", &e))?;

        let title = if summaries.is_empty() {
            "No schedules found"
        } else {
            "Schedules"
        };

        text(format!("# {title}\n\n{summaries}"))
    }

    pub async fn show_schedule(&self, params: Id) -> McpResult {
        debug!("show_schedule: {params:?}");

        let schedule = self
            .manager
            .get_schedule(self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get schedule", &e))?;

        text(schedule)
    }

    pub async fn start_schedule(&self, params: Id) -> McpResult {
        debug!("start_schedule: {params:?}");

        let schedule = self
            .manager
            .start_schedule(self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to start schedule", &e))?;

        let status = OperationStatus::success(format!(
            "Started schedule '{}' (ID: {}) today. Any other schedule is now inactive.",
            schedule.name, schedule.id
        ));
        text(format!("{status}\n{schedule}"))
    }

    pub async fn current_workout(&self) -> McpResult {
        debug!("current_workout");

        let current = self
            .manager
            .current_workout(self.user)
            .await
            .map_err(|e| to_mcp_error("Failed to resolve current workout", &e))?;

        text(current)
    }

    pub async fn create_workout(&self, params: CreateWorkout) -> McpResult {
        debug!("create_workout: {params:?}");

        let workout = self
            .manager
            .create_workout(self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create workout", &e))?;

        text(CreateResult::new(workout))
    }

    pub async fn list_workouts(&self) -> McpResult {
        debug!("list_workouts");

        let workouts = self
            .manager
            .list_workouts_summary(self.user)
            .await
            .map_err(|e| to_mcp_error("Failed to list workouts", &e))?;

        text(format!("# Workouts\n\n{workouts}"))
    }

    pub async fn add_step(&self, params: StepCreate) -> McpResult {
        debug!("add_step: {params:?}");

        let step = self
            .manager
            .add_step(self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add step", &e))?;

        text(CreateResult::new(step))
    }

    pub async fn log_session(&self, params: LogSession) -> McpResult {
        debug!("log_session: {params:?}");

        let logged = self
            .manager
            .log_session(self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to log session", &e))?;

        text(LoggedSession::from(logged))
    }

    pub async fn calendar(&self, params: CalendarQuery) -> McpResult {
        debug!("calendar: {params:?}");

        let view = self
            .manager
            .calendar(self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build calendar", &e))?;

        text(view)
    }
}
