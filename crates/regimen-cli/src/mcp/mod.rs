//! MCP server implementation for Regimen
//!
//! Exposes the workout manager as Model Context Protocol tools over stdio.
//! The server acts as the single user it was started for.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use regimen_core::{Manager, UserId};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::signal::unix::{SignalKind, signal};

pub mod errors;
pub mod handlers;

pub use handlers::{
    CalendarQuery, CreateSchedule, CreateWorkout, Id, LogSession, McpResult, StepCreate,
};

/// MCP server for Regimen
#[derive(Clone)]
pub struct RegimenMcpServer {
    manager: Manager,
    user: UserId,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RegimenMcpServer {
    pub fn new(manager: Manager, user: UserId) -> Self {
        Self {
            manager,
            user,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.manager.clone(), self.user)
    }

    #[tool(
        name = "create_schedule",
        description = "Create a training schedule: an ordered sequence of workouts, each running for a number of weeks. Provide a name (required), optional start_date (YYYY-MM-DD, defaults to today), is_active to make it the running schedule (any other schedule is deactivated) and is_loop to repeat it forever. Add workouts to it with add_step."
    )]
    async fn create_schedule(&self, Parameters(params): Parameters<CreateSchedule>) -> McpResult {
        self.handlers().create_schedule(params).await
    }

    #[tool(
        name = "list_schedules",
        description = "List all schedules, the active one first, with start and end dates, step counts and total weeks."
    )]
    async fn list_schedules(&self) -> McpResult {
        self.handlers().list_schedules().await
    }

    #[tool(
        name = "show_schedule",
        description = "Show a schedule with all its steps in order. Each step names its workout, its duration in weeks and the step and workout IDs."
    )]
    async fn show_schedule(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().show_schedule(params).await
    }

    #[tool(
        name = "start_schedule",
        description = "Make a schedule the active one, restarting it today. Every other schedule becomes inactive, so exactly one schedule drives the current workout."
    )]
    async fn start_schedule(&self, Parameters(params): Parameters<Id>) -> McpResult {
        self.handlers().start_schedule(params).await
    }

    #[tool(
        name = "current_workout",
        description = "Show the workout due today: the current step of the active schedule, or the most recently created workout that is not part of any schedule."
    )]
    async fn current_workout(&self) -> McpResult {
        self.handlers().current_workout().await
    }

    #[tool(
        name = "create_workout",
        description = "Create a workout with a name (required) and an optional description. Returns the workout ID used by add_step and log_session."
    )]
    async fn create_workout(&self, Parameters(params): Parameters<CreateWorkout>) -> McpResult {
        self.handlers().create_workout(params).await
    }

    #[tool(
        name = "list_workouts",
        description = "List all workouts, newest first, with their IDs."
    )]
    async fn list_workouts(&self) -> McpResult {
        self.handlers().list_workouts().await
    }

    #[tool(
        name = "add_step",
        description = "Append a step to the end of a schedule. Requires schedule_id, workout_id and duration in whole weeks (at least 1). The workout must belong to the same user as the schedule."
    )]
    async fn add_step(&self, Parameters(params): Parameters<StepCreate>) -> McpResult {
        self.handlers().add_step(params).await
    }

    #[tool(
        name = "log_session",
        description = "Record a training session of a workout. Provide workout_id, optional date (YYYY-MM-DD, defaults to today), impression ('bad', 'neutral' or 'good'), notes and entries, each with exercise, reps and optional weight. Logging again on the same day adds entries to that day's session. Entries without an exercise name, or without both reps and weight, are skipped."
    )]
    async fn log_session(&self, Parameters(params): Parameters<LogSession>) -> McpResult {
        self.handlers().log_session(params).await
    }

    #[tool(
        name = "calendar",
        description = "Show a month calendar of logged training days marked with the session impression. Optional year and month (1-12) default to the current month."
    )]
    async fn calendar(&self, Parameters(params): Parameters<CalendarQuery>) -> McpResult {
        self.handlers().calendar(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for RegimenMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "regimen".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Regimen tracks workouts, training schedules and training logs for one user.

## Core Concepts
- **Workouts**: named training routines
- **Schedules**: ordered steps, each running one workout for a number of weeks from the schedule's start date. At most one schedule is active; loop schedules repeat forever.
- **Logs**: exercise entries (reps, optional weight) recorded per day, grouped in a session with an impression

## Workflow
1. Create workouts with `create_workout`
2. Create a schedule with `create_schedule` and add steps with `add_step`
3. Run it with `start_schedule`
4. Ask `current_workout` what to train today
5. Record training with `log_session` and review it with `calendar`

## Tool Categories
- **Schedules**: create_schedule, list_schedules, show_schedule, start_schedule, add_step
- **Workouts**: create_workout, list_workouts, current_workout
- **Logs**: log_session, calendar"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: RegimenMcpServer) -> Result<()> {
    use rmcp::{ServiceExt, transport::stdio};

    info!("Starting Regimen MCP server on stdio for user {}", server.user);
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
