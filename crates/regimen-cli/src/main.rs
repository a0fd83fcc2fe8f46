//! Regimen CLI application
//!
//! Command-line interface and MCP server for the Regimen workout tracker.

mod args;
mod cli;
mod mcp;
mod renderer;

use Commands::*;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{RegimenMcpServer, run_stdio_server};
use regimen_core::ManagerBuilder;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        user,
        no_color,
        command,
    } = Args::parse();

    let manager = ManagerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize workout manager")?;

    info!("Regimen started for user {user}");

    let cli = Cli::new(manager.clone(), user, TerminalRenderer::new(!no_color));

    match command {
        Some(Schedule { command }) => cli.handle_schedule_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(Workout { command }) => cli.handle_workout_command(command).await,
        Some(Log { command }) => cli.handle_log_command(command).await,
        Some(Calendar(args)) => cli.calendar(&args.into()).await,
        Some(Serve) => {
            info!("Starting Regimen MCP server");
            run_stdio_server(RegimenMcpServer::new(manager, user))
                .await
                .context("MCP server failed")
        }
        None => cli.current_workout().await,
    }
}
