//! Integration tests comparing CLI output with the core Display implementations
//!
//! The CLI and the MCP server both render the markdown produced by the core
//! `Display` impls, so with `--no-color` the CLI prints exactly that text.

use std::process::Command;

use regimen_core::{
    Manager, ManagerBuilder,
    params::{CalendarQuery, Id},
};
use tempfile::TempDir;

/// Helper function to create a test manager with temporary database
async fn create_test_manager() -> (Manager, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let manager = ManagerBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create manager");

    (manager, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_regimen"));
    cmd.arg("--no-color").arg("--database-file").arg(db_path);

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    assert!(
        output.status.success(),
        "CLI command {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_schedule_display_consistency() {
    let (manager, temp_dir) = create_test_manager().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    run_cli_command(db_str, &["workout", "create", "Push"]);
    run_cli_command(db_str, &["workout", "create", "Pull"]);
    run_cli_command(
        db_str,
        &["schedule", "create", "Split", "--start-date", "2024-01-01", "--loop"],
    );
    run_cli_command(db_str, &["step", "add", "1", "1", "--duration", "2"]);
    run_cli_command(db_str, &["step", "add", "1", "2", "--duration", "3"]);

    let cli_output = run_cli_command(db_str, &["schedule", "show", "1"]);

    let schedule = manager
        .get_schedule(1, &Id { id: 1 })
        .await
        .expect("Failed to get schedule");

    assert_eq!(cli_output, schedule.to_string());
    assert!(cli_output.contains("Repeats: every 5 weeks"));
}

#[tokio::test]
async fn test_schedule_list_consistency() {
    let (manager, temp_dir) = create_test_manager().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    run_cli_command(db_str, &["schedule", "create", "Winter"]);
    run_cli_command(db_str, &["schedule", "create", "Summer", "--active"]);

    let cli_output = run_cli_command(db_str, &["schedule", "list"]);

    let summaries = manager
        .list_schedules_summary(1)
        .await
        .expect("Failed to list schedules");

    assert_eq!(cli_output, format!("# Schedules\n\n{summaries}"));
    // The active schedule is listed first
    assert!(cli_output.find("Summer").unwrap() < cli_output.find("Winter").unwrap());
}

#[tokio::test]
async fn test_current_workout_consistency() {
    let (manager, temp_dir) = create_test_manager().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    run_cli_command(db_str, &["workout", "create", "Mobility"]);
    run_cli_command(db_str, &["schedule", "create", "Now", "--active"]);
    run_cli_command(db_str, &["step", "add", "1", "1", "--duration", "4"]);

    let cli_output = run_cli_command(db_str, &[]);

    let current = manager
        .current_workout(1)
        .await
        .expect("Failed to resolve current workout");

    assert_eq!(cli_output, current.to_string());
    assert!(cli_output.contains("From schedule **Now**"));
}

#[tokio::test]
async fn test_calendar_display_consistency() {
    let (manager, temp_dir) = create_test_manager().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    run_cli_command(db_str, &["workout", "create", "Run"]);
    run_cli_command(
        db_str,
        &[
            "log",
            "add",
            "1",
            "Sprint:8",
            "--date",
            "2024-02-14",
            "--impression",
            "bad",
        ],
    );

    let cli_output = run_cli_command(db_str, &["calendar", "-y", "2024", "-m", "2"]);

    let view = manager
        .calendar(
            1,
            &CalendarQuery {
                year: Some(2024),
                month: Some(2),
            },
        )
        .await
        .expect("Failed to build calendar");

    assert_eq!(cli_output, view.to_string());
    assert!(cli_output.contains(" 14 - |"));
}
