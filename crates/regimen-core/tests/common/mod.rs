use regimen_core::{
    Manager, ManagerBuilder, Schedule, UserId, Workout,
    params::{CreateSchedule, CreateWorkout, Id, StepCreate},
};
use tempfile::TempDir;

/// Helper function to create a test manager
pub async fn create_test_manager() -> (TempDir, Manager) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let manager = ManagerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create manager");
    (temp_dir, manager)
}

#[allow(dead_code)]
pub async fn create_workout(manager: &Manager, user: UserId, name: &str) -> Workout {
    manager
        .create_workout(
            user,
            &CreateWorkout {
                name: name.to_string(),
                description: None,
            },
        )
        .await
        .expect("Failed to create workout")
}

/// Creates a schedule with one step per duration, each running its own
/// workout, and returns it with its steps loaded.
#[allow(dead_code)]
pub async fn create_schedule_with_steps(
    manager: &Manager,
    user: UserId,
    name: &str,
    start_date: &str,
    is_active: bool,
    is_loop: bool,
    durations: &[u32],
) -> Schedule {
    let schedule = manager
        .create_schedule(
            user,
            &CreateSchedule {
                name: name.to_string(),
                start_date: Some(start_date.to_string()),
                is_active,
                is_loop,
            },
        )
        .await
        .expect("Failed to create schedule");

    for (i, duration) in durations.iter().enumerate() {
        let workout = create_workout(manager, user, &format!("{name} workout {}", i + 1)).await;
        manager
            .add_step(
                user,
                &StepCreate {
                    schedule_id: schedule.id,
                    workout_id: workout.id,
                    duration: *duration,
                },
            )
            .await
            .expect("Failed to add step");
    }

    manager
        .get_schedule(user, &Id { id: schedule.id })
        .await
        .expect("Failed to load schedule")
}
