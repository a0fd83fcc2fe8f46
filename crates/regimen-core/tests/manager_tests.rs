use jiff::{ToSpan, civil::date};
use regimen_core::{
    Impression, ManagerError,
    params::{
        CalendarQuery, CreateSchedule, DeleteSchedule, DeleteWorkout, Id, InsertStep, LogEntry,
        LogSession, StepCreate, SwapSteps, UpdateLog, UpdateSchedule, UpdateStep,
    },
};

mod common;

use common::{create_schedule_with_steps, create_test_manager, create_workout};

#[tokio::test]
async fn test_end_date_of_finite_schedule() {
    let (_temp_dir, manager) = create_test_manager().await;

    let schedule =
        create_schedule_with_steps(&manager, 1, "Block", "2013-04-21", false, false, &[3, 5, 2])
            .await;

    assert_eq!(schedule.steps.len(), 3);
    assert_eq!(schedule.end_date(), Some(date(2013, 6, 30)));

    let summaries = manager.list_schedules(1).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].end_date, Some(date(2013, 6, 30)));
    assert_eq!(summaries[0].total_weeks, 10);
}

#[tokio::test]
async fn test_current_workout_follows_active_schedule() {
    let (_temp_dir, manager) = create_test_manager().await;
    let today = date(2024, 5, 6);
    let start = today.checked_sub(4.weeks()).unwrap();

    let schedule = create_schedule_with_steps(
        &manager,
        1,
        "Block",
        &start.to_string(),
        true,
        false,
        &[3, 1, 2],
    )
    .await;

    let current = manager.current_workout_on(1, today).await.unwrap();
    assert_eq!(
        current.workout.map(|w| w.id),
        Some(schedule.steps[1].workout_id)
    );
    assert_eq!(current.schedule.map(|s| s.id), Some(schedule.id));
}

#[tokio::test]
async fn test_exhausted_schedule_without_standalone_workout() {
    let (_temp_dir, manager) = create_test_manager().await;
    let today = date(2024, 5, 6);
    let start = today.checked_sub(7.weeks()).unwrap();

    create_schedule_with_steps(
        &manager,
        1,
        "Block",
        &start.to_string(),
        true,
        false,
        &[3, 1, 2],
    )
    .await;

    let current = manager.current_workout_on(1, today).await.unwrap();
    assert!(current.workout.is_none());
    assert!(current.schedule.is_none());
}

#[tokio::test]
async fn test_loop_schedule_wraps_around() {
    let (_temp_dir, manager) = create_test_manager().await;
    let today = date(2024, 5, 6);
    let start = today.checked_sub(7.weeks()).unwrap();

    let schedule = create_schedule_with_steps(
        &manager,
        1,
        "Loop",
        &start.to_string(),
        true,
        true,
        &[3, 1, 2],
    )
    .await;

    let current = manager.current_workout_on(1, today).await.unwrap();
    assert_eq!(
        current.workout.map(|w| w.id),
        Some(schedule.steps[0].workout_id)
    );
}

#[tokio::test]
async fn test_standalone_workout_fallback() {
    let (_temp_dir, manager) = create_test_manager().await;

    let empty = manager.current_workout_on(1, date(2024, 5, 6)).await.unwrap();
    assert!(empty.workout.is_none() && empty.schedule.is_none());

    // Workouts used by a schedule never count as standalone
    create_schedule_with_steps(&manager, 1, "Old", "2020-01-06", false, false, &[2]).await;
    let older = create_workout(&manager, 1, "Older standalone").await;
    let newer = create_workout(&manager, 1, "Newer standalone").await;
    assert_ne!(older.id, newer.id);

    let current = manager.current_workout_on(1, date(2024, 5, 6)).await.unwrap();
    assert_eq!(current.workout.map(|w| w.id), Some(newer.id));
    assert!(current.schedule.is_none());

    let rendered = manager.current_workout(1).await.unwrap().to_string();
    assert!(rendered.contains("Newer standalone"));
}

#[tokio::test]
async fn test_starting_a_schedule_deactivates_the_others() {
    let (_temp_dir, manager) = create_test_manager().await;

    let a = create_schedule_with_steps(&manager, 1, "A", "2024-01-01", true, false, &[2]).await;
    let b = create_schedule_with_steps(&manager, 1, "B", "2024-01-01", false, false, &[2]).await;
    assert!(a.is_active);

    let started = manager
        .start_schedule_on(1, &Id { id: b.id }, date(2024, 6, 3))
        .await
        .unwrap();
    assert!(started.is_active);
    assert_eq!(started.start_date, date(2024, 6, 3));

    let summaries = manager.list_schedules(1).await.unwrap();
    let active: Vec<u64> = summaries
        .iter()
        .filter(|s| s.is_active)
        .map(|s| s.id)
        .collect();
    assert_eq!(active, vec![b.id]);

    // Activating through an update behaves the same way
    manager
        .update_schedule(
            1,
            &UpdateSchedule {
                id: a.id,
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let b = manager.get_schedule(1, &Id { id: b.id }).await.unwrap();
    assert!(!b.is_active);
}

#[tokio::test]
async fn test_create_schedule_validates_input() {
    let (_temp_dir, manager) = create_test_manager().await;

    let result = manager
        .create_schedule(
            1,
            &CreateSchedule {
                name: "Block".to_string(),
                start_date: Some("04/21/2013".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ManagerError::InvalidInput { .. })));

    let result = manager
        .create_schedule(
            1,
            &CreateSchedule {
                name: "   ".to_string(),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ManagerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_other_users_are_denied() {
    let (_temp_dir, manager) = create_test_manager().await;

    let schedule =
        create_schedule_with_steps(&manager, 1, "Mine", "2024-01-01", false, false, &[1]).await;
    let workout = create_workout(&manager, 1, "Mine").await;

    let denied = |result: Result<_, ManagerError>| {
        matches!(result, Err(ManagerError::AccessDenied { .. }))
    };

    assert!(denied(
        manager
            .get_schedule(2, &Id { id: schedule.id })
            .await
            .map(|_| ())
    ));
    assert!(denied(
        manager
            .start_schedule(2, &Id { id: schedule.id })
            .await
            .map(|_| ())
    ));
    assert!(denied(
        manager
            .add_step(
                2,
                &StepCreate {
                    schedule_id: schedule.id,
                    workout_id: workout.id,
                    duration: 1,
                },
            )
            .await
            .map(|_| ())
    ));
    assert!(denied(
        manager
            .log_session(
                2,
                &LogSession {
                    workout_id: workout.id,
                    ..Default::default()
                },
            )
            .await
            .map(|_| ())
    ));
    assert!(denied(
        manager
            .delete_workout(
                2,
                &DeleteWorkout {
                    id: workout.id,
                    confirmed: true,
                },
            )
            .await
            .map(|_| ())
    ));

    // Nothing leaks into the other user's listings
    assert!(manager.list_schedules(2).await.unwrap().is_empty());
    assert!(manager.list_workouts(2).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_step_editing_through_manager() {
    let (_temp_dir, manager) = create_test_manager().await;
    let schedule =
        create_schedule_with_steps(&manager, 1, "Block", "2024-01-01", false, false, &[3, 1])
            .await;
    let extra = create_workout(&manager, 1, "Extra").await;

    let inserted = manager
        .insert_step(
            1,
            &InsertStep {
                step: StepCreate {
                    schedule_id: schedule.id,
                    workout_id: extra.id,
                    duration: 2,
                },
                position: 0,
            },
        )
        .await
        .unwrap();
    assert_eq!(inserted.order, 0);

    let updated = manager
        .update_step(
            1,
            &UpdateStep {
                id: inserted.id,
                duration: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.duration, 4);

    manager
        .swap_steps(
            1,
            &SwapSteps {
                step1_id: inserted.id,
                step2_id: schedule.steps[1].id,
            },
        )
        .await
        .unwrap();

    let removed = manager
        .remove_step(1, &Id { id: schedule.steps[0].id })
        .await
        .unwrap();
    assert_eq!(removed.id, schedule.steps[0].id);

    let reloaded = manager.get_schedule(1, &Id { id: schedule.id }).await.unwrap();
    let order: Vec<(u64, u32)> = reloaded.steps.iter().map(|s| (s.id, s.order)).collect();
    assert_eq!(order, vec![(schedule.steps[1].id, 0), (inserted.id, 1)]);
    assert_eq!(reloaded.total_weeks(), 5);
}

#[tokio::test]
async fn test_deletes_require_confirmation() {
    let (_temp_dir, manager) = create_test_manager().await;
    let schedule =
        create_schedule_with_steps(&manager, 1, "Block", "2024-01-01", false, false, &[1]).await;
    let workout = create_workout(&manager, 1, "Standalone").await;

    let result = manager
        .delete_schedule(
            1,
            &DeleteSchedule {
                id: schedule.id,
                confirmed: false,
            },
        )
        .await;
    assert!(matches!(result, Err(ManagerError::InvalidInput { .. })));

    let result = manager
        .delete_workout(
            1,
            &DeleteWorkout {
                id: workout.id,
                confirmed: false,
            },
        )
        .await;
    assert!(matches!(result, Err(ManagerError::InvalidInput { .. })));

    // Both still exist
    manager.get_schedule(1, &Id { id: schedule.id }).await.unwrap();
    manager.get_workout(1, &Id { id: workout.id }).await.unwrap();

    let deleted = manager
        .delete_schedule(
            1,
            &DeleteSchedule {
                id: schedule.id,
                confirmed: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(deleted.id, schedule.id);
    assert!(matches!(
        manager.get_schedule(1, &Id { id: schedule.id }).await,
        Err(ManagerError::ScheduleNotFound { .. })
    ));
}

#[tokio::test]
async fn test_calendar_marks_logged_days() {
    let (_temp_dir, manager) = create_test_manager().await;
    let workout = create_workout(&manager, 1, "Legs").await;

    for (day, impression) in [("2024-03-04", "good"), ("2024-03-06", "bad")] {
        manager
            .log_session(
                1,
                &LogSession {
                    workout_id: workout.id,
                    date: Some(day.to_string()),
                    impression: Some(impression.to_string()),
                    notes: None,
                    entries: vec![LogEntry {
                        exercise: "Squat".to_string(),
                        reps: 5,
                        weight: Some(100.0),
                    }],
                },
            )
            .await
            .unwrap();
    }

    let view = manager
        .calendar_on(
            1,
            &CalendarQuery {
                year: Some(2024),
                month: Some(3),
            },
            date(2024, 3, 7),
        )
        .await
        .unwrap();

    assert_eq!(view.month.days.len(), 2);
    assert_eq!(view.month.get(4).map(|d| d.impression), Some(Impression::Good));
    assert_eq!(view.month.get(6).map(|d| d.impression), Some(Impression::Bad));
    assert_eq!(view.month.get(5), None);
    assert_eq!(view.log_months, vec![(2024, 3)]);

    let rendered = view.to_string();
    assert!(rendered.contains("March 2024"));

    let result = manager
        .calendar(
            1,
            &CalendarQuery {
                year: Some(2024),
                month: Some(13),
            },
        )
        .await;
    assert!(matches!(result, Err(ManagerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_log_edits_and_workout_log_book() {
    let (_temp_dir, manager) = create_test_manager().await;
    let workout = create_workout(&manager, 1, "Pull").await;

    let (session, logs) = manager
        .log_session(
            1,
            &LogSession {
                workout_id: workout.id,
                date: Some("2024-03-04".to_string()),
                impression: None,
                notes: Some("Grip gave out".to_string()),
                entries: vec![
                    LogEntry {
                        exercise: "Row".to_string(),
                        reps: 10,
                        weight: Some(40.0),
                    },
                    LogEntry {
                        exercise: "Chin-up".to_string(),
                        reps: 6,
                        weight: None,
                    },
                ],
            },
        )
        .await
        .unwrap();
    assert_eq!(session.impression, Impression::Neutral);
    assert_eq!(logs.len(), 2);

    let updated = manager
        .update_log(
            1,
            &UpdateLog {
                id: logs[0].id,
                clear_weight: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.weight, None);

    manager
        .delete_log(1, &Id { id: logs[1].id })
        .await
        .unwrap();

    let book = manager
        .workout_log(1, &Id { id: workout.id })
        .await
        .unwrap();
    assert_eq!(book.exercises.len(), 1);
    assert!(book.exercises.contains_key("Row"));
}

#[tokio::test]
async fn test_schedule_report_collects_logs_since_start() {
    let (_temp_dir, manager) = create_test_manager().await;
    let schedule =
        create_schedule_with_steps(&manager, 1, "Block", "2024-03-01", false, false, &[4]).await;
    let workout_id = schedule.steps[0].workout_id;

    for day in ["2024-02-27", "2024-03-02", "2024-03-09"] {
        manager
            .log_session(
                1,
                &LogSession {
                    workout_id,
                    date: Some(day.to_string()),
                    entries: vec![LogEntry {
                        exercise: "Deadlift".to_string(),
                        reps: 3,
                        weight: Some(140.0),
                    }],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let report = manager
        .schedule_report(1, &Id { id: schedule.id })
        .await
        .unwrap();
    assert_eq!(report.entry_count(), 2);
    assert_eq!(report.end_date, Some(date(2024, 3, 29)));
    assert!(report.to_string().contains("| 2024-03-09 | Deadlift | 3 | 140 |"));
}

#[tokio::test]
async fn test_manager_persists_across_instances() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("regimen.db");

    {
        let manager = regimen_core::ManagerBuilder::new()
            .with_database_path(Some(&db_path))
            .build()
            .await
            .unwrap();
        create_workout(&manager, 1, "Persisted").await;
    }

    let manager = regimen_core::ManagerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();
    let workouts = manager.list_workouts(1).await.unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].name, "Persisted");
}
