//! Task service behavior: creation against existing users, the one-shot
//! completion transition with elapsed-minutes duration, and ranged listing
//! ordered by duration.

use std::sync::Arc;

use chrono::{Duration, Utc};

use tracking::domain::error::DomainError;
use tracking::domain::model::{NewTask, PersonInfo};
use tracking::domain::ports::TaskRepository;
use tracking::domain::{TaskService, UserService, UserServiceConfig};
use tracking::infra::people::FixedPeopleDirectory;
use tracking::infra::storage::memory::{InMemoryTaskRepository, InMemoryUserRepository};

struct Fixture {
    tasks: TaskService,
    task_repo: Arc<InMemoryTaskRepository>,
    user_id: i64,
}

async fn fixture() -> Fixture {
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let users = Arc::new(UserService::new(
        user_repo,
        Arc::new(FixedPeopleDirectory::new(PersonInfo {
            surname: "Smith".into(),
            name: "Ann".into(),
            patronymic: String::new(),
            address: "Main Street 1".into(),
        })),
        UserServiceConfig::default(),
    ));
    let user_id = users.create_user("4111 111111").await.unwrap();

    let task_repo = Arc::new(InMemoryTaskRepository::new());
    let tasks = TaskService::new(task_repo.clone(), users);

    Fixture {
        tasks,
        task_repo,
        user_id,
    }
}

#[tokio::test]
async fn create_task_starts_incomplete_with_zero_duration() {
    let fx = fixture().await;

    let id = fx.tasks.create_task(fx.user_id, "write report").await.unwrap();
    assert!(id > 0);

    let task = fx.tasks.get_task(id).await.unwrap();
    assert_eq!(task.user_id, fx.user_id);
    assert_eq!(task.description, "write report");
    assert_eq!(task.duration, 0);
    assert!(!task.completed);
    assert!(task.updated_at.is_none());
}

#[tokio::test]
async fn create_task_requires_existing_user() {
    let fx = fixture().await;

    let err = fx.tasks.create_task(999, "orphan work").await.unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { id: 999 }));
}

#[tokio::test]
async fn get_task_missing_is_not_found() {
    let fx = fixture().await;

    let err = fx.tasks.get_task(5).await.unwrap_err();
    assert!(matches!(err, DomainError::TaskNotFound { id: 5 }));
}

#[tokio::test]
async fn complete_task_computes_truncated_elapsed_minutes() {
    let fx = fixture().await;

    // A session opened 90 seconds ago has run for exactly one whole minute.
    let task = fx
        .task_repo
        .insert(NewTask {
            user_id: fx.user_id,
            description: "short session".into(),
            created_at: Utc::now() - Duration::seconds(90),
        })
        .await
        .unwrap();

    fx.tasks.complete_task(task.id).await.unwrap();

    let task = fx.tasks.get_task(task.id).await.unwrap();
    assert!(task.completed);
    assert_eq!(task.duration, 1);
    assert!(task.updated_at.is_some());
}

#[tokio::test]
async fn complete_task_is_rejected_the_second_time() {
    let fx = fixture().await;

    let task = fx
        .task_repo
        .insert(NewTask {
            user_id: fx.user_id,
            description: "session".into(),
            created_at: Utc::now() - Duration::minutes(30),
        })
        .await
        .unwrap();

    fx.tasks.complete_task(task.id).await.unwrap();
    let completed = fx.tasks.get_task(task.id).await.unwrap();

    let err = fx.tasks.complete_task(task.id).await.unwrap_err();
    assert!(matches!(err, DomainError::TaskAlreadyCompleted { .. }));

    // The rejected second call must not touch the stored duration.
    let unchanged = fx.tasks.get_task(task.id).await.unwrap();
    assert_eq!(unchanged.duration, completed.duration);
    assert_eq!(unchanged.updated_at, completed.updated_at);
}

#[tokio::test]
async fn complete_task_missing_is_not_found() {
    let fx = fixture().await;

    let err = fx.tasks.complete_task(77).await.unwrap_err();
    assert!(matches!(err, DomainError::TaskNotFound { id: 77 }));
}

#[tokio::test]
async fn list_tasks_orders_by_duration_descending() {
    let fx = fixture().await;
    let now = Utc::now();

    for minutes in [5i64, 20, 1] {
        let task = fx
            .task_repo
            .insert(NewTask {
                user_id: fx.user_id,
                description: format!("session {minutes}"),
                created_at: now - Duration::minutes(minutes),
            })
            .await
            .unwrap();
        fx.tasks.complete_task(task.id).await.unwrap();
    }

    let tasks = fx
        .tasks
        .list_tasks(fx.user_id, now - Duration::hours(1), now + Duration::hours(1))
        .await
        .unwrap();

    let durations: Vec<i64> = tasks.iter().map(|t| t.duration).collect();
    assert_eq!(durations, vec![20, 5, 1]);
}

#[tokio::test]
async fn list_tasks_respects_inclusive_date_range() {
    let fx = fixture().await;
    let now = Utc::now();

    let inside = fx
        .task_repo
        .insert(NewTask {
            user_id: fx.user_id,
            description: "inside".into(),
            created_at: now - Duration::days(1),
        })
        .await
        .unwrap();
    fx.task_repo
        .insert(NewTask {
            user_id: fx.user_id,
            description: "outside".into(),
            created_at: now - Duration::days(10),
        })
        .await
        .unwrap();

    let tasks = fx
        .tasks
        .list_tasks(fx.user_id, now - Duration::days(2), now)
        .await
        .unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, inside.id);
}

#[tokio::test]
async fn list_tasks_unknown_user_is_not_found() {
    let fx = fixture().await;
    let now = Utc::now();

    let err = fx
        .tasks
        .list_tasks(12345, now - Duration::days(1), now)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { id: 12345 }));
}
