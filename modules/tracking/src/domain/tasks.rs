use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{NewTask, Task};
use crate::domain::ports::TaskRepository;
use crate::domain::users::UserService;

/// Domain service owning the task (work session) lifecycle. Delegates user
/// existence checks to the user service.
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
    users: Arc<UserService>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>, users: Arc<UserService>) -> Self {
        Self { repo, users }
    }

    /// Open a work session for an existing user. Duration starts at zero.
    #[instrument(name = "tracking.tasks.create", skip(self, description), fields(user_id = %user_id))]
    pub async fn create_task(&self, user_id: i64, description: &str) -> Result<i64, DomainError> {
        info!("Creating task");

        self.users.get_user(user_id).await?;

        let task = self
            .repo
            .insert(NewTask {
                user_id,
                description: description.to_string(),
                created_at: Utc::now(),
            })
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Created task with id={}", task.id);
        Ok(task.id)
    }

    #[instrument(name = "tracking.tasks.get", skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: i64) -> Result<Task, DomainError> {
        debug!("Getting task by id");

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::task_not_found(id))
    }

    /// Sessions of one user created within the inclusive date range, longest
    /// first. Surfaces NotFound for an unknown user.
    #[instrument(name = "tracking.tasks.list", skip(self), fields(user_id = %user_id))]
    pub async fn list_tasks(
        &self,
        user_id: i64,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
    ) -> Result<Vec<Task>, DomainError> {
        self.users.get_user(user_id).await?;

        let tasks = self
            .repo
            .list_for_user(user_id, date_from, date_to)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Listed {} tasks", tasks.len());
        Ok(tasks)
    }

    /// One-way completion transition. Duration is the elapsed whole minutes
    /// since creation, truncating. The write is guarded on `completed =
    /// false`, so two racing callers cannot both complete the same task.
    #[instrument(name = "tracking.tasks.complete", skip(self), fields(task_id = %id))]
    pub async fn complete_task(&self, id: i64) -> Result<(), DomainError> {
        info!("Completing task");

        let task = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::task_not_found(id))?;

        if task.completed {
            return Err(DomainError::task_already_completed(id));
        }

        let now = Utc::now();
        let duration = (now - task.created_at).num_minutes().max(0);

        let transitioned = self
            .repo
            .complete(id, duration, now)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        // Zero rows means another caller won the race since our read.
        if !transitioned {
            return Err(DomainError::task_already_completed(id));
        }

        info!("Completed task, duration={}min", duration);
        Ok(())
    }
}
