use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::model::{NewTask, Task};
use crate::domain::ports::TaskRepository;

const TASK_COLUMNS: &str =
    "id, user_id, description, duration, completed, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    user_id: i64,
    description: String,
    duration: i64,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            description: row.description,
            duration: row.duration,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, new: NewTask) -> anyhow::Result<Task> {
        let row: TaskRow = sqlx::query_as(&format!(
            "INSERT INTO tasks (user_id, description, duration, completed, created_at) \
             VALUES ($1, $2, 0, FALSE, $3) RETURNING {TASK_COLUMNS}"
        ))
        .bind(new.user_id)
        .bind(&new.description)
        .bind(new.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Task>> {
        let row: Option<TaskRow> =
            sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE user_id = $1 AND created_at BETWEEN $2 AND $3 \
             ORDER BY duration DESC"
        ))
        .bind(user_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn complete(
        &self,
        id: i64,
        duration: i64,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        // Guarded write: only an incomplete task transitions, so a racing
        // second caller affects zero rows.
        let result = sqlx::query(
            "UPDATE tasks SET completed = TRUE, duration = $2, updated_at = $3 \
             WHERE id = $1 AND completed = FALSE",
        )
        .bind(id)
        .bind(duration)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
