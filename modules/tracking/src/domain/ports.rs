use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::model::{NewTask, NewUser, PersonInfo, Task, User, UserFilter, UserPatch};

/// Persistence port for users. Object-safe and async-friendly via
/// `async_trait`; "no rows" is `None`/`false`, never an error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a fully-formed user; storage assigns the id.
    async fn insert(&self, new: NewUser) -> anyhow::Result<User>;
    /// Load a user by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    /// Load a user by the unique passport number.
    async fn find_by_passport(&self, passport_number: &str) -> anyhow::Result<Option<User>>;
    /// List users matching the filter, in insertion order.
    async fn list(&self, filter: &UserFilter, limit: u32, offset: u32)
        -> anyhow::Result<Vec<User>>;
    /// Apply the present fields of `patch` and stamp `updated_at`.
    /// Returns true if a row was updated.
    async fn update(
        &self,
        id: i64,
        patch: &UserPatch,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}

/// Persistence port for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new session with duration 0 and completed = false.
    async fn insert(&self, new: NewTask) -> anyhow::Result<Task>;
    /// Load a task by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Task>>;
    /// All tasks of one user created within the inclusive range, longest
    /// duration first.
    async fn list_for_user(
        &self,
        user_id: i64,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Task>>;
    /// One-shot completion: marks the task completed and writes its duration,
    /// guarded on `completed = false`. Returns true if the row transitioned.
    async fn complete(
        &self,
        id: i64,
        duration: i64,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
}

/// Outbound port to the people-directory collaborator: resolves a passport
/// serie/number pair into identity fields.
#[async_trait]
pub trait PeopleDirectory: Send + Sync {
    async fn lookup(&self, serie: &str, number: &str) -> Result<PersonInfo, DomainError>;
}
