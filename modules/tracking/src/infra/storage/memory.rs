//! Thread-safe in-memory repositories. Back the `--mock` server mode and the
//! service-level tests; behavior mirrors the Postgres adapters, including
//! insertion-order listing and the guarded completion write.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::model::{NewTask, NewUser, Task, User, UserFilter, UserPatch};
use crate::domain::ports::{TaskRepository, UserRepository};

#[derive(Debug, Default)]
struct UserStoreState {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<UserStoreState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field_matches(value: &str, needle: &Option<String>) -> bool {
    match needle.as_deref().filter(|s| !s.is_empty()) {
        Some(n) => value.to_lowercase().contains(&n.to_lowercase()),
        None => true,
    }
}

fn matches_filter(user: &User, filter: &UserFilter) -> bool {
    field_matches(&user.name, &filter.name)
        && field_matches(&user.surname, &filter.surname)
        && field_matches(&user.patronymic, &filter.patronymic)
        && field_matches(&user.passport_number, &filter.passport_number)
        && field_matches(&user.address, &filter.address)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, new: NewUser) -> anyhow::Result<User> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("user store lock poisoned: {e}"))?;

        state.next_id += 1;
        let user = User {
            id: state.next_id,
            name: new.name,
            surname: new.surname,
            patronymic: new.patronymic,
            passport_number: new.passport_number,
            address: new.address,
            created_at: new.created_at,
            updated_at: None,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("user store lock poisoned: {e}"))?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_passport(&self, passport_number: &str) -> anyhow::Result<Option<User>> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("user store lock poisoned: {e}"))?;
        Ok(state
            .users
            .values()
            .find(|u| u.passport_number == passport_number)
            .cloned())
    }

    async fn list(
        &self,
        filter: &UserFilter,
        limit: u32,
        offset: u32,
    ) -> anyhow::Result<Vec<User>> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("user store lock poisoned: {e}"))?;
        Ok(state
            .users
            .values()
            .filter(|u| matches_filter(u, filter))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: &UserPatch,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("user store lock poisoned: {e}"))?;

        let Some(user) = state.users.get_mut(&id) else {
            return Ok(false);
        };

        if let Some(name) = &patch.name {
            user.name = name.clone();
        }
        if let Some(surname) = &patch.surname {
            user.surname = surname.clone();
        }
        if let Some(patronymic) = &patch.patronymic {
            user.patronymic = patronymic.clone();
        }
        if let Some(passport_number) = &patch.passport_number {
            user.passport_number = passport_number.clone();
        }
        if let Some(address) = &patch.address {
            user.address = address.clone();
        }
        user.updated_at = Some(updated_at);
        Ok(true)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("user store lock poisoned: {e}"))?;
        Ok(state.users.remove(&id).is_some())
    }
}

#[derive(Debug, Default)]
struct TaskStoreState {
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<TaskStoreState>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, new: NewTask) -> anyhow::Result<Task> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("task store lock poisoned: {e}"))?;

        state.next_id += 1;
        let task = Task {
            id: state.next_id,
            user_id: new.user_id,
            description: new.description,
            duration: 0,
            completed: false,
            created_at: new.created_at,
            updated_at: None,
        };
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Task>> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("task store lock poisoned: {e}"))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("task store lock poisoned: {e}"))?;

        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| {
                t.user_id == user_id && t.created_at >= date_from && t.created_at <= date_to
            })
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.duration.cmp(&a.duration));
        Ok(tasks)
    }

    async fn complete(
        &self,
        id: i64,
        duration: i64,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("task store lock poisoned: {e}"))?;

        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(false);
        };
        if task.completed {
            return Ok(false);
        }

        task.completed = true;
        task.duration = duration;
        task.updated_at = Some(updated_at);
        Ok(true)
    }
}
