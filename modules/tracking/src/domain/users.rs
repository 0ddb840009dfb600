use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, User, UserFilter, UserPatch};
use crate::domain::ports::{PeopleDirectory, UserRepository};

/// Domain service owning the user lifecycle. Depends only on the repository
/// and people-directory ports, not on infra types.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    people: Arc<dyn PeopleDirectory>,
    config: UserServiceConfig,
}

/// Pagination knobs for user listing.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 10,
        }
    }
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        people: Arc<dyn PeopleDirectory>,
        config: UserServiceConfig,
    ) -> Self {
        Self {
            repo,
            people,
            config,
        }
    }

    /// Register a user from a passport number: dedupe, enrich via the people
    /// directory, persist. Returns the storage-assigned id.
    #[instrument(name = "tracking.users.create", skip(self), fields(passport = %passport_number))]
    pub async fn create_user(&self, passport_number: &str) -> Result<i64, DomainError> {
        info!("Creating user");

        if self
            .repo
            .find_by_passport(passport_number)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .is_some()
        {
            return Err(DomainError::passport_already_registered(passport_number));
        }

        // The HTTP layer has already validated the shape; a malformed value
        // reaching this point is a caller bug, not a panic.
        let (serie, number) = passport_number
            .split_once(' ')
            .ok_or_else(|| DomainError::malformed_passport(passport_number))?;

        let info = self.people.lookup(serie, number).await?;

        let user = self
            .repo
            .insert(NewUser {
                name: info.name,
                surname: info.surname,
                patronymic: info.patronymic,
                passport_number: passport_number.to_string(),
                address: info.address,
                created_at: Utc::now(),
            })
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Created user with id={}", user.id);
        Ok(user.id)
    }

    #[instrument(name = "tracking.users.get", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        debug!("Getting user by id");

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// List users with offset pagination. The limit defaults to
    /// `default_page_size` when absent or zero and clamps to `max_page_size`;
    /// the offset passes through unmodified.
    #[instrument(name = "tracking.users.list", skip(self, filter))]
    pub async fn list_users(
        &self,
        filter: UserFilter,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<User>, DomainError> {
        let limit = match limit {
            None | Some(0) => self.config.default_page_size,
            Some(n) => n.min(self.config.max_page_size),
        };
        let offset = offset.unwrap_or(0);

        let users = self
            .repo
            .list(&filter, limit, offset)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Listed {} users", users.len());
        Ok(users)
    }

    /// Partial update: checks existence first, then applies the present
    /// fields in one statement, always stamping `updated_at`.
    #[instrument(name = "tracking.users.update", skip(self, patch), fields(user_id = %id))]
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<(), DomainError> {
        info!("Updating user");

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        self.repo
            .update(id, &patch, Utc::now())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        Ok(())
    }

    #[instrument(name = "tracking.users.delete", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        info!("Deleting user");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::user_not_found(id));
        }

        Ok(())
    }
}
