use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{Task, User, UserFilter, UserPatch};

/// REST representation of a user. Field names match the stored wire format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub passport_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// REST representation of a task (work session).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskDto {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    /// Whole minutes accumulated at completion time.
    pub duration: i64,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserReq {
    #[serde(rename = "passportNumber")]
    pub passport_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResp {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResp {
    pub success: bool,
}

/// Partial update request; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateUserReq {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    #[serde(rename = "passportNumber")]
    pub passport_number: Option<String>,
    pub address: Option<String>,
}

/// Query parameters for the user list: optional substring filters plus
/// offset pagination.
#[derive(Debug, Clone, Deserialize, ToSchema, Default)]
pub struct ListUsersQuery {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    #[serde(rename = "passportNumber")]
    pub passport_number: Option<String>,
    pub address: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskReq {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub description: String,
}

/// Query parameters for the task list. All three are required; missing ones
/// are reported together by validation.
#[derive(Debug, Clone, Deserialize, ToSchema, Default)]
pub struct ListTasksQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(rename = "dateFrom")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(rename = "dateTo")]
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResp {
    pub service: String,
    pub status: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            patronymic: user.patronymic,
            passport_number: user.passport_number,
            address: user.address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            description: task.description,
            duration: task.duration,
            completed: task.completed,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            patronymic: req.patronymic,
            passport_number: req.passport_number,
            address: req.address,
        }
    }
}

impl From<&ListUsersQuery> for UserFilter {
    fn from(query: &ListUsersQuery) -> Self {
        Self {
            name: query.name.clone(),
            surname: query.surname.clone(),
            patronymic: query.patronymic.clone(),
            passport_number: query.passport_number.clone(),
            address: query.address.clone(),
        }
    }
}
