use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query},
    Extension, Json,
};
use tracing::info;

use crate::api::rest::dto::{
    CreateTaskReq, CreateUserReq, CreatedResp, HealthResp, ListTasksQuery, ListUsersQuery,
    SuccessResp, TaskDto, UpdateUserReq, UserDto,
};
use crate::api::rest::error::ApiError;
use crate::api::rest::validation;
use crate::domain::model::{UserFilter, UserPatch};
use crate::domain::{TaskService, UserService};

/// Identity reported by the health endpoint.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub name: String,
}

fn id_from(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request("invalid item id param"))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 200, description = "User created", body = CreatedResp),
        (status = 400, description = "Invalid passport number", body = crate::api::rest::error::ErrorBody),
        (status = 409, description = "Passport number already registered", body = crate::api::rest::error::ErrorBody),
        (status = 500, description = "Lookup or storage failure", body = crate::api::rest::error::ErrorBody),
    )
)]
pub async fn create_user(
    Extension(users): Extension<Arc<UserService>>,
    body: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<Json<CreatedResp>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::bad_request(e.to_string()))?;
    info!("Creating user from passport");

    if !validation::is_valid_passport(&req.passport_number) {
        return Err(ApiError::bad_request("invalid passport number"));
    }

    let id = users.create_user(&req.passport_number).await?;
    Ok(Json(CreatedResp { id }))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Invalid id", body = crate::api::rest::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::api::rest::error::ErrorBody),
    )
)]
pub async fn get_user(
    Extension(users): Extension<Arc<UserService>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let id = id_from(path)?;
    let user = users.get_user(id).await?;
    Ok(Json(UserDto::from(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(
        ("name" = Option<String>, Query, description = "Substring filter"),
        ("surname" = Option<String>, Query, description = "Substring filter"),
        ("patronymic" = Option<String>, Query, description = "Substring filter"),
        ("passportNumber" = Option<String>, Query, description = "Substring filter"),
        ("address" = Option<String>, Query, description = "Substring filter"),
        ("limit" = Option<u32>, Query, description = "Page size, capped at 10"),
        ("offset" = Option<u32>, Query, description = "Rows to skip"),
    ),
    responses(
        (status = 200, description = "Matching users", body = [UserDto]),
        (status = 400, description = "Invalid filter", body = crate::api::rest::error::ErrorBody),
    )
)]
pub async fn list_users(
    Extension(users): Extension<Arc<UserService>>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.to_string()))?;

    if let Some(msg) = validation::validate_list_users(&query) {
        return Err(ApiError::bad_request(msg));
    }

    let filter = UserFilter::from(&query);
    let users = users.list_users(filter, query.limit, query.offset).await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "User updated", body = SuccessResp),
        (status = 400, description = "Invalid fields", body = crate::api::rest::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::api::rest::error::ErrorBody),
    )
)]
pub async fn update_user(
    Extension(users): Extension<Arc<UserService>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateUserReq>, JsonRejection>,
) -> Result<Json<SuccessResp>, ApiError> {
    let id = id_from(path)?;
    let Json(req) = body.map_err(|e| ApiError::bad_request(e.to_string()))?;

    if let Some(msg) = validation::validate_update_user(&req) {
        return Err(ApiError::bad_request(msg));
    }

    users.update_user(id, UserPatch::from(req)).await?;
    Ok(Json(SuccessResp { success: true }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = SuccessResp),
        (status = 404, description = "Not found", body = crate::api::rest::error::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::api::rest::error::ErrorBody),
    )
)]
pub async fn delete_user(
    Extension(users): Extension<Arc<UserService>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResp>, ApiError> {
    let id = id_from(path)?;
    users.delete_user(id).await?;
    Ok(Json(SuccessResp { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    tag = "tasks",
    request_body = CreateTaskReq,
    responses(
        (status = 200, description = "Task created", body = CreatedResp),
        (status = 400, description = "Malformed body", body = crate::api::rest::error::ErrorBody),
        (status = 404, description = "User not found", body = crate::api::rest::error::ErrorBody),
    )
)]
pub async fn create_task(
    Extension(tasks): Extension<Arc<TaskService>>,
    body: Result<Json<CreateTaskReq>, JsonRejection>,
) -> Result<Json<CreatedResp>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::bad_request(e.to_string()))?;
    info!("Creating task");

    let id = tasks.create_task(req.user_id, &req.description).await?;
    Ok(Json(CreatedResp { id }))
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    tag = "tasks",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = TaskDto),
        (status = 400, description = "Invalid id", body = crate::api::rest::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::api::rest::error::ErrorBody),
    )
)]
pub async fn get_task(
    Extension(tasks): Extension<Arc<TaskService>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskDto>, ApiError> {
    let id = id_from(path)?;
    let task = tasks.get_task(id).await?;
    Ok(Json(TaskDto::from(task)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    tag = "tasks",
    params(
        ("userId" = i64, Query, description = "Owning user"),
        ("dateFrom" = String, Query, description = "Inclusive RFC 3339 lower bound"),
        ("dateTo" = String, Query, description = "Inclusive RFC 3339 upper bound"),
    ),
    responses(
        (status = 200, description = "User's tasks, longest first", body = [TaskDto]),
        (status = 400, description = "Missing or inverted range", body = crate::api::rest::error::ErrorBody),
        (status = 404, description = "User not found", body = crate::api::rest::error::ErrorBody),
    )
)]
pub async fn list_tasks(
    Extension(tasks): Extension<Arc<TaskService>>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.to_string()))?;

    if let Some(msg) = validation::validate_list_tasks(&query) {
        return Err(ApiError::bad_request(msg));
    }

    // Validation guarantees all three are present.
    let (Some(user_id), Some(date_from), Some(date_to)) =
        (query.user_id, query.date_from, query.date_to)
    else {
        return Err(ApiError::bad_request("invalid task list query"));
    };

    let tasks = tasks.list_tasks(user_id, date_from, date_to).await?;
    Ok(Json(tasks.into_iter().map(TaskDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/tasks/{id}/complete",
    tag = "tasks",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task completed", body = SuccessResp),
        (status = 404, description = "Not found", body = crate::api::rest::error::ErrorBody),
        (status = 409, description = "Already completed", body = crate::api::rest::error::ErrorBody),
    )
)]
pub async fn complete_task(
    Extension(tasks): Extension<Arc<TaskService>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResp>, ApiError> {
    let id = id_from(path)?;
    tasks.complete_task(id).await?;
    Ok(Json(SuccessResp { success: true }))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Liveness", body = HealthResp))
)]
pub async fn health(Extension(info): Extension<Arc<ServiceInfo>>) -> Json<HealthResp> {
    Json(HealthResp {
        service: info.name.clone(),
        status: "ok".to_string(),
    })
}
