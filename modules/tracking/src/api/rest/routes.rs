use std::sync::Arc;

use axum::{
    response::Html,
    routing::{get, post},
    Extension, Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::rest::error::ErrorBody;
use crate::api::rest::handlers::{self, ServiceInfo};
use crate::api::rest::dto;
use crate::domain::{TaskService, UserService};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Time Tracker",
        description = "A simple time tracker",
        version = "1.0.0"
    ),
    paths(
        handlers::create_user,
        handlers::get_user,
        handlers::list_users,
        handlers::update_user,
        handlers::delete_user,
        handlers::create_task,
        handlers::get_task,
        handlers::list_tasks,
        handlers::complete_task,
        handlers::health,
    ),
    components(schemas(
        dto::UserDto,
        dto::TaskDto,
        dto::CreateUserReq,
        dto::UpdateUserReq,
        dto::CreateTaskReq,
        dto::CreatedResp,
        dto::SuccessResp,
        dto::HealthResp,
        ErrorBody,
    )),
    tags(
        (name = "users", description = "User registry"),
        (name = "tasks", description = "Work sessions"),
        (name = "health", description = "Liveness"),
    )
)]
struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn serve_docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Time Tracker API Docs</title>
  <script src="https://unpkg.com/@stoplight/elements@latest/web-components.min.js"></script>
  <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements@latest/styles.min.css">
</head>
<body>
  <elements-api apiDescriptionUrl="/openapi.json" router="hash" layout="sidebar"></elements-api>
</body>
</html>"#,
    )
}

/// Assemble the HTTP surface: versioned CRUD routes, liveness, and the
/// OpenAPI document with its doc browser.
pub fn build_router(
    users: Arc<UserService>,
    tasks: Arc<TaskService>,
    service_name: &str,
) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/docs", get(serve_docs))
        .route("/openapi.json", get(openapi_json))
        .route(
            "/api/v1/users",
            post(handlers::create_user).get(handlers::list_users),
        )
        .route(
            "/api/v1/users/{id}",
            get(handlers::get_user)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/api/v1/tasks",
            post(handlers::create_task).get(handlers::list_tasks),
        )
        .route("/api/v1/tasks/{id}", get(handlers::get_task))
        .route("/api/v1/tasks/{id}/complete", post(handlers::complete_task))
        .layer(Extension(users))
        .layer(Extension(tasks))
        .layer(Extension(Arc::new(ServiceInfo {
            name: service_name.to_string(),
        })))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/users",
            "/api/v1/users/{id}",
            "/api/v1/tasks",
            "/api/v1/tasks/{id}",
            "/api/v1/tasks/{id}/complete",
            "/health",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
