use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use workwise_core::tasks::{NewTask, Task};

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedTasks {
    pub created: usize,
}

async fn get_individual_tasks(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(
        state.task_service.get_individual_tasks(&user.user_id)?,
    ))
}

async fn create_tasks(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(tasks): Json<Vec<NewTask>>,
) -> ApiResult<(StatusCode, Json<CreatedTasks>)> {
    let created = state
        .task_service
        .create_tasks(tasks, &user.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedTasks { created })))
}

async fn update_task(
    Path(task_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(task): Json<NewTask>,
) -> ApiResult<Json<Task>> {
    let t = state
        .task_service
        .update_task(&task_id, task, &user.user_id)
        .await?;
    Ok(Json(t))
}

async fn delete_task(
    Path(task_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state
        .task_service
        .delete_task(&task_id, &user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(get_individual_tasks).post(create_tasks))
        .route("/task/{task_id}", put(update_task).delete(delete_task))
}
