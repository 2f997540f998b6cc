//! REST API endpoints for the task board.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use moneta_core::tasks::{NewTask, Task, TaskStatus, TaskUpdate};

async fn list_tasks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.task_service.list_tasks()?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(new_task): Json<NewTask>,
) -> ApiResult<Json<Task>> {
    let task = state.task_service.create_task(new_task).await?;
    Ok(Json(task))
}

async fn update_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut task_update): Json<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    task_update.id = Some(id);
    let task = state.task_service.update_task(task_update).await?;
    Ok(Json(task))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveTaskRequest {
    status: TaskStatus,
}

/// PUT /tasks/:id/status - moves a task to another board column.
async fn move_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<MoveTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = state.task_service.move_task(&id, request.status).await?;
    Ok(Json(task))
}

async fn delete_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.task_service.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .route("/tasks/{id}/status", put(move_task))
}
