use crate::app::state::AppState;
use crate::domain::model::Task;
use crate::utils::error::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Task>>> {
    Ok(Json(state.tasks.list().await?))
}

pub async fn pending(State(state): State<AppState>) -> Result<Json<Vec<Task>>> {
    Ok(Json(state.tasks.pending().await?))
}

pub async fn by_wedding(
    State(state): State<AppState>,
    Path(wedding_id): Path<String>,
) -> Result<Json<Vec<Task>>> {
    Ok(Json(state.tasks.by_wedding(&wedding_id).await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Task>> {
    Ok(Json(state.tasks.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(task): Json<Task>,
) -> Result<(StatusCode, Json<Task>)> {
    let task = state.tasks.create(task).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(task): Json<Task>,
) -> Result<Json<Task>> {
    Ok(Json(state.tasks.update(&id, task).await?))
}

pub async fn complete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Task>> {
    Ok(Json(state.tasks.complete(&id).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.tasks.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
