use crate::app::state::AppState;
use crate::domain::model::User;
use crate::utils::error::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(User::redacted).collect()))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>> {
    Ok(Json(state.users.get(&id).await?.redacted()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.users.create(user).await?;
    Ok((StatusCode::CREATED, Json(user.redacted())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(user): Json<User>,
) -> Result<Json<User>> {
    Ok(Json(state.users.update(&id, user).await?.redacted()))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.users.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
