use crate::app::state::AppState;
use crate::domain::model::Couple;
use crate::utils::error::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Couple>>> {
    let couples = state.couples.list().await?;
    Ok(Json(couples.into_iter().map(Couple::redacted).collect()))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Couple>> {
    Ok(Json(state.couples.get(&id).await?.redacted()))
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Json(couple): Json<Couple>,
) -> Result<(StatusCode, Json<Couple>)> {
    let couple = state.couples.create(couple).await?;
    Ok((StatusCode::CREATED, Json(couple.redacted())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(couple): Json<Couple>,
) -> Result<Json<Couple>> {
    Ok(Json(state.couples.update(&id, couple).await?.redacted()))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.couples.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
