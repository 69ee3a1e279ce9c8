use crate::app::state::AppState;
use crate::domain::model::Offering;
use crate::utils::error::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Offering>>> {
    Ok(Json(state.offerings.list().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Offering>> {
    Ok(Json(state.offerings.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(offering): Json<Offering>,
) -> Result<(StatusCode, Json<Offering>)> {
    let offering = state.offerings.create(offering).await?;
    Ok((StatusCode::CREATED, Json(offering)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(offering): Json<Offering>,
) -> Result<Json<Offering>> {
    Ok(Json(state.offerings.update(&id, offering).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.offerings.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
