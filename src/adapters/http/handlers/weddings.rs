use crate::app::state::AppState;
use crate::core::{WeddingProfile, WeddingProfileRequest};
use crate::domain::model::Wedding;
use crate::utils::error::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Wedding>>> {
    Ok(Json(state.weddings.list().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Wedding>> {
    Ok(Json(state.weddings.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(wedding): Json<Wedding>,
) -> Result<(StatusCode, Json<Wedding>)> {
    let wedding = state.weddings.create(wedding).await?;
    Ok((StatusCode::CREATED, Json(wedding)))
}

pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<WeddingProfileRequest>,
) -> Result<(StatusCode, Json<WeddingProfile>)> {
    let profile = state.weddings.create_profile(request).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(wedding): Json<Wedding>,
) -> Result<Json<Wedding>> {
    Ok(Json(state.weddings.update(&id, wedding).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.weddings.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
