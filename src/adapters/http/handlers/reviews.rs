use crate::app::state::AppState;
use crate::domain::model::Review;
use crate::utils::error::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.reviews.list().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Review>> {
    Ok(Json(state.reviews.get(&id).await?))
}

pub async fn by_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.reviews.by_vendor(&vendor_id).await?))
}

pub async fn by_couple(
    State(state): State<AppState>,
    Path(couple_id): Path<String>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.reviews.by_couple(&couple_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(review): Json<Review>,
) -> Result<(StatusCode, Json<Review>)> {
    let review = state.reviews.create(review).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(review): Json<Review>,
) -> Result<Json<Review>> {
    Ok(Json(state.reviews.update(&id, review).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.reviews.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
