use crate::app::state::AppState;
use crate::core::PaymentRequest;
use crate::domain::model::Booking;
use crate::utils::error::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Booking>>> {
    Ok(Json(state.bookings.list().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Booking>> {
    Ok(Json(state.bookings.get(&id).await?))
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Json(booking): Json<Booking>,
) -> Result<(StatusCode, Json<Booking>)> {
    let booking = state.bookings.create(booking).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(booking): Json<Booking>,
) -> Result<Json<Booking>> {
    Ok(Json(state.bookings.update(&id, booking).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.bookings.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn confirm(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Booking>> {
    Ok(Json(state.bookings.confirm(&id).await?))
}

pub async fn cancel(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Booking>> {
    Ok(Json(state.bookings.cancel(&id).await?))
}

#[tracing::instrument(skip_all, fields(booking_id = %id))]
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payment): Json<PaymentRequest>,
) -> Result<Json<Booking>> {
    Ok(Json(state.bookings.record_payment(&id, payment).await?))
}
