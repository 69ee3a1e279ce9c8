use crate::adapters::storage::archive_data_dir;
use crate::app::state::AppState;
use crate::core::AdminStats;
use crate::domain::model::{Admin, Couple, User, Vendor};
use crate::utils::error::Result;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[tracing::instrument(skip_all, fields(email = %credentials.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<Admin>> {
    let admin = state.admin.login(&credentials.email, &credentials.password).await?;
    Ok(Json(admin.redacted()))
}

pub async fn list_admins(State(state): State<AppState>) -> Result<Json<Vec<Admin>>> {
    let admins = state.admin.admins().await?;
    Ok(Json(admins.into_iter().map(Admin::redacted).collect()))
}

pub async fn get_admin(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Admin>> {
    Ok(Json(state.admin.admin(&id).await?.redacted()))
}

pub async fn create_admin(
    State(state): State<AppState>,
    Json(admin): Json<Admin>,
) -> Result<(StatusCode, Json<Admin>)> {
    let admin = state.admin.create_admin(admin).await?;
    Ok((StatusCode::CREATED, Json(admin.redacted())))
}

pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(admin): Json<Admin>,
) -> Result<Json<Admin>> {
    Ok(Json(state.admin.update_admin(&id, admin).await?.redacted()))
}

pub async fn delete_admin(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.admin.delete_admin(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.admin.users().await?;
    Ok(Json(users.into_iter().map(User::redacted).collect()))
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.admin.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_vendors(State(state): State<AppState>) -> Result<Json<Vec<Vendor>>> {
    let vendors = state.admin.vendors().await?;
    Ok(Json(vendors.into_iter().map(Vendor::redacted).collect()))
}

pub async fn get_vendor(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Vendor>> {
    Ok(Json(state.admin.vendor(&id).await?.redacted()))
}

pub async fn delete_vendor(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.admin.delete_vendor(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn approve_vendor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vendor>> {
    Ok(Json(state.admin.approve_vendor(&id).await?.redacted()))
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectQuery {
    pub reason: Option<String>,
}

pub async fn reject_vendor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RejectQuery>,
) -> Result<Json<Vendor>> {
    Ok(Json(state.admin.reject_vendor(&id, query.reason).await?.redacted()))
}

pub async fn list_couples(State(state): State<AppState>) -> Result<Json<Vec<Couple>>> {
    let couples = state.admin.couples().await?;
    Ok(Json(couples.into_iter().map(Couple::redacted).collect()))
}

pub async fn get_couple(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Couple>> {
    Ok(Json(state.admin.couple(&id).await?.redacted()))
}

pub async fn delete_couple(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.admin.delete_couple(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<AdminStats>> {
    Ok(Json(state.admin.stats().await?))
}

/// Zip snapshot of every collection in the data directory.
#[tracing::instrument(skip_all)]
pub async fn backup(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let archive = archive_data_dir(state.storage.as_ref()).await?;
    tracing::info!(bytes = archive.len(), "Built data backup");
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"wedding-market-backup.zip\""),
        ],
        archive,
    ))
}
