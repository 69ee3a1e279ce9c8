use crate::app::state::AppState;
use crate::core::{VendorProfileRequest, VendorSearchCriteria};
use crate::domain::model::{
    Location, PortfolioItem, ServicePackage, SocialMediaPlatform, Vendor, VendorType,
};
use crate::utils::error::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

fn redact_all(vendors: Vec<Vendor>) -> Json<Vec<Vendor>> {
    Json(vendors.into_iter().map(Vendor::redacted).collect())
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Vendor>>> {
    Ok(redact_all(state.vendors.list().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Vendor>> {
    Ok(Json(state.vendors.get(&id).await?.redacted()))
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Json(vendor): Json<Vendor>,
) -> Result<(StatusCode, Json<Vendor>)> {
    let vendor = state.vendors.create(vendor).await?;
    Ok((StatusCode::CREATED, Json(vendor.redacted())))
}

#[tracing::instrument(skip_all)]
pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<VendorProfileRequest>,
) -> Result<(StatusCode, Json<Vendor>)> {
    let vendor = state.vendors.create_profile(request).await?;
    Ok((StatusCode::CREATED, Json(vendor.redacted())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(vendor): Json<Vendor>,
) -> Result<Json<Vendor>> {
    Ok(Json(state.vendors.update(&id, vendor).await?.redacted()))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.vendors.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query-string form of the search; `keyword` may hold several comma separated terms.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(rename = "type")]
    pub vendor_type: Option<VendorType>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub available_date: Option<NaiveDate>,
    pub keyword: Option<String>,
}

impl From<SearchQuery> for VendorSearchCriteria {
    fn from(query: SearchQuery) -> Self {
        let keywords = query.keyword.map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });
        VendorSearchCriteria {
            vendor_type: query.vendor_type,
            min_rating: query.min_rating,
            max_rating: query.max_rating,
            min_price: query.min_price,
            max_price: query.max_price,
            availability_date: query.available_date,
            keywords,
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn search_by_query(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Vendor>>> {
    let criteria = VendorSearchCriteria::from(query);
    Ok(redact_all(state.vendors.search(&criteria).await?))
}

pub async fn search(
    State(state): State<AppState>,
    Json(criteria): Json<VendorSearchCriteria>,
) -> Result<Json<Vec<Vendor>>> {
    Ok(redact_all(state.vendors.search(&criteria).await?))
}

pub async fn top_rated(State(state): State<AppState>) -> Result<Json<Vec<Vendor>>> {
    Ok(redact_all(state.vendors.top_rated().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

pub async fn price_range(
    State(state): State<AppState>,
    Query(range): Query<PriceRangeQuery>,
) -> Result<Json<Vec<Vendor>>> {
    let vendors = state.vendors.price_range(range.min_price, range.max_price).await?;
    Ok(redact_all(vendors))
}

// 作品集

pub async fn portfolio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PortfolioItem>>> {
    Ok(Json(state.vendors.portfolio(&id).await?))
}

pub async fn add_portfolio_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(item): Json<PortfolioItem>,
) -> Result<(StatusCode, Json<PortfolioItem>)> {
    let item = state.vendors.add_portfolio_item(&id, item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn remove_portfolio_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state.vendors.remove_portfolio_item(&id, &item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// 方案

pub async fn packages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ServicePackage>>> {
    Ok(Json(state.vendors.packages(&id).await?))
}

pub async fn add_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(package): Json<ServicePackage>,
) -> Result<(StatusCode, Json<ServicePackage>)> {
    let package = state.vendors.add_package(&id, package).await?;
    Ok((StatusCode::CREATED, Json(package)))
}

pub async fn remove_package(
    State(state): State<AppState>,
    Path((id, package_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state.vendors.remove_package(&id, &package_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn location(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Location>> {
    Ok(Json(state.vendors.location(&id).await?))
}

/// Location fields arrive as query parameters (`address`, `city`, `state`,
/// `zipCode`, optional `serviceRadius`).
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(location): Query<Location>,
) -> Result<Json<Location>> {
    Ok(Json(state.vendors.update_location(&id, location).await?))
}

pub async fn social_links(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HashMap<SocialMediaPlatform, String>>> {
    Ok(Json(state.vendors.social_links(&id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SocialLinkQuery {
    pub platform: SocialMediaPlatform,
    pub link: String,
}

pub async fn add_social_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SocialLinkQuery>,
) -> Result<(StatusCode, Json<HashMap<SocialMediaPlatform, String>>)> {
    state.vendors.add_social_link(&id, query.platform, query.link).await?;
    Ok((StatusCode::CREATED, Json(state.vendors.social_links(&id).await?)))
}

pub async fn remove_social_link(
    State(state): State<AppState>,
    Path((id, platform)): Path<(String, SocialMediaPlatform)>,
) -> Result<StatusCode> {
    state.vendors.remove_social_link(&id, platform).await?;
    Ok(StatusCode::NO_CONTENT)
}
