use crate::adapters::export::ExportFormat;
use crate::app::state::AppState;
use crate::core::RankingOrder;
use crate::domain::model::Vendor;
use crate::domain::ranking::PriceOrder;
use crate::utils::error::Result;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

fn redact_all(vendors: Vec<Vendor>) -> Json<Vec<Vendor>> {
    Json(vendors.into_iter().map(Vendor::redacted).collect())
}

pub async fn all(State(state): State<AppState>) -> Result<Json<Vec<Vendor>>> {
    Ok(redact_all(state.vendor_list.all().await?))
}

pub async fn sorted(State(state): State<AppState>) -> Result<Json<Vec<Vendor>>> {
    Ok(redact_all(state.vendor_list.sorted_by_rating().await?))
}

#[derive(Debug, Deserialize)]
pub struct PriceOrderQuery {
    #[serde(default)]
    pub order: PriceOrder,
}

pub async fn by_price(
    State(state): State<AppState>,
    Query(query): Query<PriceOrderQuery>,
) -> Result<Json<Vec<Vendor>>> {
    Ok(redact_all(state.vendor_list.sorted_by_price(query.order).await?))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub order: RankingOrder,
}

#[tracing::instrument(skip_all, fields(format = ?query.format, order = ?query.order))]
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let body = state.vendor_list.export(query.order, query.format).await?;
    let disposition = format!(
        "attachment; filename=\"vendor-ranking.{}\"",
        query.format.extension()
    );
    Ok((
        [
            (header::CONTENT_TYPE, query.format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
