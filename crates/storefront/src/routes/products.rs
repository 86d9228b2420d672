//! Product route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;
use tracing::instrument;

use electron_core::{CountResponse, ProductQuery};

use super::resources::render;
use crate::db::ProductRepository;
use crate::error::Result;
use crate::state::AppState;

/// List products.
///
/// Query parameters: `arrival`, `bestSeller`, `brand`, `productType`,
/// `name` (case-insensitive substring), `page` (1-indexed) and `size`
/// (default 10).
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Value>>> {
    let products = ProductRepository::new(state.store()).search(&query).await?;
    Ok(Json(render(products)))
}

/// Count all products. Query parameters are ignored.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let count = ProductRepository::new(state.store()).count().await?;
    Ok(Json(CountResponse { count }))
}
