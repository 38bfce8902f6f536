use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    middleware::validation::sanitize_for_logging,
    state::AppState,
    types::{ItemsResponse, SearchQuery},
};

/// `GET /search?keyword=` — a missing keyword matches every item.
pub async fn search_items(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ItemsResponse>> {
    tracing::info!("Search by: {}", sanitize_for_logging(&query.keyword));
    state.metrics.inc_searches();

    let items = state.items.search_by_name(&query.keyword).await?;
    Ok(Json(ItemsResponse { items }))
}
