use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{SearchRequest, SearchResponse},
    routes::AppState,
    services::search::search_tutorials,
};

/// Handler for the tutorial search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    let catalog = state.catalog.as_deref().ok_or_else(|| {
        AppError::Configuration("YouTube API key not configured".to_string())
    })?;

    tracing::info!(
        request_id = %request_id,
        technology = %request.technology,
        "Processing search request"
    );

    let response = search_tutorials(catalog, &state.ranker, request).await?;

    tracing::info!(
        request_id = %request_id,
        recommendations = response.recommendations.len(),
        "Search completed"
    );

    Ok(Json(response))
}
