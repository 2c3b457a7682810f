use std::time::Instant;

use crate::{
    error::AppResult,
    models::{SearchRequest, SearchResponse, VideoResponse},
    services::{
        catalog::{self, CatalogClient},
        ranker::Ranker,
    },
};

/// Finds the best tutorials for a structured search request
///
/// Builds the catalog query from the request, fetches candidate videos with
/// their statistics, and ranks them by the configured multi-factor score.
pub async fn search_tutorials(
    catalog_client: &dyn CatalogClient,
    ranker: &Ranker,
    request: SearchRequest,
) -> AppResult<SearchResponse> {
    let start = Instant::now();
    request.validate()?;

    let query = request.build_query();
    let published_after = catalog::published_after_from_months(request.max_months);
    let max_results = ranker.config().filters.default_max_results;

    tracing::info!(
        query = %query,
        max_results = max_results,
        max_months = ?request.max_months,
        duration_preference = ?request.duration_preference,
        "Starting tutorial search"
    );

    let videos =
        catalog::search_and_get_details(catalog_client, &query, max_results, published_after)
            .await?;

    if videos.is_empty() {
        tracing::info!(query = %query, "No candidate videos found");
        return Ok(SearchResponse {
            query,
            recommendations: Vec::new(),
        });
    }

    let recommendations: Vec<VideoResponse> = ranker
        .rank_with_analysis(&videos, request.duration_preference, None)
        .await
        .into_iter()
        .map(VideoResponse::from)
        .collect();

    tracing::info!(
        query = %query,
        candidates = videos.len(),
        recommended = recommendations.len(),
        processing_time_ms = start.elapsed().as_millis() as u64,
        "Tutorial search completed"
    );

    Ok(SearchResponse {
        query,
        recommendations,
    })
}
