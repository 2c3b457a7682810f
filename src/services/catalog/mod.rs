//! Video catalog abstraction
//!
//! The catalog supplies the raw records the ranker scores: a relevance-ordered
//! search followed by a detail fetch carrying statistics and durations.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::AppResult,
    models::{RawVideoRecord, SearchHit, UNRANKED_SEARCH_RANK},
};

pub mod youtube;

pub use youtube::YouTubeClient;

/// Trait for video catalog clients
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Relevance-ordered search restricted to embeddable videos
    async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
        published_after: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<SearchHit>>;

    /// Snippet, statistics, and content details for the given video IDs
    async fn get_video_details(&self, video_ids: &[String]) -> AppResult<Vec<RawVideoRecord>>;

    /// Client name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Searches the catalog and returns detailed records tagged with their
/// position in the search results.
///
/// Records the detail fetch returns for IDs that were not in the search get
/// the unranked sentinel.
pub async fn search_and_get_details(
    client: &dyn CatalogClient,
    query: &str,
    max_results: u32,
    published_after: Option<DateTime<Utc>>,
) -> AppResult<Vec<RawVideoRecord>> {
    let hits = client
        .search_videos(query, max_results, published_after)
        .await?;

    let video_ids: Vec<String> = hits
        .iter()
        .filter_map(|hit| hit.video_id().map(str::to_string))
        .collect();

    if video_ids.is_empty() {
        tracing::info!(query = %query, provider = client.name(), "Search returned no videos");
        return Ok(Vec::new());
    }

    let mut rank_map: HashMap<&str, u32> = HashMap::with_capacity(video_ids.len());
    for (idx, id) in video_ids.iter().enumerate() {
        rank_map.entry(id.as_str()).or_insert(idx as u32);
    }

    let mut details = client.get_video_details(&video_ids).await?;
    for video in &mut details {
        let rank = rank_map
            .get(video.id.as_str())
            .copied()
            .unwrap_or(UNRANKED_SEARCH_RANK);
        video.search_rank = Some(rank);
    }

    tracing::info!(
        query = %query,
        searched = video_ids.len(),
        detailed = details.len(),
        provider = client.name(),
        "Catalog search completed"
    );

    Ok(details)
}

/// Cut-off for a maximum video age in months (30-day months)
pub fn published_after_from_months(max_months: Option<u32>) -> Option<DateTime<Utc>> {
    max_months.map(|months| Utc::now() - Duration::days(i64::from(months) * 30))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchHitId;

    fn hit(id: &str) -> SearchHit {
        SearchHit {
            id: SearchHitId {
                video_id: Some(id.to_string()),
            },
        }
    }

    fn detail(id: &str) -> RawVideoRecord {
        RawVideoRecord {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_and_get_details_assigns_ranks() {
        let mut client = MockCatalogClient::new();
        client
            .expect_search_videos()
            .withf(|query, max_results, published_after| {
                query == "Rust tutorial" && *max_results == 15 && published_after.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![hit("a"), hit("b"), hit("c")]));
        client
            .expect_get_video_details()
            .withf(|ids: &[String]| ids == ["a", "b", "c"])
            .times(1)
            // Details come back in a different order, plus one stray record
            .returning(|_| Ok(vec![detail("c"), detail("a"), detail("zzz"), detail("b")]));
        client.expect_name().return_const("mock");

        let records = search_and_get_details(&client, "Rust tutorial", 15, None)
            .await
            .unwrap();

        let ranks: Vec<(String, Option<u32>)> = records
            .into_iter()
            .map(|r| (r.id, r.search_rank))
            .collect();
        assert_eq!(
            ranks,
            vec![
                ("c".to_string(), Some(2)),
                ("a".to_string(), Some(0)),
                ("zzz".to_string(), Some(UNRANKED_SEARCH_RANK)),
                ("b".to_string(), Some(1)),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_search_skips_detail_fetch() {
        let mut client = MockCatalogClient::new();
        client
            .expect_search_videos()
            .returning(|_, _, _| Ok(vec![]));
        client.expect_get_video_details().never();
        client.expect_name().return_const("mock");

        let records = search_and_get_details(&client, "nothing", 15, None)
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_search_error_propagates() {
        let mut client = MockCatalogClient::new();
        client.expect_search_videos().returning(|_, _, _| {
            Err(crate::error::AppError::ExternalApi("quota exceeded".to_string()))
        });
        client.expect_name().return_const("mock");

        let result = search_and_get_details(&client, "Rust tutorial", 15, None).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_published_after_from_months() {
        assert_eq!(published_after_from_months(None), None);

        let cutoff = published_after_from_months(Some(2)).unwrap();
        let age = Utc::now() - cutoff;
        assert!(age >= Duration::days(60) && age < Duration::days(61));
    }
}
