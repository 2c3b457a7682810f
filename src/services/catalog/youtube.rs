//! YouTube Data API v3 catalog client
//!
//! API Flow:
//! 1. Search: /search → relevance-ordered video IDs
//! 2. Details: /videos → snippet, statistics, and content details per ID

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{RawVideoRecord, SearchHit},
    services::catalog::CatalogClient,
};

const DETAIL_PARTS: &str = "snippet,statistics,contentDetails";

#[derive(Debug, Deserialize)]
struct ApiListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Clone)]
pub struct YouTubeClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_items<T>(&self, endpoint: &str, params: &[(&str, String)]) -> AppResult<Vec<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.api_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "YouTube API returned status {}: {}",
                status, body
            )));
        }

        let list: ApiListResponse<T> = response.json().await?;
        Ok(list.items)
    }
}

#[async_trait::async_trait]
impl CatalogClient for YouTubeClient {
    async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
        published_after: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let mut params = vec![
            ("q", query.to_string()),
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("maxResults", max_results.to_string()),
            ("order", "relevance".to_string()),
            ("videoEmbeddable", "true".to_string()),
        ];
        if let Some(after) = published_after {
            params.push((
                "publishedAfter",
                after.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }

        let hits: Vec<SearchHit> = self.get_items("search", &params).await?;

        tracing::debug!(
            query = %query,
            results = hits.len(),
            provider = "youtube",
            "Video search completed"
        );

        Ok(hits)
    }

    async fn get_video_details(&self, video_ids: &[String]) -> AppResult<Vec<RawVideoRecord>> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let params = [
            ("part", DETAIL_PARTS.to_string()),
            ("id", video_ids.join(",")),
        ];
        let videos: Vec<RawVideoRecord> = self.get_items("videos", &params).await?;

        tracing::debug!(
            requested = video_ids.len(),
            returned = videos.len(),
            provider = "youtube",
            "Video details fetched"
        );

        Ok(videos)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
