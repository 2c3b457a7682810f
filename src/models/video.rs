use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Search rank assigned to records that did not appear in the originating search
pub const UNRANKED_SEARCH_RANK: u32 = 999;

/// Duration token used when a record carries no content details
const EMPTY_DURATION: &str = "PT0S";

/// One catalog item as returned by the YouTube `videos` endpoint, plus the
/// injected `search_rank`.
///
/// Every field is optional on the wire. Missing or malformed values fall back
/// to zero or an empty string so a single bad record never fails a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawVideoRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub snippet: Snippet,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub content_details: ContentDetails,
    #[serde(default, rename = "search_rank", skip_serializing_if = "Option::is_none")]
    pub search_rank: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Thumbnails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

/// The API reports counts as decimal strings; plain numbers are accepted too.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default, deserialize_with = "lenient_count")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub like_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentDetails {
    #[serde(default)]
    pub duration: Option<String>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(count)
}

impl RawVideoRecord {
    pub fn view_count(&self) -> u64 {
        self.statistics.view_count
    }

    pub fn like_count(&self) -> u64 {
        self.statistics.like_count
    }

    pub fn duration_token(&self) -> &str {
        self.content_details.duration.as_deref().unwrap_or(EMPTY_DURATION)
    }

    pub fn published_at(&self) -> &str {
        &self.snippet.published_at
    }

    pub fn thumbnail_url(&self) -> &str {
        self.snippet
            .thumbnails
            .high
            .as_ref()
            .map(|t| t.url.as_str())
            .unwrap_or("")
    }

    /// Zero-based position in the search results, or the unranked sentinel
    pub fn search_rank(&self) -> u32 {
        self.search_rank.unwrap_or(UNRANKED_SEARCH_RANK)
    }
}

/// One entry of the YouTube `search` endpoint response
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: SearchHitId,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitId {
    #[serde(default)]
    pub video_id: Option<String>,
}

impl SearchHit {
    pub fn video_id(&self) -> Option<&str> {
        self.id.video_id.as_deref()
    }
}
