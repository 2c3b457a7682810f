use serde::{Deserialize, Serialize};

/// Weighted contribution of each signal to a recommendation's total score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub relevance: f64,
    pub like_ratio: f64,
    pub views: f64,
    pub recency: f64,
    pub duration_match: f64,
    /// Zero unless a quality analyzer is enabled
    pub comment_quality: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.relevance
            + self.like_ratio
            + self.views
            + self.recency
            + self.duration_match
            + self.comment_quality
    }

    /// Copy with every field rounded to four decimals, for presentation
    pub fn rounded(&self) -> Self {
        Self {
            relevance: round4(self.relevance),
            like_ratio: round4(self.like_ratio),
            views: round4(self.views),
            recency: round4(self.recency),
            duration_match: round4(self.duration_match),
            comment_quality: round4(self.comment_quality),
        }
    }
}

/// A ranked video with the display fields of its source record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    /// Human-readable duration, e.g. `1:05:09`
    pub duration: String,
    pub duration_seconds: u64,
    pub view_count: u64,
    pub like_count: u64,
    pub published_at: String,
    /// Total score rounded to four decimals
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
}

/// Round half away from zero to four decimal places
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
