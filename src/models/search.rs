use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::{Recommendation, ScoreBreakdown};

const MAX_TECHNOLOGY_LEN: usize = 100;
const MAX_MONTHS: u32 = 60;

/// Preferred video length, matched against the configured duration buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationPreference {
    #[default]
    Any,
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

/// Request body for `POST /api/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// Technology name, e.g. "Rust" or "Docker"
    pub technology: String,
    #[serde(default)]
    pub level: Option<SkillLevel>,
    #[serde(default)]
    pub duration_preference: DurationPreference,
    /// Maximum video age in months, `None` for any time
    #[serde(default)]
    pub max_months: Option<u32>,
}

impl SearchRequest {
    pub fn validate(&self) -> AppResult<()> {
        let technology = self.technology.trim();
        if technology.is_empty() {
            return Err(AppError::InvalidInput(
                "technology cannot be empty".to_string(),
            ));
        }
        if technology.chars().count() > MAX_TECHNOLOGY_LEN {
            return Err(AppError::InvalidInput(format!(
                "technology must be at most {} characters",
                MAX_TECHNOLOGY_LEN
            )));
        }
        if let Some(months) = self.max_months {
            if !(1..=MAX_MONTHS).contains(&months) {
                return Err(AppError::InvalidInput(format!(
                    "max_months must be between 1 and {}",
                    MAX_MONTHS
                )));
            }
        }
        Ok(())
    }

    /// Builds the catalog search query, e.g. "Rust tutorial beginner"
    pub fn build_query(&self) -> String {
        let mut parts = vec![self.technology.trim(), "tutorial"];
        if let Some(level) = self.level {
            parts.push(level.as_str());
        }
        parts.join(" ")
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub recommendations: Vec<VideoResponse>,
}

/// Recommendation as presented to API clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoResponse {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    pub duration: String,
    pub duration_seconds: u64,
    pub view_count: u64,
    pub like_count: u64,
    pub published_at: String,
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
}

impl From<Recommendation> for VideoResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            video_id: rec.video_id,
            title: rec.title,
            channel: rec.channel,
            thumbnail: rec.thumbnail,
            duration: rec.duration,
            duration_seconds: rec.duration_seconds,
            view_count: rec.view_count,
            like_count: rec.like_count,
            published_at: rec.published_at,
            score: rec.score,
            score_breakdown: rec.score_breakdown.rounded(),
        }
    }
}
