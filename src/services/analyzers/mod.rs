//! Pluggable post-hoc quality analyzers
//!
//! An analyzer inspects one video (for example its comments) and reports a
//! quality score in `[0, 1]`. Enabled analyzers run concurrently for every
//! video in a batch before the synchronous ranking pass, and their averaged
//! score feeds the `comment_quality` slot of the breakdown.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;

use crate::{config::ScoringConfig, error::AppResult, models::RawVideoRecord};

pub mod comment;

pub use comment::CommentAnalyzer;

/// Score assumed when an analyzer is unavailable, slow, or failing
pub const NEUTRAL_SCORE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// 0.0 to 1.0, higher is better
    pub score: f64,
    /// Detected issue tags
    pub flags: BTreeSet<String>,
    pub reason: String,
}

impl AnalysisResult {
    pub fn neutral(reason: impl Into<String>) -> Self {
        Self {
            score: NEUTRAL_SCORE,
            flags: BTreeSet::new(),
            reason: reason.into(),
        }
    }
}

/// Trait for video quality analyzers
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, video_id: &str, video: &RawVideoRecord) -> AppResult<AnalysisResult>;

    /// Analyzer name for logging and debugging
    fn name(&self) -> &'static str;

    fn is_enabled(&self) -> bool {
        true
    }
}

/// The analyzers configured for a process, with a per-call time budget
#[derive(Clone)]
pub struct AnalyzerSet {
    analyzers: Vec<Arc<dyn Analyzer>>,
    timeout: Duration,
}

impl AnalyzerSet {
    pub fn new(timeout: Duration) -> Self {
        Self {
            analyzers: Vec::new(),
            timeout,
        }
    }

    /// Builds the analyzers switched on in the scoring configuration
    pub fn from_config(config: &ScoringConfig, timeout: Duration) -> Self {
        let mut set = Self::new(timeout);
        if config.comment_analysis.enabled {
            set = set.with_analyzer(Arc::new(CommentAnalyzer::new(true)));
        }
        set
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzers.push(analyzer);
        self
    }

    /// True when at least one analyzer would run
    pub fn is_active(&self) -> bool {
        self.analyzers.iter().any(|a| a.is_enabled())
    }

    /// Quality score for each record, aligned with `records`.
    ///
    /// Returns `None` when no analyzer is enabled.
    pub async fn analyze_batch(&self, records: &[RawVideoRecord]) -> Option<Vec<f64>> {
        if !self.is_active() {
            return None;
        }

        let scores = join_all(records.iter().map(|record| self.analyze_one(record))).await;

        tracing::debug!(
            videos = records.len(),
            analyzers = self.analyzers.len(),
            "Quality analysis completed"
        );

        Some(scores)
    }

    /// Average score across enabled analyzers, neutral on failure or timeout
    async fn analyze_one(&self, record: &RawVideoRecord) -> f64 {
        let enabled: Vec<&Arc<dyn Analyzer>> =
            self.analyzers.iter().filter(|a| a.is_enabled()).collect();

        let results = join_all(enabled.iter().map(|analyzer| async move {
            match tokio::time::timeout(self.timeout, analyzer.analyze(&record.id, record)).await {
                Ok(Ok(result)) => result.score.clamp(0.0, 1.0),
                Ok(Err(e)) => {
                    tracing::warn!(
                        analyzer = analyzer.name(),
                        video_id = %record.id,
                        error = %e,
                        "Analyzer failed, using neutral score"
                    );
                    NEUTRAL_SCORE
                }
                Err(_) => {
                    tracing::warn!(
                        analyzer = analyzer.name(),
                        video_id = %record.id,
                        timeout_ms = self.timeout.as_millis() as u64,
                        "Analyzer timed out, using neutral score"
                    );
                    NEUTRAL_SCORE
                }
            }
        }))
        .await;

        if results.is_empty() {
            return NEUTRAL_SCORE;
        }
        results.iter().sum::<f64>() / results.len() as f64
    }
}
