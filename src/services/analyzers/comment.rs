use super::{AnalysisResult, Analyzer};
use crate::{error::AppResult, models::RawVideoRecord};

/// Comment-based quality analyzer.
///
/// Currently neutral: every video scores 1.0 with no flags, so enabling it
/// shifts all totals equally and leaves the ranking order untouched.
#[derive(Debug, Clone, Default)]
pub struct CommentAnalyzer {
    enabled: bool,
}

impl CommentAnalyzer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait::async_trait]
impl Analyzer for CommentAnalyzer {
    async fn analyze(&self, video_id: &str, _video: &RawVideoRecord) -> AppResult<AnalysisResult> {
        if !self.enabled {
            return Ok(AnalysisResult::neutral("Comment analysis disabled"));
        }

        // TODO: fetch top comments via the catalog client and flag promotional or outdated content
        tracing::trace!(video_id = %video_id, "Comment analysis not implemented, returning neutral score");
        Ok(AnalysisResult::neutral("Comment analysis not yet implemented"))
    }

    fn name(&self) -> &'static str {
        "comment_analyzer"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_by_default() {
        let analyzer = CommentAnalyzer::default();
        assert!(!analyzer.is_enabled());
        assert_eq!(analyzer.name(), "comment_analyzer");
    }

    #[tokio::test]
    async fn test_returns_neutral_score() {
        for enabled in [false, true] {
            let analyzer = CommentAnalyzer::new(enabled);
            let result = analyzer
                .analyze("abc", &RawVideoRecord::default())
                .await
                .unwrap();
            assert_eq!(result.score, 1.0);
            assert!(result.flags.is_empty());
            assert!(!result.reason.is_empty());
        }
    }
}
