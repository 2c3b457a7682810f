use crate::{
    config::ScoringConfig,
    models::{DurationPreference, RawVideoRecord, ScoreBreakdown},
    services::{duration::parse_duration, scoring},
};

/// Batch-wide values shared read-only by every per-record computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchContext {
    /// Number of search results requested; the relevance denominator
    pub total_searched: u32,
    /// Largest view count in the batch, `None` for an empty batch
    pub max_view_count: Option<u64>,
}

impl BatchContext {
    /// Computes the batch maximum once for a whole ranking call
    pub fn from_records(records: &[RawVideoRecord], total_searched: u32) -> Self {
        Self {
            total_searched,
            max_view_count: records.iter().map(RawVideoRecord::view_count).max(),
        }
    }
}

/// Combines the component scores of a record into a weighted total
pub struct ScoreAggregator<'a> {
    config: &'a ScoringConfig,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Returns the total score and the weighted breakdown it was summed from.
    ///
    /// `comment_quality` is the analyzer score for this record, if analysis ran.
    pub fn aggregate(
        &self,
        record: &RawVideoRecord,
        search_rank: u32,
        batch: &BatchContext,
        preference: DurationPreference,
        comment_quality: Option<f64>,
    ) -> (f64, ScoreBreakdown) {
        let weights = &self.config.scoring;
        let duration_seconds = parse_duration(record.duration_token());

        let relevance = scoring::relevance_score(search_rank, batch.total_searched);
        let like_ratio = scoring::like_ratio_score(record.view_count(), record.like_count());
        let views = scoring::view_score(record.view_count(), batch.max_view_count);
        let recency = scoring::recency_score(record.published_at());
        let duration_match = scoring::duration_match_score(
            duration_seconds,
            preference,
            &self.config.duration_ranges,
        );

        let breakdown = ScoreBreakdown {
            relevance: relevance * weights.relevance_weight,
            like_ratio: like_ratio * weights.like_ratio_weight,
            views: views * weights.view_count_weight,
            recency: recency * weights.recency_weight,
            duration_match: duration_match * weights.duration_match_weight,
            comment_quality: comment_quality
                .map(|score| score * weights.comment_quality_weight)
                .unwrap_or(0.0),
        };

        (breakdown.total(), breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_config;
    use crate::models::{ContentDetails, Snippet, Statistics};
    use chrono::Utc;

    const EPS: f64 = 1e-9;

    fn record(views: u64, likes: u64, duration: &str) -> RawVideoRecord {
        RawVideoRecord {
            id: "vid".to_string(),
            snippet: Snippet {
                published_at: Utc::now().to_rfc3339(),
                ..Default::default()
            },
            statistics: Statistics {
                view_count: views,
                like_count: likes,
            },
            content_details: ContentDetails {
                duration: Some(duration.to_string()),
            },
            search_rank: Some(0),
        }
    }

    #[test]
    fn test_batch_context_max() {
        let batch = vec![record(100, 1, "PT1M"), record(9999, 1, "PT1M"), record(5, 1, "PT1M")];
        let ctx = BatchContext::from_records(&batch, 15);
        assert_eq!(ctx.max_view_count, Some(9999));
        assert_eq!(BatchContext::from_records(&[], 15).max_view_count, None);
    }

    #[test]
    fn test_perfect_record_scores_sum_of_weights() {
        let config = sample_config();
        let aggregator = ScoreAggregator::new(&config);
        let video = record(1000, 100, "PT5M");
        let ctx = BatchContext::from_records(std::slice::from_ref(&video), 15);

        let (total, breakdown) =
            aggregator.aggregate(&video, 0, &ctx, DurationPreference::Any, None);

        assert!((breakdown.relevance - 0.3).abs() < EPS);
        assert!((breakdown.like_ratio - 0.25).abs() < EPS);
        assert!((breakdown.views - 0.2).abs() < EPS);
        assert!((breakdown.recency - 0.15).abs() < EPS);
        assert!((breakdown.duration_match - 0.1).abs() < EPS);
        assert_eq!(breakdown.comment_quality, 0.0);
        assert!((total - 1.0).abs() < EPS);
    }

    #[test]
    fn test_breakdown_holds_weighted_values() {
        let config = sample_config();
        let aggregator = ScoreAggregator::new(&config);
        let video = record(1000, 100, "PT25M");
        let ctx = BatchContext::from_records(std::slice::from_ref(&video), 15);

        let (_, breakdown) = aggregator.aggregate(&video, 0, &ctx, DurationPreference::Short, None);

        // 25 minutes exceeds twice the short maximum: raw 0.2, weighted 0.02
        assert!((breakdown.duration_match - 0.02).abs() < EPS);
    }

    #[test]
    fn test_unranked_record_has_no_relevance() {
        let config = sample_config();
        let aggregator = ScoreAggregator::new(&config);
        let video = record(10, 1, "PT1M");
        let ctx = BatchContext::from_records(std::slice::from_ref(&video), 15);

        let (_, breakdown) = aggregator.aggregate(
            &video,
            crate::models::UNRANKED_SEARCH_RANK,
            &ctx,
            DurationPreference::Any,
            None,
        );
        assert_eq!(breakdown.relevance, 0.0);
    }

    #[test]
    fn test_malformed_record_degrades_without_failing() {
        let config = sample_config();
        let aggregator = ScoreAggregator::new(&config);
        let video = RawVideoRecord::default();
        let ctx = BatchContext::from_records(std::slice::from_ref(&video), 15);

        let (total, breakdown) =
            aggregator.aggregate(&video, 3, &ctx, DurationPreference::Any, None);

        assert_eq!(breakdown.like_ratio, 0.0);
        assert_eq!(breakdown.views, 0.0);
        // Unparseable timestamp scores the neutral 0.5
        assert!((breakdown.recency - 0.075).abs() < EPS);
        assert!(total > 0.0);
    }

    #[test]
    fn test_comment_quality_is_weighted_and_added() {
        let config = sample_config();
        let aggregator = ScoreAggregator::new(&config);
        let video = record(1000, 100, "PT5M");
        let ctx = BatchContext::from_records(std::slice::from_ref(&video), 15);

        let (without, _) = aggregator.aggregate(&video, 0, &ctx, DurationPreference::Any, None);
        let (with, breakdown) =
            aggregator.aggregate(&video, 0, &ctx, DurationPreference::Any, Some(1.0));

        assert!((breakdown.comment_quality - 0.1).abs() < EPS);
        assert!((with - without - 0.1).abs() < EPS);
    }
}
