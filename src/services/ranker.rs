use std::sync::Arc;

use crate::{
    config::ScoringConfig,
    models::{round4, DurationPreference, RawVideoRecord, Recommendation, ScoreBreakdown},
    services::{
        aggregator::{BatchContext, ScoreAggregator},
        analyzers::AnalyzerSet,
        duration::{format_duration, parse_duration},
    },
};

/// Scores a batch of catalog records and returns the best ones
///
/// Ranking is a pure function of the batch and the static configuration.
/// Records with equal scores keep their input order.
#[derive(Clone)]
pub struct Ranker {
    config: Arc<ScoringConfig>,
    analyzers: AnalyzerSet,
}

impl Ranker {
    pub fn new(config: Arc<ScoringConfig>, analyzers: AnalyzerSet) -> Self {
        Self { config, analyzers }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Ranks `records` without quality analysis.
    ///
    /// Configured analyzers are not consulted here, so `comment_quality` is
    /// always 0.0 even when comment analysis is enabled. Use
    /// [`Ranker::rank_with_analysis`] to include it.
    ///
    /// `top_n` defaults to `filters.final_recommendations`.
    pub fn rank(
        &self,
        records: &[RawVideoRecord],
        preference: DurationPreference,
        top_n: Option<usize>,
    ) -> Vec<Recommendation> {
        self.rank_scored(records, preference, top_n, None)
    }

    /// Runs the enabled analyzers over the batch, then ranks with their scores
    /// folded into `comment_quality`.
    pub async fn rank_with_analysis(
        &self,
        records: &[RawVideoRecord],
        preference: DurationPreference,
        top_n: Option<usize>,
    ) -> Vec<Recommendation> {
        let quality = self.analyzers.analyze_batch(records).await;
        self.rank_scored(records, preference, top_n, quality.as_deref())
    }

    fn rank_scored(
        &self,
        records: &[RawVideoRecord],
        preference: DurationPreference,
        top_n: Option<usize>,
        quality: Option<&[f64]>,
    ) -> Vec<Recommendation> {
        let top_n = top_n.unwrap_or(self.config.filters.final_recommendations);
        let batch = BatchContext::from_records(records, self.config.filters.default_max_results);
        let aggregator = ScoreAggregator::new(&self.config);

        let mut recommendations: Vec<Recommendation> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let comment_quality = quality.and_then(|scores| scores.get(idx).copied());
                let (score, breakdown) = aggregator.aggregate(
                    record,
                    record.search_rank(),
                    &batch,
                    preference,
                    comment_quality,
                );
                build_recommendation(record, score, breakdown)
            })
            .collect();

        // Stable: equal scores keep batch order
        recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
        recommendations.truncate(top_n);

        tracing::debug!(
            batch_size = records.len(),
            returned = recommendations.len(),
            preference = ?preference,
            "Ranked video batch"
        );

        recommendations
    }
}

fn build_recommendation(
    record: &RawVideoRecord,
    score: f64,
    score_breakdown: ScoreBreakdown,
) -> Recommendation {
    let duration_seconds = parse_duration(record.duration_token());

    Recommendation {
        video_id: record.id.clone(),
        title: record.snippet.title.clone(),
        channel: record.snippet.channel_title.clone(),
        thumbnail: record.thumbnail_url().to_string(),
        duration: format_duration(duration_seconds),
        duration_seconds,
        view_count: record.view_count(),
        like_count: record.like_count(),
        published_at: record.published_at().to_string(),
        score: round4(score),
        score_breakdown,
    }
}
