pub mod aggregator;
pub mod analyzers;
pub mod catalog;
pub mod duration;
pub mod ranker;
pub mod scoring;
pub mod search;

pub use aggregator::{BatchContext, ScoreAggregator};
pub use analyzers::{AnalysisResult, Analyzer, AnalyzerSet, CommentAnalyzer};
pub use catalog::{CatalogClient, YouTubeClient};
pub use duration::{format_duration, parse_duration};
pub use ranker::Ranker;
