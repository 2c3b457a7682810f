use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Process configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// YouTube Data API key. Searches fail with a configuration error without it.
    #[serde(default)]
    pub youtube_api_key: Option<String>,

    /// YouTube Data API base URL
    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    /// Path to the YAML scoring configuration
    #[serde(default = "default_scoring_config_path")]
    pub scoring_config_path: String,

    /// Per-call budget for quality analyzers, in milliseconds
    #[serde(default = "default_analyzer_timeout_ms")]
    pub analyzer_timeout_ms: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_scoring_config_path() -> String {
    "config.yaml".to_string()
}

fn default_analyzer_timeout_ms() -> u64 {
    2000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

/// Static ranking configuration, read once at start-up and never mutated.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScoringConfig {
    pub scoring: ScoringWeights,
    pub filters: FilterDefaults,
    pub duration_ranges: DurationRanges,
    #[serde(default)]
    pub comment_analysis: CommentAnalysisConfig,
}

/// Independent multipliers for each score component. They need not sum to 1.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScoringWeights {
    pub relevance_weight: f64,
    pub like_ratio_weight: f64,
    pub view_count_weight: f64,
    pub recency_weight: f64,
    pub duration_match_weight: f64,
    /// Only applied when at least one analyzer is enabled
    #[serde(default = "default_comment_quality_weight")]
    pub comment_quality_weight: f64,
}

fn default_comment_quality_weight() -> f64 {
    0.1
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FilterDefaults {
    /// How many search results are requested, and the denominator of relevance
    pub default_max_results: u32,
    /// Default top-N returned by the ranker
    pub final_recommendations: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DurationRanges {
    pub short: DurationBucket,
    pub medium: DurationBucket,
    pub long: DurationBucket,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct DurationBucket {
    pub min_minutes: f64,
    pub max_minutes: f64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CommentAnalysisConfig {
    #[serde(default)]
    pub enabled: bool,
}

impl ScoringConfig {
    /// Load and validate the scoring configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring config {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid scoring config {}", path.display()))
    }

    /// Parse and validate a YAML scoring configuration
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: ScoringConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let weights = [
            ("relevance_weight", self.scoring.relevance_weight),
            ("like_ratio_weight", self.scoring.like_ratio_weight),
            ("view_count_weight", self.scoring.view_count_weight),
            ("recency_weight", self.scoring.recency_weight),
            ("duration_match_weight", self.scoring.duration_match_weight),
            ("comment_quality_weight", self.scoring.comment_quality_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("scoring.{} must be a non-negative number, got {}", name, value);
            }
        }

        if self.filters.default_max_results == 0 {
            anyhow::bail!("filters.default_max_results must be greater than zero");
        }
        if self.filters.final_recommendations == 0 {
            anyhow::bail!("filters.final_recommendations must be greater than zero");
        }

        let buckets = [
            ("short", self.duration_ranges.short),
            ("medium", self.duration_ranges.medium),
            ("long", self.duration_ranges.long),
        ];
        for (name, bucket) in buckets {
            if bucket.min_minutes < 0.0 || bucket.min_minutes > bucket.max_minutes {
                anyhow::bail!(
                    "duration_ranges.{} has invalid bounds {}..{}",
                    name,
                    bucket.min_minutes,
                    bucket.max_minutes
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE_CONFIG: &str = r#"
scoring:
  relevance_weight: 0.3
  like_ratio_weight: 0.25
  view_count_weight: 0.2
  recency_weight: 0.15
  duration_match_weight: 0.1
filters:
  default_max_results: 15
  final_recommendations: 3
duration_ranges:
  short:
    min_minutes: 0
    max_minutes: 10
  medium:
    min_minutes: 10
    max_minutes: 30
  long:
    min_minutes: 30
    max_minutes: 999
comment_analysis:
  enabled: false
"#;

    pub(crate) fn sample_config() -> ScoringConfig {
        ScoringConfig::from_yaml_str(SAMPLE_CONFIG).unwrap()
    }

    #[test]
    fn test_parse_sample_config() {
        let config = sample_config();
        assert_eq!(config.scoring.relevance_weight, 0.3);
        assert_eq!(config.filters.default_max_results, 15);
        assert_eq!(config.filters.final_recommendations, 3);
        assert_eq!(config.duration_ranges.medium.max_minutes, 30.0);
        assert!(!config.comment_analysis.enabled);
        assert_eq!(config.scoring.comment_quality_weight, 0.1);
    }

    #[test]
    fn test_from_file_reads_shipped_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.yaml");
        let config = ScoringConfig::from_file(path).unwrap();
        assert_eq!(config.filters.final_recommendations, 3);
    }

    #[test]
    fn test_from_file_missing_is_fatal() {
        let err = ScoringConfig::from_file("does/not/exist/config.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read scoring config"));
    }

    #[test]
    fn test_comment_analysis_section_is_optional() {
        let trimmed = SAMPLE_CONFIG.replace("comment_analysis:\n  enabled: false\n", "");
        let config = ScoringConfig::from_yaml_str(&trimmed).unwrap();
        assert!(!config.comment_analysis.enabled);
    }

    #[test]
    fn test_missing_weight_is_fatal() {
        let broken = SAMPLE_CONFIG.replace("  recency_weight: 0.15\n", "");
        let err = ScoringConfig::from_yaml_str(&broken).unwrap_err();
        assert!(err.to_string().contains("recency_weight"));
    }

    #[test]
    fn test_missing_threshold_is_fatal() {
        let broken = SAMPLE_CONFIG.replace("    max_minutes: 30\n", "");
        assert!(ScoringConfig::from_yaml_str(&broken).is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let broken = SAMPLE_CONFIG.replace("relevance_weight: 0.3", "relevance_weight: -0.3");
        let err = ScoringConfig::from_yaml_str(&broken).unwrap_err();
        assert!(err.to_string().contains("relevance_weight"));
    }

    #[test]
    fn test_inverted_bucket_rejected() {
        let broken = SAMPLE_CONFIG
            .replace("max_minutes: 10", "max_minutes: 5")
            .replace("min_minutes: 0", "min_minutes: 8");
        assert!(ScoringConfig::from_yaml_str(&broken).is_err());
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let broken = SAMPLE_CONFIG.replace("final_recommendations: 3", "final_recommendations: 0");
        assert!(ScoringConfig::from_yaml_str(&broken).is_err());
    }
}
