use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tutorial_recommender::{
    config::{Config, ScoringConfig},
    routes::{create_router, AppState},
    services::{AnalyzerSet, CatalogClient, Ranker, YouTubeClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tutorial_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Ranking cannot run without a complete scoring config, so fail before serving
    let scoring = Arc::new(ScoringConfig::from_file(&config.scoring_config_path)?);
    tracing::info!(
        path = %config.scoring_config_path,
        max_results = scoring.filters.default_max_results,
        final_recommendations = scoring.filters.final_recommendations,
        comment_analysis = scoring.comment_analysis.enabled,
        "Loaded scoring configuration"
    );

    let analyzers = AnalyzerSet::from_config(
        &scoring,
        Duration::from_millis(config.analyzer_timeout_ms),
    );
    let ranker = Ranker::new(scoring, analyzers);

    let catalog: Option<Arc<dyn CatalogClient>> = match config.youtube_api_key.clone() {
        Some(api_key) if !api_key.trim().is_empty() => Some(Arc::new(YouTubeClient::new(
            api_key,
            config.youtube_api_url.clone(),
        ))),
        _ => {
            tracing::warn!("YOUTUBE_API_KEY not set, search requests will fail");
            None
        }
    };

    let state = Arc::new(AppState { catalog, ranker });
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
