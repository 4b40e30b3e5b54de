use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use league_stats::{
    config::Settings,
    graphql::build_schema,
    server,
    service::{
        cache::ResponseCache, data_manager::DataManager, gameapi::riot_api_client::RiotApiClient,
        lookup::LookupService, rate_limiter::RateLimiter,
    },
};

const DEFAULT_LOG_FILTER: &str = "league_stats=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let settings = Settings::parse();

    let riot_api_client = RiotApiClient::new(settings.request_timeout()).context("creating Riot API client")?;
    let lookup = LookupService::bundled().context("loading champion table")?;
    info!(champions = lookup.len(), "champion table loaded");

    let cache = ResponseCache::new();
    let sweeper = cache.spawn_sweeper(settings.cache_sweep_interval());

    let manager = DataManager::new(Arc::new(riot_api_client), Arc::new(lookup), cache, RateLimiter::default());
    let schema = build_schema(Arc::new(manager), settings.credential(), settings.poll_settings());

    let listener = TcpListener::bind(settings.bind)
        .await
        .with_context(|| format!("binding {}", settings.bind))?;
    info!(addr = %settings.bind, "League Stats server running");

    axum::serve(listener, server::router(schema))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    sweeper.abort();
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
