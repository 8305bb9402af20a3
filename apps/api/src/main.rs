mod binders;
mod cache;
mod cards;
mod config;
mod db;
mod errors;
mod layout;
mod models;
mod nav;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::RedisCardCache;
use crate::cards::CardSourceClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_directive())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bindr API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (binder documents)
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis-backed card cache
    let redis = redis::Client::open(config.redis_url.clone())?;
    let card_cache = Arc::new(RedisCardCache::new(redis, config.card_cache_ttl_secs));
    info!("Card cache initialized (ttl: {}s)", config.card_cache_ttl_secs);

    // Initialize card API client
    let cards = CardSourceClient::new(config.card_api_url.clone(), config.card_api_key.clone())?;
    info!("Card source client initialized ({})", config.card_api_url);

    // Build app state
    let state = AppState {
        db,
        card_cache,
        cards,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
