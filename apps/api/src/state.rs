use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::CardCache;
use crate::cards::CardSourceClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Injected card cache (Redis in production, in-memory in tests).
    pub card_cache: Arc<dyn CardCache>,
    /// Card API client used to fill cache misses.
    pub cards: CardSourceClient,
    pub config: Config,
}
