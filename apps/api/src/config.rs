use anyhow::{Context, Result};

use crate::cards::DEFAULT_API_URL;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub card_api_url: String,
    /// Optional key for the card API; without it the public rate limits apply.
    pub card_api_key: Option<String>,
    pub card_cache_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            card_api_url: std::env::var("CARD_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            card_api_key: std::env::var("CARD_API_KEY").ok(),
            card_cache_ttl_secs: std::env::var("CARD_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse::<u64>()
                .context("CARD_CACHE_TTL_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Fallback EnvFilter directive used when RUST_LOG is unset. Tracing
    /// targets are module paths, so this must use the underscored crate
    /// name, not the hyphenated package name.
    pub fn default_log_directive(&self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.rust_log)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
