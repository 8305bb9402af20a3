//! Card source client — the single point of entry for Pokémon TCG API calls.
//!
//! No other module talks to the card API directly; handlers go through this
//! client and the cache. A lookup failure never fails a binder view — the
//! slot degrades to inline data or a placeholder instead.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::card::Card;

pub const DEFAULT_API_URL: &str = "https://api.pokemontcg.io/v2";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum CardSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Card API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Card not found: {0}")]
    NotFound(String),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

/// Wire shape of the card API's single-card response.
#[derive(Debug, Deserialize)]
struct CardEnvelope {
    data: ApiCard,
}

#[derive(Debug, Deserialize)]
struct ApiCard {
    id: String,
    name: String,
    #[serde(default)]
    images: ApiCardImages,
    #[serde(default)]
    set: Option<ApiCardSet>,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    rarity: Option<String>,
    #[serde(default)]
    supertype: Option<String>,
    #[serde(default)]
    types: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiCardImages {
    #[serde(default)]
    small: Option<String>,
    #[serde(default)]
    large: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCardSet {
    name: String,
}

impl From<ApiCard> for Card {
    fn from(api: ApiCard) -> Self {
        Card {
            id: api.id,
            name: api.name,
            image: api.images.small.unwrap_or_default(),
            image_large: api.images.large,
            set_name: api.set.map(|s| s.name),
            number: api.number,
            rarity: api.rarity,
            supertype: api.supertype,
            types: api.types,
        }
    }
}

/// HTTP client for the card API, with retry on 429/5xx.
#[derive(Clone)]
pub struct CardSourceClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CardSourceClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Fetches one card by id (e.g. `"base1-4"`).
    /// Retries on 429 and 5xx with exponential backoff.
    pub async fn get_card(&self, card_id: &str) -> Result<Card, CardSourceError> {
        let url = format!("{}/cards/{}", self.base_url, card_id);
        let mut last_error: Option<CardSourceError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 250ms, 500ms
                let delay = std::time::Duration::from_millis(250 * (1 << (attempt - 1)));
                warn!(
                    "Card API attempt {} for {} failed, retrying after {}ms...",
                    attempt,
                    card_id,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.get(&url);
            if let Some(key) = &self.api_key {
                request = request.header("X-Api-Key", key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(CardSourceError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 404 {
                return Err(CardSourceError::NotFound(card_id.to_string()));
            }

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Card API returned {} for {}: {}", status, card_id, body);
                last_error = Some(CardSourceError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(CardSourceError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let envelope: CardEnvelope = response.json().await?;
            debug!("Card API resolved {card_id}");
            return Ok(envelope.data.into());
        }

        Err(last_error.unwrap_or(CardSourceError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}
