//! Card cache — opportunistic enrichment of sparse binder entries.
//!
//! The cache is an injected capability (`Arc<dyn CardCache>` on app state),
//! never a module-level singleton. A cache failure is a miss, not an error
//! surfaced to the reader: slot resolution falls through to inline data and
//! placeholders.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::warn;

use crate::models::card::Card;

#[async_trait]
pub trait CardCache: Send + Sync {
    async fn get(&self, card_id: &str) -> Result<Option<Card>>;
    async fn put(&self, card: &Card) -> Result<()>;
}

fn card_key(card_id: &str) -> String {
    format!("card:{card_id}")
}

/// Redis-backed cache. Cards are stored as JSON strings with a TTL so stale
/// card data ages out on its own.
pub struct RedisCardCache {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisCardCache {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        RedisCardCache { client, ttl_secs }
    }
}

#[async_trait]
impl CardCache for RedisCardCache {
    async fn get(&self, card_id: &str) -> Result<Option<Card>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(card_key(card_id)).await?;
        match raw {
            None => Ok(None),
            Some(json) => match serde_json::from_str(&json) {
                Ok(card) => Ok(Some(card)),
                Err(e) => {
                    // Undeserializable value (old schema, corruption): miss.
                    warn!("Dropping unreadable cache entry for {card_id}: {e}");
                    Ok(None)
                }
            },
        }
    }

    async fn put(&self, card: &Card) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(card)?;
        conn.set_ex::<_, _, ()>(card_key(&card.id), json, self.ttl_secs)
            .await?;
        Ok(())
    }
}

/// Process-local cache used in tests and as a no-infrastructure fallback.
#[derive(Default)]
pub struct InMemoryCardCache {
    inner: RwLock<HashMap<String, Card>>,
}

#[async_trait]
impl CardCache for InMemoryCardCache {
    async fn get(&self, card_id: &str) -> Result<Option<Card>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| anyhow::anyhow!("card cache lock poisoned"))?;
        Ok(inner.get(card_id).cloned())
    }

    async fn put(&self, card: &Card) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| anyhow::anyhow!("card cache lock poisoned"))?;
        inner.insert(card.id.clone(), card.clone());
        Ok(())
    }
}
