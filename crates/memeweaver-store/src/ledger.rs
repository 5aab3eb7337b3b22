//! The agent ledger: typed access to the four persisted collections

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use memeweaver_types::{SummonedToken, TweetRecord};

use crate::store::{KvStore, StoreError};

pub const HEARTED_MEMES_KEY: &str = "hearted_memes";
pub const SUMMONED_TOKENS_KEY: &str = "summoned_tokens";
pub const TWEETS_KEY: &str = "tweets";
pub const INTERACTED_TWEET_IDS_KEY: &str = "interacted_tweet_ids";

/// Typed read-modify-write access to the persisted collections.
///
/// Loads never fail: a store miss, store-level failure or decode failure
/// yields the empty default and an error log. Saves write the whole
/// collection back in canonical (sorted-key) JSON so re-reads are
/// deterministic across restarts.
#[derive(Clone)]
pub struct AgentLedger {
    store: Arc<dyn KvStore>,
}

impl AgentLedger {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn load_hearted(&self) -> Vec<u64> {
        self.load_list(HEARTED_MEMES_KEY).await
    }

    pub async fn save_hearted(&self, nonces: &[u64]) -> crate::Result<()> {
        self.save_list(HEARTED_MEMES_KEY, nonces).await
    }

    pub async fn load_summoned(&self) -> Vec<SummonedToken> {
        self.load_list(SUMMONED_TOKENS_KEY).await
    }

    pub async fn save_summoned(&self, tokens: &[SummonedToken]) -> crate::Result<()> {
        self.save_list(SUMMONED_TOKENS_KEY, tokens).await
    }

    pub async fn load_tweets(&self) -> Vec<TweetRecord> {
        self.load_list(TWEETS_KEY).await
    }

    pub async fn save_tweets(&self, tweets: &[TweetRecord]) -> crate::Result<()> {
        self.save_list(TWEETS_KEY, tweets).await
    }

    pub async fn load_interacted(&self) -> Vec<u64> {
        self.load_list(INTERACTED_TWEET_IDS_KEY).await
    }

    pub async fn save_interacted(&self, tweet_ids: &[u64]) -> crate::Result<()> {
        self.save_list(INTERACTED_TWEET_IDS_KEY, tweet_ids).await
    }

    async fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(values) = self.store.read(&[key]).await else {
            error!(key, "error while loading the database");
            return Vec::new();
        };

        let Some(raw) = values.get(key).filter(|v| !v.is_empty()) else {
            return Vec::new();
        };

        match serde_json::from_str(raw) {
            Ok(list) => list,
            Err(e) => {
                error!(key, error = %e, "could not decode persisted collection");
                Vec::new()
            }
        }
    }

    async fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> crate::Result<()> {
        // Round-trip through Value so object keys serialize in sorted order
        let canonical = serde_json::to_value(items)
            .and_then(|v| serde_json::to_string(&v))
            .map_err(|e| StoreError::Serialization {
                message: e.to_string(),
            })?;

        self.store
            .write([(key.to_string(), canonical)].into_iter().collect())
            .await
    }
}
