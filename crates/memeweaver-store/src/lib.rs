//! Memeweaver Store - The persisted dedup ledger
//!
//! The ledger is the agent's durable memory across consensus rounds:
//! - `hearted_memes`: token nonces already hearted
//! - `summoned_tokens`: tokens this agent has deployed
//! - `tweets`: the agent's own tweet log, newest last
//! - `interacted_tweet_ids`: tweet ids already acted on
//!
//! # Invariants
//!
//! 1. Collections are append-only; nothing is ever deleted
//! 2. Duplicate appends are tolerated; dedup decisions use membership
//! 3. Loads degrade to empty on any store or decode failure (logged)
//! 4. Saves always write the whole collection in canonical key order
//!
//! Callers read-modify-write entire collections. One behaviour owns each
//! key per round, so no in-process locking is needed beyond the store's own.

mod ledger;
mod memory;
mod store;

pub use ledger::{
    AgentLedger, HEARTED_MEMES_KEY, INTERACTED_TWEET_IDS_KEY, SUMMONED_TOKENS_KEY, TWEETS_KEY,
};
pub use memory::InMemoryStore;
pub use store::{KvStore, StoreError};

pub type Result<T> = std::result::Result<T, StoreError>;
