//! Key-value store collaborator contract

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by key-value writes
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store write failed: {message}")]
    WriteFailed { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// The external key-value store the ledger persists through.
///
/// `read` returns `None` on a store-level failure; callers treat that the
/// same as missing data. Values are opaque strings (JSON-serialized by the
/// ledger).
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn read(&self, keys: &[&str]) -> Option<HashMap<String, String>>;

    async fn write(&self, entries: HashMap<String, String>) -> crate::Result<()>;
}
