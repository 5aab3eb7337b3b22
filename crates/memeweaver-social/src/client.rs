//! Social network collaborator contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use memeweaver_types::DraftPost;

/// A tweet as returned by the collaborator's timeline calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: String,
    pub text: String,
    pub user_name: String,
}

/// The external social client.
///
/// Result conventions mirror the backing API:
/// - `post` returns the new post ids, or `None` on total failure (a call is
///   all-or-nothing; there is no partial-success tracking)
/// - `search` distinguishes an API error (`None`) from no matches (empty)
/// - `user_posts` returns at most the account's latest posts, newest first
#[async_trait]
pub trait SocialClient: Send + Sync {
    async fn post(&self, posts: Vec<DraftPost>) -> Option<Vec<String>>;

    async fn like(&self, tweet_id: &str) -> bool;

    async fn retweet(&self, tweet_id: &str) -> bool;

    async fn follow(&self, user_id: &str) -> bool;

    async fn user_posts(&self, handle: &str) -> Option<Vec<SocialPost>>;

    async fn search(&self, query: &str, count: usize) -> Option<Vec<Value>>;

    /// Drop handles whose accounts the platform reports as suspended
    async fn filter_suspended(&self, handles: Vec<String>) -> Vec<String>;
}
