//! LLM collaborator contract

use async_trait::async_trait;

/// The model call, as the engine sees it.
///
/// `None` signals any provider-side failure; the caller maps it to the
/// round's error event. No retry happens at this layer.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Option<String>;
}
