//! The explicit per-round context threaded into every behaviour

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tracing::info;

use memeweaver_chain::{ActionBuilder, ChainError, ChainStateClient};
use memeweaver_llm::LlmClient;
use memeweaver_social::SocialClient;
use memeweaver_store::{AgentLedger, StoreError};

use crate::config::EngineConfig;

/// Errors a behaviour propagates to the round driver.
///
/// Everything else - failed posts, model refusals, wrong response kinds -
/// stays inside the behaviour as a logged skip or an error event.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Ledger error: {0}")]
    Store(#[from] StoreError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
}

/// Everything a behaviour needs for one round, passed explicitly
#[derive(Clone)]
pub struct RoundContext {
    pub config: EngineConfig,
    pub ledger: AgentLedger,
    pub social: Arc<dyn SocialClient>,
    pub llm: Arc<dyn LlmClient>,
    pub actions: ActionBuilder,
    pub chain_state: Arc<dyn ChainStateClient>,
}

impl RoundContext {
    pub fn new(
        config: EngineConfig,
        ledger: AgentLedger,
        social: Arc<dyn SocialClient>,
        llm: Arc<dyn LlmClient>,
        actions: ActionBuilder,
        chain_state: Arc<dyn ChainStateClient>,
    ) -> Self {
        Self {
            config,
            ledger,
            social,
            llm,
            actions,
            chain_state,
        }
    }

    /// Randomized pause between external actions, to avoid the
    /// uniform-interval signature rate limiters look for
    pub(crate) async fn jitter_delay(&self) {
        let max = self.config.max_action_delay_secs;
        if max == 0 {
            return;
        }
        let delay = rand::thread_rng().gen_range(0..=max);
        info!(delay, "sleeping before next action");
        tokio::time::sleep(Duration::from_secs(delay)).await;
    }
}
