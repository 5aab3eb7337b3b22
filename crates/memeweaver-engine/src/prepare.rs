//! Chain-facing passes: action preparation and the funds gate

use std::sync::Arc;

use memeweaver_chain::FundsCheck;
use memeweaver_types::{BehaviourOutcome, RoundEvent, SyncedState};

use crate::context::RoundContext;

/// Wraps the chain action builder into a round behaviour
pub struct ActionPreparationBehaviour {
    ctx: Arc<RoundContext>,
}

impl ActionPreparationBehaviour {
    pub fn new(ctx: Arc<RoundContext>) -> Self {
        Self { ctx }
    }

    /// `Done` with the encoded hash as payload, `Error` when no hash could
    /// be produced (the driver decides whether to retry the round)
    pub async fn run(&self, state: &SyncedState) -> crate::Result<BehaviourOutcome> {
        match self.ctx.actions.tx_hash(state).await? {
            Some(tx_hash) => Ok(BehaviourOutcome::done().with_payload(tx_hash)),
            None => Ok(BehaviourOutcome::error()),
        }
    }
}

/// Gates action rounds on the agent still affording gas
pub struct CheckFundsBehaviour {
    ctx: Arc<RoundContext>,
}

impl CheckFundsBehaviour {
    pub fn new(ctx: Arc<RoundContext>) -> Self {
        Self { ctx }
    }

    pub async fn run(&self, state: &SyncedState) -> crate::Result<RoundEvent> {
        let check = FundsCheck::new(
            self.ctx.chain_state.clone(),
            self.ctx.config.minimum_gas_balance,
        );
        Ok(check.check(state).await)
    }
}
