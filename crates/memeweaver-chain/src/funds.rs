//! Native-balance gas check

use std::sync::Arc;

use tracing::info;

use memeweaver_types::{RoundEvent, SyncedState};

use crate::client::ChainStateClient;

/// Checks the agent can still pay for gas before any action round runs
pub struct FundsCheck {
    chain_state: Arc<dyn ChainStateClient>,
    minimum_gas_balance: u128,
}

impl FundsCheck {
    pub fn new(chain_state: Arc<dyn ChainStateClient>, minimum_gas_balance: u128) -> Self {
        Self {
            chain_state,
            minimum_gas_balance,
        }
    }

    pub async fn check(&self, state: &SyncedState) -> RoundEvent {
        let balance = self
            .chain_state
            .native_balance(&state.agent_address, &state.chain_id)
            .await;

        let Some(balance) = balance.filter(|b| *b > 0) else {
            return RoundEvent::NoFunds;
        };

        if balance < self.minimum_gas_balance {
            info!(
                balance = %balance,
                minimum = %self.minimum_gas_balance,
                "agent has insufficient funds for gas"
            );
            return RoundEvent::NoFunds;
        }

        RoundEvent::Done
    }
}
