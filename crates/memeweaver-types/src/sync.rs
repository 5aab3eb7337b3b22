//! The read-only consensus view handed to behaviours

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::TokenAction;

/// Synchronized data for one round.
///
/// Maintained by the external consensus layer; behaviours only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedState {
    /// The agent's persona, used to compose decision prompts
    pub persona: String,
    /// The agent's own address on the chain
    pub agent_address: String,
    /// The multisig wallet the agent transacts through
    pub safe_contract_address: String,
    /// The meme factory contract
    pub meme_factory_address: String,
    pub chain_id: String,
    /// The token action agreed by a prior decision round, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_action: Option<TokenAction>,
    /// Set once the settlement rounds report the action landed on-chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_tx_hash: Option<String>,
    /// Consensus-agreed wall-clock time for this round
    pub timestamp: DateTime<Utc>,
}
