//! The action builder: routed call -> raw tx -> encoded safe hash

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info};

use memeweaver_store::AgentLedger;
use memeweaver_types::{SummonedToken, SyncedState, TokenActionKind};

use crate::client::{ContractCallable, ContractClient, ResponseKind, SafeClient};
use crate::error::ChainError;
use crate::route::route;
use crate::safe::{encode_safe_tx_payload, SAFE_GAS, TX_HASH_LENGTH};

/// Builds safe multisig transactions for agreed token actions and keeps the
/// dedup ledger's chain-side collections current.
#[derive(Clone)]
pub struct ActionBuilder {
    contracts: Arc<dyn ContractClient>,
    safe: Arc<dyn SafeClient>,
    ledger: AgentLedger,
}

impl ActionBuilder {
    pub fn new(
        contracts: Arc<dyn ContractClient>,
        safe: Arc<dyn SafeClient>,
        ledger: AgentLedger,
    ) -> Self {
        Self {
            contracts,
            safe,
            ledger,
        }
    }

    /// Produce the encoded safe transaction hash for the round's action.
    ///
    /// Returns `Ok(Some(""))` once a final on-chain hash exists (the action
    /// is finished; bookkeeping runs instead), `Ok(None)` when there is no
    /// action or a collaborator failure was logged, and `Err` only for
    /// malformed synchronized state.
    pub async fn tx_hash(&self, state: &SyncedState) -> crate::Result<Option<String>> {
        if state.final_tx_hash.is_some() {
            self.post_action(state).await?;
            return Ok(Some(String::new()));
        }

        let Some(action) = &state.token_action else {
            return Ok(None);
        };

        let call = route(action)?;
        info!(action = %action.action, callable = %call.callable, "preparing the action transaction");

        let response = self
            .contracts
            .call(
                &state.meme_factory_address,
                call.callable,
                &state.chain_id,
                call.kwargs,
            )
            .await;

        if response.kind != ResponseKind::RawTransaction {
            error!(
                action = %action.action,
                kind = ?response.kind,
                "error while building the action tx"
            );
            return Ok(None);
        }

        let Some(data_hex) = response.body.get("data").and_then(Value::as_str) else {
            error!(action = %action.action, "transaction response carries no data");
            return Ok(None);
        };

        let data = match hex::decode(data_hex.trim_start_matches("0x")) {
            Ok(data) => data,
            Err(e) => {
                error!(action = %action.action, error = %e, "transaction data is not valid hex");
                return Ok(None);
            }
        };

        // Native value rides along only for the funded actions
        let value = match action.action {
            TokenActionKind::Summon | TokenActionKind::Heart => {
                action.amount.ok_or(ChainError::MissingActionField {
                    action: action.action,
                    field: "amount",
                })?
            }
            _ => 0,
        };

        let safe_tx_hash = self
            .build_safe_tx_hash(state, &state.meme_factory_address, value, &data)
            .await;

        // Optimistic write: the heart is recorded before the transaction
        // confirms. A failed transaction leaves a false-positive dedup
        // entry; the confirmed write in post_action is duplicate-tolerant.
        if action.action == TokenActionKind::Heart {
            let nonce = action.token_nonce.ok_or(ChainError::MissingActionField {
                action: action.action,
                field: "token_nonce",
            })?;
            self.store_heart(nonce).await?;
        }

        Ok(safe_tx_hash)
    }

    async fn build_safe_tx_hash(
        &self,
        state: &SyncedState,
        to_address: &str,
        value: u128,
        data: &[u8],
    ) -> Option<String> {
        info!(
            safe = %state.safe_contract_address,
            value = %value,
            "preparing safe transaction"
        );

        let response = self
            .safe
            .raw_hash(
                &state.safe_contract_address,
                to_address,
                value,
                data,
                SAFE_GAS,
                &state.chain_id,
            )
            .await;

        if response.kind != ResponseKind::State {
            error!(kind = ?response.kind, "couldn't get safe tx hash");
            return None;
        }

        let Some(tx_hash) = response.body.get("tx_hash").and_then(Value::as_str) else {
            error!("safe response carries no tx_hash");
            return None;
        };

        if tx_hash.len() != TX_HASH_LENGTH {
            error!(tx_hash, "invalid safe tx hash was returned");
            return None;
        }

        let stripped = &tx_hash[2..];
        let safe_tx_hash = encode_safe_tx_payload(stripped, value, SAFE_GAS, to_address, data);
        info!(%safe_tx_hash, "safe transaction hash prepared");

        Some(safe_tx_hash)
    }

    /// Bookkeeping once a prior round reports the final on-chain hash
    pub async fn post_action(&self, state: &SyncedState) -> crate::Result<()> {
        let Some(action) = &state.token_action else {
            return Ok(());
        };

        let Some(token_nonce) = self.token_nonce(state).await else {
            error!("token nonce is none");
            return Ok(());
        };

        info!(action = %action.action, token_nonce, "the on-chain action has finished");

        if action.action == TokenActionKind::Summon {
            let mut tokens = self.ledger.load_summoned().await;
            tokens.push(SummonedToken {
                token_name: action
                    .token_name
                    .clone()
                    .ok_or(ChainError::MissingActionField {
                        action: action.action,
                        field: "token_name",
                    })?,
                token_ticker: action
                    .token_ticker
                    .clone()
                    .ok_or(ChainError::MissingActionField {
                        action: action.action,
                        field: "token_ticker",
                    })?,
                total_supply: action
                    .token_supply
                    .ok_or(ChainError::MissingActionField {
                        action: action.action,
                        field: "token_supply",
                    })?,
                token_nonce,
            });
            self.ledger.save_summoned(&tokens).await?;
            info!("recorded summoned token");
        }

        if matches!(
            action.action,
            TokenActionKind::Summon | TokenActionKind::Heart
        ) {
            // Confirmed write; duplicates the optimistic heart entry
            self.store_heart(token_nonce).await?;
            info!("stored hearted token");
        }

        Ok(())
    }

    /// Token nonce from the deployment event of the settled transaction
    async fn token_nonce(&self, state: &SyncedState) -> Option<u64> {
        let final_tx_hash = state.final_tx_hash.as_ref()?;

        let mut kwargs = Map::new();
        kwargs.insert(
            "tx_hash".to_string(),
            Value::String(final_tx_hash.clone()),
        );

        let response = self
            .contracts
            .call(
                &state.meme_factory_address,
                ContractCallable::GetTokenData,
                &state.chain_id,
                kwargs,
            )
            .await;

        if response.kind != ResponseKind::State {
            error!(kind = ?response.kind, "could not get the token data");
            return None;
        }

        let token_nonce = response.body.get("token_nonce").and_then(Value::as_u64);
        info!(?token_nonce, "fetched token nonce");
        token_nonce
    }

    /// Append a hearted nonce; duplicates are tolerated by design
    pub async fn store_heart(&self, token_nonce: u64) -> crate::Result<()> {
        let mut hearted = self.ledger.load_hearted().await;
        hearted.push(token_nonce);
        self.ledger.save_hearted(&hearted).await?;
        info!(token_nonce, "wrote hearted token to db");
        Ok(())
    }
}
