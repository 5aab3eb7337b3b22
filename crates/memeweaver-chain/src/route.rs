//! Action routing: token action -> factory callable + exact keyword set

use serde_json::{Map, Value};

use memeweaver_types::{TokenAction, TokenActionKind};

use crate::client::ContractCallable;
use crate::error::ChainError;

/// A routed factory call
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
    pub callable: ContractCallable,
    pub kwargs: Map<String, Value>,
}

fn require_str(
    action: TokenActionKind,
    field: &'static str,
    value: &Option<String>,
) -> crate::Result<Value> {
    value
        .as_ref()
        .map(|v| Value::String(v.clone()))
        .ok_or(ChainError::MissingActionField { action, field })
}

/// Map a token action onto its factory callable and keyword arguments.
///
/// Each action kind passes exactly its own keyword set and nothing else;
/// a missing required field is a typed error, not a panic.
pub fn route(action: &TokenAction) -> crate::Result<ContractCall> {
    let kind = action.action;
    let mut kwargs = Map::new();

    let callable = match kind {
        TokenActionKind::Summon => {
            kwargs.insert(
                "token_name".to_string(),
                require_str(kind, "token_name", &action.token_name)?,
            );
            kwargs.insert(
                "token_ticker".to_string(),
                require_str(kind, "token_ticker", &action.token_ticker)?,
            );
            let supply = action.token_supply.ok_or(ChainError::MissingActionField {
                action: kind,
                field: "token_supply",
            })?;
            let supply = serde_json::to_value(supply).map_err(|e| ChainError::Serialization {
                message: e.to_string(),
            })?;
            kwargs.insert("token_supply".to_string(), supply);
            ContractCallable::BuildSummonTx
        }
        TokenActionKind::Heart | TokenActionKind::Unleash => {
            let nonce = action.token_nonce.ok_or(ChainError::MissingActionField {
                action: kind,
                field: "token_nonce",
            })?;
            kwargs.insert("meme_nonce".to_string(), Value::from(nonce));
            match kind {
                TokenActionKind::Heart => ContractCallable::BuildHeartTx,
                _ => ContractCallable::BuildUnleashTx,
            }
        }
        TokenActionKind::Collect | TokenActionKind::Purge => {
            kwargs.insert(
                "meme_address".to_string(),
                require_str(kind, "token_address", &action.token_address)?,
            );
            match kind {
                TokenActionKind::Collect => ContractCallable::BuildCollectTx,
                _ => ContractCallable::BuildPurgeTx,
            }
        }
    };

    Ok(ContractCall { callable, kwargs })
}
