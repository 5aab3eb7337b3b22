//! Contract-side collaborator contracts

use async_trait::async_trait;
use serde_json::{Map, Value};

/// What kind of payload a collaborator response carries.
///
/// Call sites check the kind explicitly; anything other than the expected
/// kind is a hard failure for that call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    State,
    RawTransaction,
    Error,
}

/// A response from the contract-interaction or safe collaborator
#[derive(Debug, Clone)]
pub struct ContractResponse {
    pub kind: ResponseKind,
    pub body: Map<String, Value>,
}

impl ContractResponse {
    pub fn state(body: Map<String, Value>) -> Self {
        Self {
            kind: ResponseKind::State,
            body,
        }
    }

    pub fn raw_transaction(body: Map<String, Value>) -> Self {
        Self {
            kind: ResponseKind::RawTransaction,
            body,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(message.into()));
        Self {
            kind: ResponseKind::Error,
            body,
        }
    }
}

/// The closed set of factory callables this pipeline invokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractCallable {
    BuildSummonTx,
    BuildHeartTx,
    BuildUnleashTx,
    BuildCollectTx,
    BuildPurgeTx,
    GetTokenData,
}

impl ContractCallable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuildSummonTx => "build_summon_tx",
            Self::BuildHeartTx => "build_heart_tx",
            Self::BuildUnleashTx => "build_unleash_tx",
            Self::BuildCollectTx => "build_collect_tx",
            Self::BuildPurgeTx => "build_purge_tx",
            Self::GetTokenData => "get_token_data",
        }
    }
}

impl std::fmt::Display for ContractCallable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The external contract-interaction collaborator (factory contract)
#[async_trait]
pub trait ContractClient: Send + Sync {
    async fn call(
        &self,
        contract_address: &str,
        callable: ContractCallable,
        chain_id: &str,
        kwargs: Map<String, Value>,
    ) -> ContractResponse;
}

/// The external safe-contract collaborator
#[async_trait]
pub trait SafeClient: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn raw_hash(
        &self,
        safe_address: &str,
        to_address: &str,
        value: u128,
        data: &[u8],
        safe_tx_gas: u64,
        chain_id: &str,
    ) -> ContractResponse;
}

/// The external chain-state collaborator (node queries)
#[async_trait]
pub trait ChainStateClient: Send + Sync {
    /// Native balance in the chain's smallest unit; `None` on query failure
    async fn native_balance(&self, address: &str, chain_id: &str) -> Option<u128>;
}
