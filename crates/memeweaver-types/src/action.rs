//! Token actions against the meme factory

use serde::{Deserialize, Serialize};

/// The closed set of factory operations a decision round can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenActionKind {
    /// Deploy a new meme token
    Summon,
    /// Back an existing token with native funds
    Heart,
    /// Unlock a token for trading
    Unleash,
    /// Collect the allocation earned by hearting
    Collect,
    /// Purge an abandoned token
    Purge,
}

impl TokenActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summon => "summon",
            Self::Heart => "heart",
            Self::Unleash => "unleash",
            Self::Collect => "collect",
            Self::Purge => "purge",
        }
    }
}

impl std::fmt::Display for TokenActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single requested token action, produced by a prior decision round.
///
/// Which optional fields are populated depends on the kind; the chain
/// routing layer rejects actions whose required fields are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAction {
    pub action: TokenActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_supply: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_nonce: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
    /// Native value to send along, in the chain's smallest unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u128>,
    /// Pre-composed announcement text for the action tweet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet: Option<String>,
}

impl TokenAction {
    pub fn new(action: TokenActionKind) -> Self {
        Self {
            action,
            token_name: None,
            token_ticker: None,
            token_supply: None,
            token_nonce: None,
            token_address: None,
            amount: None,
            tweet: None,
        }
    }
}

/// A token this agent has summoned, recorded once deployment is confirmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummonedToken {
    pub token_name: String,
    pub token_ticker: String,
    pub total_supply: u128,
    pub token_nonce: u64,
}
