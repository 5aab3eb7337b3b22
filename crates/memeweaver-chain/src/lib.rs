//! Memeweaver Chain - building multisig transactions for the meme factory
//!
//! Turns an agreed [`memeweaver_types::TokenAction`] into the encoded safe
//! transaction hash the settlement rounds submit on-chain:
//!
//! 1. Route the action to a factory callable and its exact keyword set
//! 2. Fetch the raw transaction data from the contract collaborator
//! 3. Compute the native value to attach
//! 4. Obtain and validate the safe hash, then encode the full payload
//! 5. Record optimistic dedup bookkeeping (heart) before confirmation
//! 6. After settlement reports the final hash, record confirmed bookkeeping
//!
//! Every collaborator response is checked by kind; a wrong kind or missing
//! body field fails the round with a log, never a panic.

mod builder;
mod client;
mod error;
mod funds;
mod route;
mod safe;

pub use builder::ActionBuilder;
pub use client::{
    ChainStateClient, ContractCallable, ContractClient, ContractResponse, ResponseKind,
    SafeClient,
};
pub use error::ChainError;
pub use funds::FundsCheck;
pub use route::{route, ContractCall};
pub use safe::{encode_safe_tx_payload, EMPTY_CALL_DATA, SAFE_GAS, TX_HASH_LENGTH};

pub type Result<T> = std::result::Result<T, ChainError>;
