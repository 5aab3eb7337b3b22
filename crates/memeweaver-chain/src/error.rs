//! Chain-side error taxonomy

use thiserror::Error;

use memeweaver_store::StoreError;
use memeweaver_types::TokenActionKind;

/// Errors that propagate to the round driver.
///
/// Handled failure branches (wrong response kind, missing body fields,
/// invalid upstream hashes) do not appear here - they are logged and mapped
/// to "no hash" at the call site. These variants cover malformed
/// synchronized state and bookkeeping failures.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Token action `{action}` is missing required field `{field}`")]
    MissingActionField {
        action: TokenActionKind,
        field: &'static str,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Ledger error: {0}")]
    Store(#[from] StoreError),
}
