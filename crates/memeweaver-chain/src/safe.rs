//! Safe transaction payload encoding

/// Length of the raw hash string the safe collaborator returns ("0x" + 64)
pub const TX_HASH_LENGTH: usize = 66;

/// Gas forwarded with every safe transaction
pub const SAFE_GAS: u64 = 0;

/// Sentinel call data for a transaction with no call
pub const EMPTY_CALL_DATA: &[u8] = b"0x";

/// Combine the stripped safe hash with the transaction fields into the
/// final payload the settlement rounds submit.
///
/// The field order and packing are verified on-chain and must not change:
/// hash (64 hex chars, no prefix), then value and gas as 32-byte big-endian
/// hex, then the target address verbatim, then the call data as hex.
pub fn encode_safe_tx_payload(
    safe_tx_hash: &str,
    value: u128,
    safe_tx_gas: u64,
    to_address: &str,
    data: &[u8],
) -> String {
    format!(
        "{safe_tx_hash}{value:064x}{safe_tx_gas:064x}{to_address}{}",
        hex::encode(data)
    )
}
