//! Deterministic escrow-account derivation.
//!
//! An escrow account's identity is a function of its immutable construction
//! parameters and nothing else, so processing the identical payload entry
//! twice lands on the same id both times. That collision is the idempotence
//! boundary for transport re-delivery.
//!
//! # Byte Layout (128 bytes total)
//! - Bytes 0-31:   campaign hash (32 bytes)
//! - Bytes 32-63:  depositor owner (20-byte canonical form, left-padded)
//! - Bytes 64-95:  amount (uint256, big-endian, left-padded)
//! - Bytes 96-127: unlock timestamp in seconds (uint256, big-endian, left-padded)

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Derive the deterministic escrow account id for one depositor.
///
/// Identical four-tuples always collide onto the same id; any field change
/// produces a different id.
pub fn derive_account_id(
    campaign_hash: &[u8; 32],
    owner: &[u8; 20],
    amount: u128,
    unlock_seconds: u64,
) -> [u8; 32] {
    let mut data = [0u8; 128];

    data[0..32].copy_from_slice(campaign_hash);

    // owner left-padded into the second word
    data[32 + 12..64].copy_from_slice(owner);

    // uint256 amount - left-padded to 32 bytes, big-endian
    let amount_bytes = amount.to_be_bytes();
    data[64 + 16..96].copy_from_slice(&amount_bytes);

    // uint256 unlock - left-padded to 32 bytes, big-endian
    let unlock_bytes = unlock_seconds.to_be_bytes();
    data[96 + 24..128].copy_from_slice(&unlock_bytes);

    keccak256(&data)
}

/// Convert a 32-byte id to a hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
