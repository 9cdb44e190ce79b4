//! State definitions for the deposit locker.
//!
//! The ledger and the green-light flags are the only mutable shared state on
//! the source side; the ledger is written exclusively through the deposit and
//! withdraw entry points, the green light exclusively by the registered
//! authority.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Whether the locker is currently paused
    pub paused: bool,
    /// Authority allowed to flip campaign green lights (the multisig)
    pub green_lighter: Addr,
    /// External market registry answering campaign -> input token
    pub market_registry: Addr,
    /// Local token-transport endpoint contract
    pub transport_endpoint: Addr,
    /// Transport identifier of the destination chain's endpoint
    pub dest_endpoint_id: u32,
    /// Destination-side deposit executor (32-byte universal address)
    pub executor: Binary,
    /// Denom the transport charges its native fee in
    pub fee_denom: String,
    /// Upper bound on depositors per bridge transaction
    pub max_depositors_per_bridge: u32,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

/// Locker statistics
#[cw_serde]
pub struct Stats {
    /// Total number of deposits recorded
    pub total_deposits: u64,
    /// Total number of withdrawals paid out
    pub total_withdrawals: u64,
    /// Total number of completed bridge calls
    pub total_bridges: u64,
    /// Total amount moved across all bridge calls
    pub total_amount_bridged: Uint128,
}

/// In-flight bridge context consumed by the transport-send reply
#[cw_serde]
pub struct PendingBridge {
    /// Campaign being bridged
    pub campaign_hash: Binary,
    /// Locker-assigned batch nonce
    pub nonce: u64,
    /// Aggregate amount handed to the transport
    pub total: Uint128,
    /// Number of depositors included in the payload
    pub included: u32,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:ccdm-deposit-locker";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "1.0.0";

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

/// Default batch cap (keeps the linear gas estimate deliverable)
pub const DEFAULT_MAX_DEPOSITORS_PER_BRIDGE: u32 = 300;

/// Reply id of the transport send submessage
pub const BRIDGE_REPLY_ID: u64 = 1;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Locker statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Escrowed amounts
/// Key: (32-byte campaign hash, escrow account address), Value: amount
pub const LEDGER: Map<(&[u8], &Addr), Uint128> = Map::new("ledger");

/// Per-campaign bridge authorization
/// Key: 32-byte campaign hash, Value: whether bridging is allowed
pub const GREEN_LIGHT: Map<&[u8], bool> = Map::new("green_light");

/// Monotone nonce disambiguating same-campaign batches
pub const OUTGOING_NONCE: Item<u64> = Item::new("outgoing_nonce");

/// Mutual-exclusion flag held across ledger mutations
pub const REENTRANCY: Item<bool> = Item::new("reentrancy");

/// Context of the bridge call awaiting its transport receipt
pub const PENDING_BRIDGE: Item<PendingBridge> = Item::new("pending_bridge");
