//! State definitions for the deposit executor.

use common::engine::Recipe;
use common::AssetInfo;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address (the registry owner)
    pub admin: Addr,
    /// Whether the executor is currently paused
    pub paused: bool,
    /// Local transport endpoint allowed to deliver payloads
    pub transport_endpoint: Addr,
    /// External scripted-execution engine
    pub script_engine: Addr,
    /// Bech32 prefix of this chain's addresses, used to reconstruct
    /// depositor owners from the payload's raw 20-byte form
    pub address_prefix: String,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

/// Destination-side campaign configuration.
///
/// Campaigns are permanent ledger keys: created once, never deleted.
#[cw_serde]
pub struct Campaign {
    /// Address authorized to mutate this campaign and trigger batch scripts
    pub owner: Addr,
    /// Token denominating deposits on this chain
    pub input_token: AssetInfo,
    /// Time after which withdrawal scripts may run
    pub unlock_timestamp: Timestamp,
    /// Script run once per escrow account after funding
    pub deposit_recipe: Recipe,
    /// Script run by account owners after unlock
    pub withdrawal_recipe: Recipe,
    /// Set on first deposit-script execution; recipes are immutable afterwards
    pub recipes_locked: bool,
}

/// One depositor's escrow account, keyed by its deterministic id
#[cw_serde]
pub struct EscrowAccount {
    /// Campaign the account belongs to (32 bytes)
    pub campaign_hash: Binary,
    /// Depositor that owns this account
    pub owner: Addr,
    /// Share of the bridged funds attributed to this account
    pub amount: Uint128,
    /// Unlock time frozen at creation
    pub unlock_timestamp: Timestamp,
    /// Whether the one-shot deposit script has run
    pub deposit_script_executed: bool,
    /// Whether the custodied funds have been handed to the engine
    pub funds_disbursed: bool,
}

/// Executor statistics
#[cw_serde]
pub struct Stats {
    /// Total payload messages processed
    pub messages_processed: u64,
    /// Total escrow accounts materialized
    pub accounts_created: u64,
    /// Total script executions delegated to the engine
    pub scripts_executed: u64,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:ccdm-deposit-executor";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "1.0.0";

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Executor statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Campaign registry
/// Key: 32-byte campaign hash, Value: Campaign
pub const CAMPAIGNS: Map<&[u8], Campaign> = Map::new("campaigns");

/// Escrow accounts
/// Key: 32-byte deterministic account id, Value: EscrowAccount
pub const ESCROWS: Map<&[u8], EscrowAccount> = Map::new("escrows");
