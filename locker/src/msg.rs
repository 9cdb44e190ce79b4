//! Message types for the deposit locker.

use common::AssetInfo;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};
use cw20::Cw20ReceiveMsg;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// Authority allowed to flip campaign green lights
    pub green_lighter: String,
    /// External market registry contract
    pub market_registry: String,
    /// Local token-transport endpoint contract
    pub transport_endpoint: String,
    /// Transport identifier of the destination chain's endpoint
    pub dest_endpoint_id: u32,
    /// Destination-side deposit executor (32-byte universal address)
    pub executor: Binary,
    /// Denom the transport charges its native fee in
    pub fee_denom: String,
    /// Batch cap override (defaults to 300)
    pub max_depositors_per_bridge: Option<u32>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Escrow Account Entry Points
    // ========================================================================
    /// Deposit native campaign funds.
    ///
    /// Authorization: the calling escrow account itself — its address is the
    /// ledger key. The campaign's input token must match the attached funds.
    DepositNative {
        /// 32-byte campaign hash reported by the escrow account
        campaign_hash: Binary,
    },

    /// Deposit CW20 campaign funds (called via CW20 send).
    /// Implements the CW20 Receiver interface.
    Receive(Cw20ReceiveMsg),

    /// Withdraw a previously deposited amount.
    ///
    /// Authorization: the escrow account that deposited. The slot is cleared
    /// before funds move back.
    Withdraw {
        /// 32-byte campaign hash
        campaign_hash: Binary,
    },

    // ========================================================================
    // Bridging
    // ========================================================================
    /// Bridge a batch of depositors to the destination executor.
    ///
    /// Authorization: anyone, once the campaign is green-lit. The caller
    /// attaches the transport's native fee; overpayment is refunded.
    Bridge {
        /// 32-byte campaign hash
        campaign_hash: Binary,
        /// Destination execution gas budget; estimated from the batch size
        /// when omitted
        executor_gas_limit: Option<u64>,
        /// Candidate escrow account addresses to include
        depositors: Vec<String>,
    },

    /// Flip a campaign's green light.
    ///
    /// Authorization: green-light authority only
    SetGreenLight {
        /// 32-byte campaign hash
        campaign_hash: Binary,
        /// Whether bridging is allowed
        allowed: bool,
    },

    // ========================================================================
    // Configuration
    // ========================================================================
    /// Replace the green-light authority
    ///
    /// Authorization: Admin only
    SetGreenLighter {
        /// New authority address
        address: String,
    },

    /// Change the per-transaction batch cap
    ///
    /// Authorization: Admin only
    SetBatchCap {
        /// New cap (must be at least 1)
        max_depositors: u32,
    },

    /// Rewire the transport endpoint, destination endpoint, and executor
    ///
    /// Authorization: Admin only
    SetTransport {
        endpoint: String,
        dest_endpoint_id: u32,
        /// Destination executor (32-byte universal address)
        executor: Binary,
    },

    /// Replace the market registry contract
    ///
    /// Authorization: Admin only
    SetMarketRegistry {
        /// New registry address
        address: String,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Pause the locker (stops deposits, withdrawals, and bridging)
    ///
    /// Authorization: Admin only
    Pause {},

    /// Resume the locker
    ///
    /// Authorization: Admin only
    Unpause {},

    /// Propose a new admin (starts the timelock)
    ///
    /// Authorization: Admin only
    ProposeAdmin { new_admin: String },

    /// Accept the pending admin role (after the timelock)
    ///
    /// Authorization: pending admin only
    AcceptAdmin {},

    /// Cancel a pending admin proposal
    ///
    /// Authorization: Admin only
    CancelAdminProposal {},

    /// Recover stuck assets (emergency, requires paused state)
    ///
    /// Authorization: Admin only
    RecoverAsset {
        asset: AssetInfo,
        amount: Uint128,
        recipient: String,
    },
}

/// Hook messages embedded in a CW20 send
#[cw_serde]
pub enum ReceiveMsg {
    /// Deposit the sent CW20 tokens for a campaign. The CW20 sender is the
    /// escrow account and becomes the ledger key.
    Deposit {
        /// 32-byte campaign hash reported by the escrow account
        campaign_hash: Binary,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns locker statistics
    #[returns(StatsResponse)]
    Stats {},

    /// Returns the escrowed amount for one depositor slot
    #[returns(LedgerAmountResponse)]
    LedgerAmount {
        campaign_hash: Binary,
        escrow: String,
    },

    /// Returns whether a campaign is green-lit
    #[returns(GreenLightResponse)]
    GreenLight { campaign_hash: Binary },

    /// Returns the next outgoing batch nonce
    #[returns(NonceResponse)]
    CurrentNonce {},

    /// Returns pending admin proposal details
    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},

    /// Returns the estimated destination execution gas for a batch size
    #[returns(ExecutorGasResponse)]
    EstimateExecutorGas { depositor_count: u32 },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub green_lighter: Addr,
    pub market_registry: Addr,
    pub transport_endpoint: Addr,
    pub dest_endpoint_id: u32,
    pub executor: Binary,
    pub fee_denom: String,
    pub max_depositors_per_bridge: u32,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_deposits: u64,
    pub total_withdrawals: u64,
    pub total_bridges: u64,
    pub total_amount_bridged: Uint128,
}

#[cw_serde]
pub struct LedgerAmountResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct GreenLightResponse {
    pub allowed: bool,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_admin: Addr,
    pub execute_after: Timestamp,
}

#[cw_serde]
pub struct ExecutorGasResponse {
    pub gas_limit: u64,
}
