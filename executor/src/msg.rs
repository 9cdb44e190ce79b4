//! Message types for the deposit executor.

use common::engine::Recipe;
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
    /// Admin address (the registry owner)
    pub admin: String,
    /// Local transport endpoint allowed to deliver payloads
    pub transport_endpoint: String,
    /// External scripted-execution engine
    pub script_engine: String,
    /// Bech32 prefix of this chain's addresses (e.g. "terra")
    pub address_prefix: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Inbound Payload Delivery
    // ========================================================================
    /// Deliver a bridged payload with native campaign funds attached.
    ///
    /// Authorization: transport endpoint only. `from` must be the adapter the
    /// transport has wired to the campaign's input token.
    ReceivePayload {
        /// Transport-assigned message identifier (32 bytes)
        message_id: Binary,
        /// Transport-reported logical origin (the sending token adapter)
        from: String,
        /// Compose payload bytes
        payload: Binary,
    },

    /// Deliver a bridged payload with CW20 campaign funds (called via CW20
    /// send). Implements the CW20 Receiver interface; the token contract is
    /// the immediate caller and the transport endpoint is the CW20 sender.
    Receive(Cw20ReceiveMsg),

    // ========================================================================
    // Campaign Registry
    // ========================================================================
    /// Register a campaign on the destination side
    ///
    /// Authorization: Admin only. Duplicate hashes are rejected; campaigns
    /// are never deleted.
    CreateCampaign {
        /// 32-byte campaign hash (computed upstream by the market registry)
        campaign_hash: Binary,
        /// Campaign owner
        owner: String,
        /// Destination-side input token
        input_token: AssetInfo,
        /// Time after which withdrawal scripts may run
        unlock_timestamp: Timestamp,
        deposit_recipe: Recipe,
        withdrawal_recipe: Recipe,
    },

    /// Hand the campaign to a new owner
    ///
    /// Authorization: campaign owner only
    SetCampaignOwner {
        campaign_hash: Binary,
        owner: String,
    },

    /// Move the campaign's unlock time
    ///
    /// Authorization: campaign owner only
    SetUnlockTimestamp {
        campaign_hash: Binary,
        unlock_timestamp: Timestamp,
    },

    /// Replace both recipes. Fails once the deposit script has run.
    ///
    /// Authorization: campaign owner only
    SetRecipes {
        campaign_hash: Binary,
        deposit_recipe: Recipe,
        withdrawal_recipe: Recipe,
    },

    // ========================================================================
    // Script Execution Gateway
    // ========================================================================
    /// Run the campaign's deposit script on one escrow account (one-shot)
    ///
    /// Authorization: escrow account owner only
    ExecuteDepositRecipe {
        /// 32-byte deterministic account id
        account_id: Binary,
    },

    /// Run the deposit script on a batch of accounts, silently skipping ids
    /// that are missing, already executed, or belong to another campaign
    ///
    /// Authorization: campaign owner only
    ExecuteDepositRecipes {
        campaign_hash: Binary,
        account_ids: Vec<Binary>,
    },

    /// Run the campaign's withdrawal script on one escrow account, only
    /// after the unlock time
    ///
    /// Authorization: escrow account owner only
    ExecuteWithdrawalRecipe {
        /// 32-byte deterministic account id
        account_id: Binary,
    },

    // ========================================================================
    // Configuration
    // ========================================================================
    /// Replace the scripted-execution engine
    ///
    /// Authorization: Admin only
    SetScriptEngine { address: String },

    /// Replace the transport endpoint
    ///
    /// Authorization: Admin only
    SetTransportEndpoint { address: String },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Pause the executor (stops deliveries and script execution)
    ///
    /// Authorization: Admin only
    Pause {},

    /// Resume the executor
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
    /// Deliver a bridged payload; the sent CW20 tokens are the bridged funds
    ReceivePayload {
        /// Transport-assigned message identifier (32 bytes)
        message_id: Binary,
        /// Transport-reported logical origin (the sending token adapter)
        from: String,
        /// Compose payload bytes
        payload: Binary,
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

    /// Returns executor statistics
    #[returns(StatsResponse)]
    Stats {},

    /// Returns one campaign's configuration
    #[returns(CampaignResponse)]
    Campaign { campaign_hash: Binary },

    /// Returns registered campaigns with cursor-based pagination
    #[returns(CampaignsResponse)]
    Campaigns {
        /// Cursor: the campaign hash of the last item from the previous page
        start_after: Option<Binary>,
        /// Max entries to return (default 10, max 30)
        limit: Option<u32>,
    },

    /// Returns one escrow account
    #[returns(EscrowAccountResponse)]
    EscrowAccount { account_id: Binary },

    /// Returns escrow accounts with cursor-based pagination
    #[returns(EscrowAccountsResponse)]
    EscrowAccounts {
        /// Cursor: the account id of the last item from the previous page
        start_after: Option<Binary>,
        /// Max entries to return (default 10, max 30)
        limit: Option<u32>,
    },

    /// Computes a deterministic account id without storing anything
    #[returns(DerivedAccountResponse)]
    DeriveAccountId {
        campaign_hash: Binary,
        owner: String,
        amount: Uint128,
        unlock_timestamp: Timestamp,
    },

    /// Returns pending admin proposal details
    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub transport_endpoint: Addr,
    pub script_engine: Addr,
    pub address_prefix: String,
}

#[cw_serde]
pub struct StatsResponse {
    pub messages_processed: u64,
    pub accounts_created: u64,
    pub scripts_executed: u64,
}

#[cw_serde]
pub struct CampaignResponse {
    pub campaign_hash: Binary,
    pub owner: Addr,
    pub input_token: AssetInfo,
    pub unlock_timestamp: Timestamp,
    pub deposit_recipe: Recipe,
    pub withdrawal_recipe: Recipe,
    pub recipes_locked: bool,
}

#[cw_serde]
pub struct CampaignsResponse {
    pub campaigns: Vec<CampaignResponse>,
}

#[cw_serde]
pub struct EscrowAccountResponse {
    pub account_id: Binary,
    pub campaign_hash: Binary,
    pub owner: Addr,
    pub amount: Uint128,
    pub unlock_timestamp: Timestamp,
    pub deposit_script_executed: bool,
    pub funds_disbursed: bool,
}

#[cw_serde]
pub struct EscrowAccountsResponse {
    pub accounts: Vec<EscrowAccountResponse>,
}

#[cw_serde]
pub struct DerivedAccountResponse {
    pub account_id: Binary,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_admin: Addr,
    pub execute_after: Timestamp,
}
