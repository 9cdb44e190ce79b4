//! Error types for the deposit executor.

use common::PayloadError;
use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payload(#[from] PayloadError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("Unauthorized: caller is not the transport endpoint")]
    UnauthorizedTransport,

    #[error("Unauthorized: only the campaign owner can perform this action")]
    UnauthorizedCampaignOwner,

    #[error("Unauthorized: only the escrow account owner can perform this action")]
    UnauthorizedAccountOwner,

    // ========================================================================
    // Admin Errors
    // ========================================================================

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    #[error("Executor is paused")]
    ExecutorPaused,

    #[error("Asset recovery only available when the executor is paused")]
    RecoveryNotAvailable,

    // ========================================================================
    // Inbound Message Errors
    // ========================================================================

    #[error("Truncated message: {got} bytes holds no depositor entry")]
    TruncatedMessage { got: usize },

    #[error("Token adapter mismatch: expected {expected}, message origin is {got}")]
    TokenAdapterMismatch { expected: String, got: String },

    #[error("Delivered amount mismatch: payload total {expected}, delivered {got}")]
    AmountMismatch { expected: Uint128, got: Uint128 },

    #[error("Deposit token mismatch: campaign expects {expected}, got {got}")]
    DepositTokenMismatch { expected: String, got: String },

    // ========================================================================
    // Campaign Errors
    // ========================================================================

    #[error("Campaign not found: {campaign_hash}")]
    CampaignNotFound { campaign_hash: String },

    #[error("Campaign already exists: {campaign_hash}")]
    CampaignAlreadyExists { campaign_hash: String },

    #[error("Recipes are locked: the deposit script has already run for this campaign")]
    RecipesLocked,

    // ========================================================================
    // Script Execution Errors
    // ========================================================================

    #[error("Escrow account not found: {account_id}")]
    AccountNotFound { account_id: String },

    #[error("Deposit script already executed for this account")]
    DepositScriptAlreadyExecuted,

    #[error("Account still locked: withdrawal scripts may run after {unlock_at}")]
    AccountStillLocked { unlock_at: u64 },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },
}
