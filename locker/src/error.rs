//! Error types for the deposit locker.

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

    #[error("Unauthorized: only the green-light authority can perform this action")]
    UnauthorizedGreenLighter,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    // ========================================================================
    // Admin Errors
    // ========================================================================

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    #[error("Locker is paused")]
    LockerPaused,

    #[error("Asset recovery only available when the locker is paused")]
    RecoveryNotAvailable,

    // ========================================================================
    // Ledger Errors
    // ========================================================================

    #[error("Reentrant call blocked")]
    ReentrancyGuard,

    #[error("Escrow account already holds a deposit for this campaign")]
    AlreadyDeposited,

    #[error("Nothing to withdraw")]
    NothingToWithdraw,

    #[error("No funds sent")]
    NoFundsSent,

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    #[error("Deposit token mismatch: campaign expects {expected}, got {got}")]
    DepositTokenMismatch { expected: String, got: String },

    // ========================================================================
    // Bridge Errors
    // ========================================================================

    #[error("Green light not given for this campaign")]
    GreenLightNotGiven,

    #[error("Batch cap exceeded: cap is {cap}, got {got} depositors")]
    BatchCapExceeded { cap: u32, got: usize },

    #[error("Must include at least one depositor")]
    MustIncludeAtLeastOneDepositor,

    #[error("Insufficient fee: expected {expected}, got {got}")]
    InsufficientFee { expected: Uint128, got: Uint128 },

    #[error("Remote amount shortfall: sent {expected}, remote received {received}")]
    RemoteAmountShortfall {
        expected: Uint128,
        received: Uint128,
    },

    #[error("No pending bridge context for transport reply")]
    MissingBridgeContext,

    #[error("Invalid transport receipt: {reason}")]
    InvalidReceipt { reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },
}
