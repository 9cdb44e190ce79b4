//! CCDM Deposit Executor - Destination-Chain Payload Handler and Campaign Registry
//!
//! The token transport delivers bridged campaign funds to this contract along
//! with a compose payload describing which depositors the funds belong to.
//! The contract authenticates the delivery, decodes the payload, and
//! deterministically materializes one escrow account per depositor. Campaign
//! owners later trigger deposit scripts on those accounts; account owners run
//! withdrawal scripts once the campaign unlocks.
//!
//! # Inbound Flow
//! 1. The transport endpoint invokes `ReceivePayload` (native input token) or
//!    the CW20 receiver hook (CW20 input token) with the bridged funds
//! 2. The immediate caller and the transport-reported origin adapter are both
//!    authenticated before anything is decoded
//! 3. Each payload entry derives a deterministic escrow account id; an id
//!    that already exists is skipped, so re-delivery of an identical entry is
//!    inert rather than double-crediting
//!
//! # Script Execution
//! - Deposit recipes run at most once per account, triggered by the account
//!   owner (or in batch by the campaign owner) and delegated to the external
//!   scripting engine
//! - Withdrawal recipes are gated on the campaign unlock time
//!
//! # Security
//! - Two-layer caller/origin authentication on the inbound path
//! - Deterministic account derivation as the idempotence boundary
//! - Two-step admin transfer with timelock
//! - Emergency pause plus paused-only asset recovery

pub mod contract;
pub mod derive;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::derive::{derive_account_id, keccak256};
pub use crate::error::ContractError;
