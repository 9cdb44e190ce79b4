//! CCDM Deposit Locker - Source-Chain Escrow Ledger and Bridge Orchestrator
//!
//! Escrow accounts deposit campaign funds into this contract, which keeps a
//! per-campaign, per-escrow ledger of the custodied amounts. Once a campaign's
//! authority flips the green light, anyone may bridge a batch of depositors:
//! the contract encodes the batch into a compose payload, quotes the external
//! token transport, and dispatches the aggregated funds plus the payload to
//! the destination-side deposit executor.
//!
//! # Deposit Flow
//! 1. An escrow account deposits its funds, reporting its own campaign hash
//! 2. The ledger keys the amount by the escrow account's address itself
//! 3. The escrow account may withdraw at any time before it is bridged
//!
//! # Bridge Flow
//! 1. Green-lighter sets the campaign's green light
//! 2. A caller submits up to the batch cap of escrow addresses
//! 3. Zero and over-ceiling ledger entries are skipped, the rest are cleared
//!    and packed into the payload in submission order
//! 4. The transport is quoted, paid in native currency, and invoked; the
//!    send receipt must confirm the full total arrived remotely or the whole
//!    call (ledger clearing included) rolls back
//!
//! # Security
//! - Explicit reentrancy flag around ledger mutations
//! - Green-light gate restricted to the registered authority
//! - Batch cap bounding destination execution gas
//! - Two-step admin transfer with timelock
//! - Emergency pause plus paused-only asset recovery

pub mod contract;
pub mod error;
mod execute;
pub mod gas;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
