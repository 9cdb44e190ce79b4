//! Execute handlers for the deposit locker, organized by category:
//! - `deposit` - escrow-account deposit and withdraw entry points
//! - `bridge` - orchestrator, green light, and the transport reply
//! - `admin` - pause, admin transfer, configuration setters, recovery

mod admin;
mod bridge;
mod deposit;

pub use admin::*;
pub use bridge::*;
pub use deposit::*;

use cosmwasm_std::Binary;

use crate::error::ContractError;

/// Parse a 32-byte campaign hash from Binary input.
pub(crate) fn parse_campaign_hash(campaign_hash: &Binary) -> Result<[u8; 32], ContractError> {
    campaign_hash
        .to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength {
            got: campaign_hash.len(),
        })
}
