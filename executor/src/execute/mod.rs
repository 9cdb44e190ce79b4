//! Execute handlers for the deposit executor, organized by category:
//! - `receive` - transport-authenticated payload delivery
//! - `campaign` - campaign registry mutation
//! - `scripts` - deposit/withdrawal script execution gateway
//! - `admin` - pause, admin transfer, wiring, recovery

mod admin;
mod campaign;
mod receive;
mod scripts;

pub use admin::*;
pub use campaign::*;
pub use receive::*;
pub use scripts::*;

use cosmwasm_std::Binary;

use crate::error::ContractError;

/// Parse a 32-byte hash or account id from Binary input.
pub(crate) fn parse_bytes32(bin: &Binary) -> Result<[u8; 32], ContractError> {
    bin.to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got: bin.len() })
}
