//! Market registry collaborator interface.
//!
//! The registry that creates and prices campaigns lives outside this
//! workspace. The locker only ever asks it one question: which token
//! denominates deposits for a campaign.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, QuerierWrapper, StdResult};

use crate::asset::AssetInfo;

/// Queries served by the market registry
#[cw_serde]
pub enum RegistryQueryMsg {
    /// Input token for a campaign
    InputToken { campaign_hash: Binary },
}

#[cw_serde]
pub struct InputTokenResponse {
    pub input_token: AssetInfo,
}

/// Look up the input token for `campaign_hash` on the registry contract
pub fn query_input_token(
    querier: &QuerierWrapper,
    registry: &Addr,
    campaign_hash: &[u8; 32],
) -> StdResult<AssetInfo> {
    let res: InputTokenResponse = querier.query_wasm_smart(
        registry,
        &RegistryQueryMsg::InputToken {
            campaign_hash: Binary::from(campaign_hash.to_vec()),
        },
    )?;
    Ok(res.input_token)
}
