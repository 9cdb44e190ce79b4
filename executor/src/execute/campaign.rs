//! Campaign registry handlers.
//!
//! Campaigns are created once by the registry admin and never deleted. The
//! campaign owner may hand the campaign over, move the unlock time, and swap
//! recipes until the deposit script first runs.

use common::engine::Recipe;
use common::AssetInfo;
use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response, Timestamp};

use crate::derive::bytes32_to_hex;
use crate::error::ContractError;
use crate::execute::parse_bytes32;
use crate::state::{Campaign, CAMPAIGNS, CONFIG};

/// Register a campaign. Admin only; duplicate hashes are rejected.
pub fn execute_create_campaign(
    deps: DepsMut,
    info: MessageInfo,
    campaign_hash: Binary,
    owner: String,
    input_token: AssetInfo,
    unlock_timestamp: Timestamp,
    deposit_recipe: Recipe,
    withdrawal_recipe: Recipe,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let hash = parse_bytes32(&campaign_hash)?;
    if CAMPAIGNS.has(deps.storage, &hash) {
        return Err(ContractError::CampaignAlreadyExists {
            campaign_hash: bytes32_to_hex(&hash),
        });
    }

    let campaign = Campaign {
        owner: deps.api.addr_validate(&owner)?,
        input_token,
        unlock_timestamp,
        deposit_recipe,
        withdrawal_recipe,
        recipes_locked: false,
    };
    CAMPAIGNS.save(deps.storage, &hash, &campaign)?;

    Ok(Response::new()
        .add_attribute("method", "create_campaign")
        .add_attribute("campaign_hash", bytes32_to_hex(&hash))
        .add_attribute("owner", campaign.owner.to_string())
        .add_attribute("input_token", campaign.input_token.id())
        .add_attribute(
            "unlock_timestamp",
            campaign.unlock_timestamp.seconds().to_string(),
        ))
}

/// Hand the campaign to a new owner. Campaign owner only.
pub fn execute_set_campaign_owner(
    deps: DepsMut,
    info: MessageInfo,
    campaign_hash: Binary,
    owner: String,
) -> Result<Response, ContractError> {
    let hash = parse_bytes32(&campaign_hash)?;
    let mut campaign = load_campaign_owned_by(&deps, &hash, &info)?;

    campaign.owner = deps.api.addr_validate(&owner)?;
    CAMPAIGNS.save(deps.storage, &hash, &campaign)?;

    Ok(Response::new()
        .add_attribute("method", "set_campaign_owner")
        .add_attribute("campaign_hash", bytes32_to_hex(&hash))
        .add_attribute("owner", owner))
}

/// Move the campaign's unlock time. Campaign owner only.
///
/// Accounts already materialized keep the unlock frozen at their creation;
/// the new time applies to future batches.
pub fn execute_set_unlock_timestamp(
    deps: DepsMut,
    info: MessageInfo,
    campaign_hash: Binary,
    unlock_timestamp: Timestamp,
) -> Result<Response, ContractError> {
    let hash = parse_bytes32(&campaign_hash)?;
    let mut campaign = load_campaign_owned_by(&deps, &hash, &info)?;

    campaign.unlock_timestamp = unlock_timestamp;
    CAMPAIGNS.save(deps.storage, &hash, &campaign)?;

    Ok(Response::new()
        .add_attribute("method", "set_unlock_timestamp")
        .add_attribute("campaign_hash", bytes32_to_hex(&hash))
        .add_attribute("unlock_timestamp", unlock_timestamp.seconds().to_string()))
}

/// Replace both recipes. Campaign owner only; recipes freeze on first use.
pub fn execute_set_recipes(
    deps: DepsMut,
    info: MessageInfo,
    campaign_hash: Binary,
    deposit_recipe: Recipe,
    withdrawal_recipe: Recipe,
) -> Result<Response, ContractError> {
    let hash = parse_bytes32(&campaign_hash)?;
    let mut campaign = load_campaign_owned_by(&deps, &hash, &info)?;

    if campaign.recipes_locked {
        return Err(ContractError::RecipesLocked);
    }

    campaign.deposit_recipe = deposit_recipe;
    campaign.withdrawal_recipe = withdrawal_recipe;
    CAMPAIGNS.save(deps.storage, &hash, &campaign)?;

    Ok(Response::new()
        .add_attribute("method", "set_recipes")
        .add_attribute("campaign_hash", bytes32_to_hex(&hash)))
}

/// Load a campaign and require the caller to own it.
fn load_campaign_owned_by(
    deps: &DepsMut,
    hash: &[u8; 32],
    info: &MessageInfo,
) -> Result<Campaign, ContractError> {
    let campaign = CAMPAIGNS
        .may_load(deps.storage, hash)?
        .ok_or_else(|| ContractError::CampaignNotFound {
            campaign_hash: bytes32_to_hex(hash),
        })?;
    if info.sender != campaign.owner {
        return Err(ContractError::UnauthorizedCampaignOwner);
    }
    Ok(campaign)
}
