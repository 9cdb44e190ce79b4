//! Query handlers for the deposit executor.

use common::address::decode_bech32_address;
use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult, Timestamp, Uint128};
use cw_storage_plus::Bound;

use crate::derive::derive_account_id;
use crate::msg::{
    CampaignResponse, CampaignsResponse, ConfigResponse, DerivedAccountResponse,
    EscrowAccountResponse, EscrowAccountsResponse, PendingAdminResponse, StatsResponse,
};
use crate::state::{Campaign, EscrowAccount, CAMPAIGNS, CONFIG, ESCROWS, PENDING_ADMIN, STATS};

/// Default page size for enumeration queries
const DEFAULT_LIMIT: u32 = 10;

/// Maximum page size for enumeration queries
const MAX_LIMIT: u32 = 30;

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        transport_endpoint: config.transport_endpoint,
        script_engine: config.script_engine,
        address_prefix: config.address_prefix,
    })
}

/// Query executor statistics.
pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        messages_processed: stats.messages_processed,
        accounts_created: stats.accounts_created,
        scripts_executed: stats.scripts_executed,
    })
}

/// Query one campaign's configuration.
pub fn query_campaign(deps: Deps, campaign_hash: Binary) -> StdResult<CampaignResponse> {
    let campaign = CAMPAIGNS
        .may_load(deps.storage, campaign_hash.as_slice())?
        .ok_or_else(|| StdError::not_found("campaign"))?;
    Ok(campaign_response(campaign_hash, campaign))
}

/// Query registered campaigns with cursor-based pagination.
pub fn query_campaigns(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<CampaignsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_key = start_after.as_ref().map(|b| b.to_vec());
    let start = start_key.as_deref().map(Bound::exclusive);

    let campaigns = CAMPAIGNS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (key, campaign) = item?;
            Ok(campaign_response(Binary::from(key), campaign))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(CampaignsResponse { campaigns })
}

/// Query one escrow account.
pub fn query_escrow_account(deps: Deps, account_id: Binary) -> StdResult<EscrowAccountResponse> {
    let account = ESCROWS
        .may_load(deps.storage, account_id.as_slice())?
        .ok_or_else(|| StdError::not_found("escrow account"))?;
    Ok(escrow_response(account_id, account))
}

/// Query escrow accounts with cursor-based pagination.
pub fn query_escrow_accounts(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<EscrowAccountsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_key = start_after.as_ref().map(|b| b.to_vec());
    let start = start_key.as_deref().map(Bound::exclusive);

    let accounts = ESCROWS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (key, account) = item?;
            Ok(escrow_response(Binary::from(key), account))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(EscrowAccountsResponse { accounts })
}

/// Compute a deterministic account id without storing anything.
pub fn query_derive_account_id(
    _deps: Deps,
    campaign_hash: Binary,
    owner: String,
    amount: Uint128,
    unlock_timestamp: Timestamp,
) -> StdResult<DerivedAccountResponse> {
    let hash: [u8; 32] = campaign_hash.to_vec().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "invalid hash length: expected 32 bytes, got {}",
            campaign_hash.len()
        ))
    })?;

    let owner_bytes = decode_bech32_address(&owner)?;

    let account_id = derive_account_id(
        &hash,
        &owner_bytes,
        amount.u128(),
        unlock_timestamp.seconds(),
    );
    Ok(DerivedAccountResponse {
        account_id: Binary::from(account_id.to_vec()),
    })
}

/// Query pending admin proposal details.
pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_admin: p.new_address,
        execute_after: p.execute_after,
    }))
}

fn campaign_response(campaign_hash: Binary, campaign: Campaign) -> CampaignResponse {
    CampaignResponse {
        campaign_hash,
        owner: campaign.owner,
        input_token: campaign.input_token,
        unlock_timestamp: campaign.unlock_timestamp,
        deposit_recipe: campaign.deposit_recipe,
        withdrawal_recipe: campaign.withdrawal_recipe,
        recipes_locked: campaign.recipes_locked,
    }
}

fn escrow_response(account_id: Binary, account: EscrowAccount) -> EscrowAccountResponse {
    EscrowAccountResponse {
        account_id,
        campaign_hash: account.campaign_hash,
        owner: account.owner,
        amount: account.amount,
        unlock_timestamp: account.unlock_timestamp,
        deposit_script_executed: account.deposit_script_executed,
        funds_disbursed: account.funds_disbursed,
    }
}
