//! Deposit Executor - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_cancel_admin_proposal, execute_create_campaign,
    execute_deposit_recipe, execute_deposit_recipes, execute_pause, execute_propose_admin,
    execute_receive, execute_receive_payload, execute_recover_asset, execute_set_campaign_owner,
    execute_set_recipes, execute_set_script_engine, execute_set_transport_endpoint,
    execute_set_unlock_timestamp, execute_unpause, execute_withdrawal_recipe,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_campaign, query_campaigns, query_config, query_derive_account_id, query_escrow_account,
    query_escrow_accounts, query_pending_admin, query_stats,
};
use crate::state::{Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, STATS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.address_prefix.is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "address prefix must not be empty".to_string(),
        });
    }

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        paused: false,
        transport_endpoint: deps.api.addr_validate(&msg.transport_endpoint)?,
        script_engine: deps.api.addr_validate(&msg.script_engine)?,
        address_prefix: msg.address_prefix,
    };
    CONFIG.save(deps.storage, &config)?;

    STATS.save(
        deps.storage,
        &Stats {
            messages_processed: 0,
            accounts_created: 0,
            scripts_executed: 0,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("transport_endpoint", config.transport_endpoint)
        .add_attribute("script_engine", config.script_engine)
        .add_attribute("address_prefix", config.address_prefix))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Inbound payload delivery
        ExecuteMsg::ReceivePayload {
            message_id,
            from,
            payload,
        } => execute_receive_payload(deps, env, info, message_id, from, payload),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Campaign registry
        ExecuteMsg::CreateCampaign {
            campaign_hash,
            owner,
            input_token,
            unlock_timestamp,
            deposit_recipe,
            withdrawal_recipe,
        } => execute_create_campaign(
            deps,
            info,
            campaign_hash,
            owner,
            input_token,
            unlock_timestamp,
            deposit_recipe,
            withdrawal_recipe,
        ),
        ExecuteMsg::SetCampaignOwner {
            campaign_hash,
            owner,
        } => execute_set_campaign_owner(deps, info, campaign_hash, owner),
        ExecuteMsg::SetUnlockTimestamp {
            campaign_hash,
            unlock_timestamp,
        } => execute_set_unlock_timestamp(deps, info, campaign_hash, unlock_timestamp),
        ExecuteMsg::SetRecipes {
            campaign_hash,
            deposit_recipe,
            withdrawal_recipe,
        } => execute_set_recipes(deps, info, campaign_hash, deposit_recipe, withdrawal_recipe),

        // Script execution gateway
        ExecuteMsg::ExecuteDepositRecipe { account_id } => {
            execute_deposit_recipe(deps, env, info, account_id)
        }
        ExecuteMsg::ExecuteDepositRecipes {
            campaign_hash,
            account_ids,
        } => execute_deposit_recipes(deps, env, info, campaign_hash, account_ids),
        ExecuteMsg::ExecuteWithdrawalRecipe { account_id } => {
            execute_withdrawal_recipe(deps, env, info, account_id)
        }

        // Configuration
        ExecuteMsg::SetScriptEngine { address } => execute_set_script_engine(deps, info, address),
        ExecuteMsg::SetTransportEndpoint { address } => {
            execute_set_transport_endpoint(deps, info, address)
        }

        // Admin operations
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, env, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, env, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
        ExecuteMsg::RecoverAsset {
            asset,
            amount,
            recipient,
        } => execute_recover_asset(deps, info, asset, amount, recipient),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::Campaign { campaign_hash } => to_json_binary(&query_campaign(deps, campaign_hash)?),
        QueryMsg::Campaigns { start_after, limit } => {
            to_json_binary(&query_campaigns(deps, start_after, limit)?)
        }
        QueryMsg::EscrowAccount { account_id } => {
            to_json_binary(&query_escrow_account(deps, account_id)?)
        }
        QueryMsg::EscrowAccounts { start_after, limit } => {
            to_json_binary(&query_escrow_accounts(deps, start_after, limit)?)
        }
        QueryMsg::DeriveAccountId {
            campaign_hash,
            owner,
            amount,
            unlock_timestamp,
        } => to_json_binary(&query_derive_account_id(
            deps,
            campaign_hash,
            owner,
            amount,
            unlock_timestamp,
        )?),
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
