//! Script execution gateway.
//!
//! Scripts never run inline with payload delivery; they are triggered here
//! and delegated to the external scripting engine. The deposit recipe runs at
//! most once per account and hands the account's custodied funds to the
//! engine on that single run. The withdrawal recipe is gated on the unlock
//! time and carries funds only when the deposit script never ran.

use common::engine::{EngineExecuteMsg, Recipe};
use common::AssetInfo;
use cosmwasm_std::{
    to_json_binary, Binary, Coin, CosmosMsg, DepsMut, Env, MessageInfo, Response, Storage, Uint128,
    WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::derive::bytes32_to_hex;
use crate::error::ContractError;
use crate::execute::parse_bytes32;
use crate::state::{Campaign, EscrowAccount, CAMPAIGNS, CONFIG, ESCROWS, STATS};

// ============================================================================
// Deposit Recipe — Single
// ============================================================================

/// Run the deposit script on one escrow account. Account owner only; one-shot.
pub fn execute_deposit_recipe(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    account_id: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::ExecutorPaused);
    }

    let id = parse_bytes32(&account_id)?;
    let mut account = load_account(deps.storage, &id)?;

    if info.sender != account.owner {
        return Err(ContractError::UnauthorizedAccountOwner);
    }
    if account.deposit_script_executed {
        return Err(ContractError::DepositScriptAlreadyExecuted);
    }

    let campaign_key = parse_bytes32(&account.campaign_hash)?;
    let mut campaign = load_campaign(deps.storage, &campaign_key)?;

    account.deposit_script_executed = true;
    account.funds_disbursed = true;
    ESCROWS.save(deps.storage, &id, &account)?;

    // First use freezes the recipes
    if !campaign.recipes_locked {
        campaign.recipes_locked = true;
        CAMPAIGNS.save(deps.storage, &campaign_key, &campaign)?;
    }

    let messages = engine_messages(
        &config.script_engine,
        &id,
        &account,
        &campaign.input_token,
        &campaign.deposit_recipe,
        Some(account.amount),
    )?;

    bump_scripts_executed(deps.storage, 1)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "execute_deposit_recipe")
        .add_attribute("account_id", bytes32_to_hex(&id))
        .add_attribute("owner", account.owner.to_string())
        .add_attribute("amount", account.amount.to_string()))
}

// ============================================================================
// Deposit Recipe — Batch
// ============================================================================

/// Run the deposit script on a batch of accounts. Campaign owner only.
///
/// Ids that are missing, already executed, or belong to a different campaign
/// are silently skipped — defensive filtering against caller error, never a
/// bulk failure.
pub fn execute_deposit_recipes(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    campaign_hash: Binary,
    account_ids: Vec<Binary>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::ExecutorPaused);
    }

    let hash = parse_bytes32(&campaign_hash)?;
    let mut campaign = load_campaign(deps.storage, &hash)?;
    if info.sender != campaign.owner {
        return Err(ContractError::UnauthorizedCampaignOwner);
    }

    let mut messages: Vec<CosmosMsg> = vec![];
    let mut executed: Vec<String> = vec![];

    for account_id in &account_ids {
        let Ok(id) = parse_bytes32(account_id) else {
            continue;
        };
        let Some(mut account) = ESCROWS.may_load(deps.storage, &id)? else {
            continue;
        };
        if account.campaign_hash.as_slice() != hash.as_slice() {
            continue;
        }
        if account.deposit_script_executed {
            continue;
        }

        account.deposit_script_executed = true;
        account.funds_disbursed = true;
        ESCROWS.save(deps.storage, &id, &account)?;

        messages.extend(engine_messages(
            &config.script_engine,
            &id,
            &account,
            &campaign.input_token,
            &campaign.deposit_recipe,
            Some(account.amount),
        )?);
        executed.push(bytes32_to_hex(&id));
    }

    if !executed.is_empty() && !campaign.recipes_locked {
        campaign.recipes_locked = true;
        CAMPAIGNS.save(deps.storage, &hash, &campaign)?;
    }

    bump_scripts_executed(deps.storage, executed.len() as u64)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "execute_deposit_recipes")
        .add_attribute("campaign_hash", bytes32_to_hex(&hash))
        .add_attribute("requested", account_ids.len().to_string())
        .add_attribute("executed", executed.len().to_string())
        .add_attribute("accounts", executed.join(",")))
}

// ============================================================================
// Withdrawal Recipe
// ============================================================================

/// Run the withdrawal script on one escrow account. Account owner only, after
/// the unlock time. No one-shot restriction applies at this layer.
pub fn execute_withdrawal_recipe(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    account_id: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::ExecutorPaused);
    }

    let id = parse_bytes32(&account_id)?;
    let mut account = load_account(deps.storage, &id)?;

    if info.sender != account.owner {
        return Err(ContractError::UnauthorizedAccountOwner);
    }
    if env.block.time < account.unlock_timestamp {
        return Err(ContractError::AccountStillLocked {
            unlock_at: account.unlock_timestamp.seconds(),
        });
    }

    let campaign_key = parse_bytes32(&account.campaign_hash)?;
    let campaign = load_campaign(deps.storage, &campaign_key)?;

    // Funds ride along only if the deposit script never moved them
    let attach = if account.funds_disbursed {
        None
    } else {
        account.funds_disbursed = true;
        ESCROWS.save(deps.storage, &id, &account)?;
        Some(account.amount)
    };

    let messages = engine_messages(
        &config.script_engine,
        &id,
        &account,
        &campaign.input_token,
        &campaign.withdrawal_recipe,
        attach,
    )?;

    bump_scripts_executed(deps.storage, 1)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "execute_withdrawal_recipe")
        .add_attribute("account_id", bytes32_to_hex(&id))
        .add_attribute("owner", account.owner.to_string()))
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn load_account(
    storage: &dyn Storage,
    id: &[u8; 32],
) -> Result<EscrowAccount, ContractError> {
    ESCROWS
        .may_load(storage, id)?
        .ok_or_else(|| ContractError::AccountNotFound {
            account_id: bytes32_to_hex(id),
        })
}

fn load_campaign(storage: &dyn Storage, hash: &[u8; 32]) -> Result<Campaign, ContractError> {
    CAMPAIGNS
        .may_load(storage, hash)?
        .ok_or_else(|| ContractError::CampaignNotFound {
            campaign_hash: bytes32_to_hex(hash),
        })
}

fn bump_scripts_executed(storage: &mut dyn Storage, count: u64) -> Result<(), ContractError> {
    let mut stats = STATS.load(storage)?;
    stats.scripts_executed += count;
    STATS.save(storage, &stats)?;
    Ok(())
}

/// Build the engine delegation, optionally moving the account's funds along.
///
/// Native funds ride in the execute call; CW20 funds move with a separate
/// transfer ahead of it.
fn engine_messages(
    engine: &cosmwasm_std::Addr,
    account_id: &[u8; 32],
    account: &EscrowAccount,
    input_token: &AssetInfo,
    recipe: &Recipe,
    attach: Option<Uint128>,
) -> Result<Vec<CosmosMsg>, ContractError> {
    let mut messages: Vec<CosmosMsg> = vec![];
    let mut funds: Vec<Coin> = vec![];

    if let Some(amount) = attach {
        if !amount.is_zero() {
            match input_token {
                AssetInfo::Native { denom } => funds.push(Coin {
                    denom: denom.clone(),
                    amount,
                }),
                AssetInfo::Cw20 { contract_addr } => {
                    messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
                        contract_addr: contract_addr.to_string(),
                        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                            recipient: engine.to_string(),
                            amount,
                        })?,
                        funds: vec![],
                    }));
                }
            }
        }
    }

    messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: engine.to_string(),
        msg: to_json_binary(&EngineExecuteMsg::ExecuteScript {
            account_id: Binary::from(account_id.to_vec()),
            owner: account.owner.to_string(),
            commands: recipe.commands.clone(),
            state: recipe.state.clone(),
        })?,
        funds,
    }));

    Ok(messages)
}
