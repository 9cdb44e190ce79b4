//! Deposit Locker - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_bridge, execute_cancel_admin_proposal, execute_deposit_native,
    execute_pause, execute_propose_admin, execute_receive, execute_recover_asset,
    execute_set_batch_cap, execute_set_green_light, execute_set_green_lighter,
    execute_set_market_registry, execute_set_transport, execute_unpause, execute_withdraw,
    handle_bridge_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_current_nonce, query_estimate_executor_gas, query_green_light,
    query_ledger_amount, query_pending_admin, query_stats,
};
use crate::state::{
    Config, Stats, BRIDGE_REPLY_ID, CONFIG, CONTRACT_NAME, CONTRACT_VERSION,
    DEFAULT_MAX_DEPOSITORS_PER_BRIDGE, OUTGOING_NONCE, REENTRANCY, STATS,
};

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

    if msg.executor.len() != 32 {
        return Err(ContractError::InvalidHashLength {
            got: msg.executor.len(),
        });
    }

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        paused: false,
        green_lighter: deps.api.addr_validate(&msg.green_lighter)?,
        market_registry: deps.api.addr_validate(&msg.market_registry)?,
        transport_endpoint: deps.api.addr_validate(&msg.transport_endpoint)?,
        dest_endpoint_id: msg.dest_endpoint_id,
        executor: msg.executor,
        fee_denom: msg.fee_denom,
        max_depositors_per_bridge: msg
            .max_depositors_per_bridge
            .unwrap_or(DEFAULT_MAX_DEPOSITORS_PER_BRIDGE),
    };
    if config.max_depositors_per_bridge == 0 {
        return Err(ContractError::InvalidFunds {
            reason: "batch cap must be at least 1".to_string(),
        });
    }
    CONFIG.save(deps.storage, &config)?;

    STATS.save(
        deps.storage,
        &Stats {
            total_deposits: 0,
            total_withdrawals: 0,
            total_bridges: 0,
            total_amount_bridged: Uint128::zero(),
        },
    )?;
    OUTGOING_NONCE.save(deps.storage, &0u64)?;
    REENTRANCY.save(deps.storage, &false)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("green_lighter", config.green_lighter)
        .add_attribute(
            "max_depositors_per_bridge",
            config.max_depositors_per_bridge.to_string(),
        ))
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
        // Escrow account entry points
        ExecuteMsg::DepositNative { campaign_hash } => {
            execute_deposit_native(deps, env, info, campaign_hash)
        }
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),
        ExecuteMsg::Withdraw { campaign_hash } => execute_withdraw(deps, env, info, campaign_hash),

        // Bridging
        ExecuteMsg::Bridge {
            campaign_hash,
            executor_gas_limit,
            depositors,
        } => execute_bridge(deps, env, info, campaign_hash, executor_gas_limit, depositors),
        ExecuteMsg::SetGreenLight {
            campaign_hash,
            allowed,
        } => execute_set_green_light(deps, info, campaign_hash, allowed),

        // Configuration
        ExecuteMsg::SetGreenLighter { address } => execute_set_green_lighter(deps, info, address),
        ExecuteMsg::SetBatchCap { max_depositors } => {
            execute_set_batch_cap(deps, info, max_depositors)
        }
        ExecuteMsg::SetTransport {
            endpoint,
            dest_endpoint_id,
            executor,
        } => execute_set_transport(deps, info, endpoint, dest_endpoint_id, executor),
        ExecuteMsg::SetMarketRegistry { address } => {
            execute_set_market_registry(deps, info, address)
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
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        BRIDGE_REPLY_ID => handle_bridge_reply(deps, msg),
        id => Err(ContractError::InvalidReceipt {
            reason: format!("unknown reply id {}", id),
        }),
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
        QueryMsg::LedgerAmount {
            campaign_hash,
            escrow,
        } => to_json_binary(&query_ledger_amount(deps, campaign_hash, escrow)?),
        QueryMsg::GreenLight { campaign_hash } => {
            to_json_binary(&query_green_light(deps, campaign_hash)?)
        }
        QueryMsg::CurrentNonce {} => to_json_binary(&query_current_nonce(deps)?),
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
        QueryMsg::EstimateExecutorGas { depositor_count } => {
            to_json_binary(&query_estimate_executor_gas(depositor_count)?)
        }
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
