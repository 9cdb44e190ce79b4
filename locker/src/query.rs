//! Query handlers for the deposit locker.

use cosmwasm_std::{Binary, Deps, StdError, StdResult, Uint128};

use crate::gas::executor_gas_budget;
use crate::msg::{
    ConfigResponse, ExecutorGasResponse, GreenLightResponse, LedgerAmountResponse, NonceResponse,
    PendingAdminResponse, StatsResponse,
};
use crate::state::{CONFIG, GREEN_LIGHT, LEDGER, OUTGOING_NONCE, PENDING_ADMIN, STATS};

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        green_lighter: config.green_lighter,
        market_registry: config.market_registry,
        transport_endpoint: config.transport_endpoint,
        dest_endpoint_id: config.dest_endpoint_id,
        executor: config.executor,
        fee_denom: config.fee_denom,
        max_depositors_per_bridge: config.max_depositors_per_bridge,
    })
}

/// Query locker statistics.
pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_deposits: stats.total_deposits,
        total_withdrawals: stats.total_withdrawals,
        total_bridges: stats.total_bridges,
        total_amount_bridged: stats.total_amount_bridged,
    })
}

/// Query one depositor slot.
pub fn query_ledger_amount(
    deps: Deps,
    campaign_hash: Binary,
    escrow: String,
) -> StdResult<LedgerAmountResponse> {
    let hash = parse_hash(&campaign_hash)?;
    let escrow_addr = deps.api.addr_validate(&escrow)?;
    let amount = LEDGER
        .may_load(deps.storage, (hash.as_slice(), &escrow_addr))?
        .unwrap_or(Uint128::zero());
    Ok(LedgerAmountResponse { amount })
}

/// Query whether a campaign is green-lit.
pub fn query_green_light(deps: Deps, campaign_hash: Binary) -> StdResult<GreenLightResponse> {
    let hash = parse_hash(&campaign_hash)?;
    let allowed = GREEN_LIGHT
        .may_load(deps.storage, &hash)?
        .unwrap_or(false);
    Ok(GreenLightResponse { allowed })
}

/// Query the next outgoing batch nonce.
pub fn query_current_nonce(deps: Deps) -> StdResult<NonceResponse> {
    let nonce = OUTGOING_NONCE.load(deps.storage)?;
    Ok(NonceResponse { nonce })
}

/// Query pending admin proposal details.
pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_admin: p.new_address,
        execute_after: p.execute_after,
    }))
}

/// Query the estimated destination execution gas for a batch size.
pub fn query_estimate_executor_gas(depositor_count: u32) -> StdResult<ExecutorGasResponse> {
    Ok(ExecutorGasResponse {
        gas_limit: executor_gas_budget(depositor_count),
    })
}

fn parse_hash(campaign_hash: &Binary) -> StdResult<[u8; 32]> {
    campaign_hash.to_vec().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "invalid hash length: expected 32 bytes, got {}",
            campaign_hash.len()
        ))
    })
}
