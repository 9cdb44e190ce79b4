//! Escrow-account deposit and withdraw handlers.
//!
//! The calling escrow account's own address is the ledger key — never a
//! caller-supplied depositor argument — so one escrow account cannot credit
//! funds to another depositor's slot. Both handlers hold the reentrancy flag
//! for the duration of the call and withdraw clears the slot before the
//! outbound transfer is composed.

use common::registry::query_input_token;
use common::AssetInfo;
use cosmwasm_std::{from_json, Addr, Binary, DepsMut, Env, MessageInfo, Response, Storage, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::error::ContractError;
use crate::execute::parse_campaign_hash;
use crate::msg::ReceiveMsg;
use crate::state::{CONFIG, LEDGER, REENTRANCY, STATS};

/// Take the mutual-exclusion flag, failing if it is already held.
pub(crate) fn acquire_guard(storage: &mut dyn Storage) -> Result<(), ContractError> {
    if REENTRANCY.may_load(storage)?.unwrap_or(false) {
        return Err(ContractError::ReentrancyGuard);
    }
    REENTRANCY.save(storage, &true)?;
    Ok(())
}

/// Release the mutual-exclusion flag.
pub(crate) fn release_guard(storage: &mut dyn Storage) -> Result<(), ContractError> {
    REENTRANCY.save(storage, &false)?;
    Ok(())
}

// ============================================================================
// Deposit — Native
// ============================================================================

/// Escrow account deposits native campaign funds.
pub fn execute_deposit_native(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    campaign_hash: Binary,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::LockerPaused);
    }

    let hash = parse_campaign_hash(&campaign_hash)?;

    // The campaign's input token must be the native denom attached
    let input_token = query_input_token(&deps.querier, &config.market_registry, &hash)?;
    let expected_denom = match &input_token {
        AssetInfo::Native { denom } => denom.clone(),
        AssetInfo::Cw20 { contract_addr } => {
            return Err(ContractError::DepositTokenMismatch {
                expected: contract_addr.to_string(),
                got: "native funds".to_string(),
            })
        }
    };

    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }
    if info.funds.len() > 1 {
        return Err(ContractError::InvalidFunds {
            reason: "only one token type allowed per deposit".to_string(),
        });
    }
    let coin = &info.funds[0];
    if coin.denom != expected_denom {
        return Err(ContractError::DepositTokenMismatch {
            expected: expected_denom,
            got: coin.denom.clone(),
        });
    }
    if coin.amount.is_zero() {
        return Err(ContractError::InvalidFunds {
            reason: "deposit amount must be greater than zero".to_string(),
        });
    }

    let response = record_deposit(deps, &hash, &info.sender, coin.amount)?;
    Ok(response)
}

// ============================================================================
// Deposit — CW20
// ============================================================================

/// Escrow account deposits CW20 campaign funds via the CW20 receiver hook.
pub fn execute_receive(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::LockerPaused);
    }

    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;
    let ReceiveMsg::Deposit { campaign_hash } = receive_msg;
    let hash = parse_campaign_hash(&campaign_hash)?;

    // The immediate caller is the token contract; it must be the campaign's
    // input token. The escrow account is the logical CW20 sender.
    let input_token = query_input_token(&deps.querier, &config.market_registry, &hash)?;
    match &input_token {
        AssetInfo::Cw20 { contract_addr } if *contract_addr == info.sender => {}
        other => {
            return Err(ContractError::DepositTokenMismatch {
                expected: other.id(),
                got: info.sender.to_string(),
            })
        }
    }

    if cw20_msg.amount.is_zero() {
        return Err(ContractError::InvalidFunds {
            reason: "deposit amount must be greater than zero".to_string(),
        });
    }

    let escrow = deps.api.addr_validate(&cw20_msg.sender)?;
    let response = record_deposit(deps, &hash, &escrow, cw20_msg.amount)?;
    Ok(response)
}

/// Record one deposit slot and release the guard.
fn record_deposit(
    deps: DepsMut,
    hash: &[u8; 32],
    escrow: &Addr,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let existing = LEDGER
        .may_load(deps.storage, (hash.as_slice(), escrow))?
        .unwrap_or(Uint128::zero());
    if !existing.is_zero() {
        return Err(ContractError::AlreadyDeposited);
    }
    LEDGER.save(deps.storage, (hash.as_slice(), escrow), &amount)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_deposits += 1;
    STATS.save(deps.storage, &stats)?;

    release_guard(deps.storage)?;

    Ok(Response::new()
        .add_attribute("method", "deposit")
        .add_attribute("campaign_hash", hex::encode(hash))
        .add_attribute("escrow", escrow.to_string())
        .add_attribute("amount", amount.to_string()))
}

// ============================================================================
// Withdraw
// ============================================================================

/// Escrow account withdraws its escrowed amount. The slot is cleared before
/// the outbound transfer is composed (checks-effects-interactions).
pub fn execute_withdraw(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    campaign_hash: Binary,
) -> Result<Response, ContractError> {
    acquire_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::LockerPaused);
    }

    let hash = parse_campaign_hash(&campaign_hash)?;

    let amount = LEDGER
        .may_load(deps.storage, (hash.as_slice(), &info.sender))?
        .unwrap_or(Uint128::zero());
    if amount.is_zero() {
        return Err(ContractError::NothingToWithdraw);
    }

    // Effects before interactions
    LEDGER.remove(deps.storage, (hash.as_slice(), &info.sender));

    let input_token = query_input_token(&deps.querier, &config.market_registry, &hash)?;
    let transfer = input_token.transfer_msg(&info.sender, amount)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_withdrawals += 1;
    STATS.save(deps.storage, &stats)?;

    release_guard(deps.storage)?;

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("method", "withdraw")
        .add_attribute("campaign_hash", hex::encode(hash))
        .add_attribute("escrow", info.sender.to_string())
        .add_attribute("amount", amount.to_string()))
}
