//! Inbound payload delivery handlers.
//!
//! The transport endpoint is the only caller allowed in, and the transport-
//! reported origin must be the adapter wired to the campaign's input token —
//! caller identity and logical sender identity are distinct in cross-chain
//! messaging and both are checked. Decoding happens only after both layers
//! pass. Account materialization is keyed by the deterministic derivation, so
//! a re-delivered entry finds its account already present and is skipped.

use common::address::encode_bech32_address;
use common::payload::{self, HEADER_SIZE};
use common::transport::adapter_of;
use common::AssetInfo;
use cosmwasm_std::{from_json, Addr, Binary, DepsMut, Env, MessageInfo, Response, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::derive::{bytes32_to_hex, derive_account_id};
use crate::error::ContractError;
use crate::msg::ReceiveMsg;
use crate::state::{EscrowAccount, CAMPAIGNS, CONFIG, ESCROWS, STATS};

/// How the bridged funds arrived alongside the payload
enum Delivered {
    /// Native coins attached to the call
    Native { denom: String, amount: Uint128 },
    /// CW20 tokens moved by the hook; the token contract was the caller
    Cw20 { token: Addr, amount: Uint128 },
}

// ============================================================================
// Entry Points
// ============================================================================

/// Payload delivery with native campaign funds.
pub fn execute_receive_payload(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message_id: Binary,
    from: String,
    payload_bytes: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::ExecutorPaused);
    }

    // Layer one: the immediate caller must be the transport endpoint
    if info.sender != config.transport_endpoint {
        return Err(ContractError::UnauthorizedTransport);
    }

    let delivered = match info.funds.as_slice() {
        [coin] => Delivered::Native {
            denom: coin.denom.clone(),
            amount: coin.amount,
        },
        _ => Delivered::Native {
            denom: "(none)".to_string(),
            amount: Uint128::zero(),
        },
    };

    process_payload(deps, env, message_id, from, payload_bytes, delivered)
}

/// Payload delivery with CW20 campaign funds via the CW20 receiver hook.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::ExecutorPaused);
    }

    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;
    let ReceiveMsg::ReceivePayload {
        message_id,
        from,
        payload,
    } = receive_msg;

    // Layer one for the CW20 shape: the logical CW20 sender must be the
    // transport endpoint (the immediate caller is the token contract and is
    // checked against the campaign's input token below)
    let hook_sender = deps.api.addr_validate(&cw20_msg.sender)?;
    if hook_sender != config.transport_endpoint {
        return Err(ContractError::UnauthorizedTransport);
    }

    let delivered = Delivered::Cw20 {
        token: info.sender,
        amount: cw20_msg.amount,
    };

    process_payload(deps, env, message_id, from, payload, delivered)
}

// ============================================================================
// Core
// ============================================================================

fn process_payload(
    deps: DepsMut,
    _env: Env,
    message_id: Binary,
    from: String,
    payload_bytes: Binary,
    delivered: Delivered,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let buf = payload_bytes.as_slice();

    // Shape checks are permanent failures: re-delivery of the same malformed
    // buffer fails identically
    payload::validate(buf)?;
    let entries = payload::entry_count(buf)?;
    if entries == 0 {
        return Err(ContractError::TruncatedMessage { got: buf.len() });
    }
    debug_assert!(buf.len() >= HEADER_SIZE + payload::ENTRY_SIZE);

    let header = payload::read_header(buf)?;
    let campaign = CAMPAIGNS
        .may_load(deps.storage, &header.campaign_hash)?
        .ok_or_else(|| ContractError::CampaignNotFound {
            campaign_hash: bytes32_to_hex(&header.campaign_hash),
        })?;

    // The delivered token must be the campaign's input token
    let delivered_amount = match (&delivered, &campaign.input_token) {
        (Delivered::Native { denom, amount }, AssetInfo::Native { denom: expected })
            if denom == expected =>
        {
            *amount
        }
        (Delivered::Cw20 { token, amount }, AssetInfo::Cw20 { contract_addr })
            if token == contract_addr =>
        {
            *amount
        }
        _ => {
            let got = match &delivered {
                Delivered::Native { denom, .. } => denom.clone(),
                Delivered::Cw20 { token, .. } => token.to_string(),
            };
            return Err(ContractError::DepositTokenMismatch {
                expected: campaign.input_token.id(),
                got,
            });
        }
    };

    // Layer two: the logical origin must be the adapter the transport has
    // wired to this token, binding the payload to the correct token
    let from_addr = deps.api.addr_validate(&from)?;
    let expected_adapter = adapter_of(
        &deps.querier,
        &config.transport_endpoint,
        campaign.input_token.id(),
    )?;
    if from_addr != expected_adapter {
        return Err(ContractError::TokenAdapterMismatch {
            expected: expected_adapter.to_string(),
            got: from_addr.to_string(),
        });
    }

    // The transport moves the payload's full total; anything else is a
    // delivery fault
    let mut total = Uint128::zero();
    for index in 0..entries {
        let entry = payload::read_entry(buf, index)?;
        total += Uint128::new(entry.amount);
    }
    if delivered_amount != total {
        return Err(ContractError::AmountMismatch {
            expected: total,
            got: delivered_amount,
        });
    }

    // Materialize accounts; existing ids mean re-delivery and are inert
    let mut fresh_accounts: Vec<String> = vec![];
    for index in 0..entries {
        let entry = payload::read_entry(buf, index)?;
        let account_id = derive_account_id(
            &header.campaign_hash,
            &entry.owner,
            entry.amount,
            campaign.unlock_timestamp.seconds(),
        );
        if ESCROWS.has(deps.storage, &account_id) {
            continue;
        }

        let owner = Addr::unchecked(encode_bech32_address(&entry.owner, &config.address_prefix)?);
        ESCROWS.save(
            deps.storage,
            &account_id,
            &EscrowAccount {
                campaign_hash: Binary::from(header.campaign_hash.to_vec()),
                owner,
                amount: Uint128::new(entry.amount),
                unlock_timestamp: campaign.unlock_timestamp,
                deposit_script_executed: false,
                funds_disbursed: false,
            },
        )?;
        fresh_accounts.push(bytes32_to_hex(&account_id));
    }

    let mut stats = STATS.load(deps.storage)?;
    stats.messages_processed += 1;
    stats.accounts_created += fresh_accounts.len() as u64;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_attribute("method", "receive_payload")
        .add_attribute("message_id", hex::encode(message_id.as_slice()))
        .add_attribute("campaign_hash", bytes32_to_hex(&header.campaign_hash))
        .add_attribute("nonce", header.nonce_u64().to_string())
        .add_attribute("entries", entries.to_string())
        .add_attribute("accounts_created", fresh_accounts.len().to_string())
        .add_attribute("fresh_accounts", fresh_accounts.join(",")))
}
