//! Bridge orchestrator: green light, batching, transport dispatch, receipt.
//!
//! The orchestrator converts a caller-supplied list of escrow addresses into
//! one outbound transport request. Candidates with an empty ledger slot or an
//! amount over the 96-bit wire ceiling are skipped with their slots left
//! untouched; everything included is cleared from the ledger in the same
//! transaction that pays the transport, so a transport failure or a receipt
//! shortfall rolls the clearing back wholesale.

use common::address::decode_bech32_address;
use common::engine::query_escrow_owner;
use common::payload::{BridgePayload, MAX_WIRE_AMOUNT, OWNER_BYTES};
use common::registry::query_input_token;
use common::transport::{quote_send, SendParams, SendReceipt, TransportExecuteMsg};
use common::AssetInfo;
use cosmwasm_std::{
    from_json, to_json_binary, BankMsg, Binary, Coin, CosmosMsg, DepsMut, Env, MessageInfo, Reply,
    Response, SubMsg, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::execute::parse_campaign_hash;
use crate::gas::executor_gas_budget;
use crate::state::{
    PendingBridge, BRIDGE_REPLY_ID, CONFIG, GREEN_LIGHT, LEDGER, OUTGOING_NONCE, PENDING_BRIDGE,
    STATS,
};

// ============================================================================
// Green Light
// ============================================================================

/// Flip a campaign's green light. Green-light authority only.
pub fn execute_set_green_light(
    deps: DepsMut,
    info: MessageInfo,
    campaign_hash: Binary,
    allowed: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.green_lighter {
        return Err(ContractError::UnauthorizedGreenLighter);
    }

    let hash = parse_campaign_hash(&campaign_hash)?;
    GREEN_LIGHT.save(deps.storage, &hash, &allowed)?;

    Ok(Response::new()
        .add_attribute("method", "set_green_light")
        .add_attribute("campaign_hash", hex::encode(hash))
        .add_attribute("allowed", allowed.to_string()))
}

// ============================================================================
// Bridge
// ============================================================================

/// Bridge a batch of depositors for one campaign.
pub fn execute_bridge(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    campaign_hash: Binary,
    executor_gas_limit: Option<u64>,
    depositors: Vec<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::LockerPaused);
    }

    let hash = parse_campaign_hash(&campaign_hash)?;

    if !GREEN_LIGHT
        .may_load(deps.storage, &hash)?
        .unwrap_or(false)
    {
        return Err(ContractError::GreenLightNotGiven);
    }

    if depositors.is_empty() {
        return Err(ContractError::MustIncludeAtLeastOneDepositor);
    }
    if depositors.len() > config.max_depositors_per_bridge as usize {
        return Err(ContractError::BatchCapExceeded {
            cap: config.max_depositors_per_bridge,
            got: depositors.len(),
        });
    }

    let input_token = query_input_token(&deps.querier, &config.market_registry, &hash)?;

    let nonce = OUTGOING_NONCE.load(deps.storage)?;
    OUTGOING_NONCE.save(deps.storage, &(nonce + 1))?;

    // Over-allocate for the worst case, shrink to the included count below
    let mut payload = BridgePayload::init(&hash, nonce, depositors.len());
    let mut total = Uint128::zero();
    let mut included: usize = 0;

    for depositor in &depositors {
        let escrow = deps.api.addr_validate(depositor)?;
        let amount = LEDGER
            .may_load(deps.storage, (hash.as_slice(), &escrow))?
            .unwrap_or(Uint128::zero());

        // Partial-inclusion policy: zero and over-ceiling slots are skipped
        // with the ledger untouched, never a bulk failure
        if amount.is_zero() || amount.u128() > MAX_WIRE_AMOUNT {
            continue;
        }

        LEDGER.remove(deps.storage, (hash.as_slice(), &escrow));

        let owner = query_escrow_owner(&deps.querier, &escrow)?;
        let owner_bytes = wire_owner(&owner)?;
        payload.write_entry(included, &owner_bytes, amount.u128());

        total += amount;
        included += 1;
    }

    payload.resize(included)?;
    if included == 0 {
        return Err(ContractError::MustIncludeAtLeastOneDepositor);
    }

    let gas_limit = executor_gas_limit.unwrap_or_else(|| executor_gas_budget(included as u32));
    let params = SendParams {
        dest_endpoint_id: config.dest_endpoint_id,
        recipient: config.executor.clone(),
        amount: total,
        min_amount: total,
        gas_limit,
        compose_payload: Binary::from(payload.into_bytes()),
    };

    // Quote before dispatch; the attached native funds must cover the fee
    let fee = quote_send(&deps.querier, &config.transport_endpoint, &params)?;
    let paid = info
        .funds
        .iter()
        .find(|c| c.denom == config.fee_denom)
        .map(|c| c.amount)
        .unwrap_or(Uint128::zero());
    if paid < fee {
        return Err(ContractError::InsufficientFee {
            expected: fee,
            got: paid,
        });
    }

    let mut response = Response::new();
    let mut send_funds: Vec<Coin> = vec![];
    if !fee.is_zero() {
        send_funds.push(Coin {
            denom: config.fee_denom.clone(),
            amount: fee,
        });
    }

    match &input_token {
        AssetInfo::Native { denom } => {
            // Bridged tokens ride along with the fee
            if let Some(coin) = send_funds.iter_mut().find(|c| c.denom == *denom) {
                coin.amount += total;
            } else {
                send_funds.push(Coin {
                    denom: denom.clone(),
                    amount: total,
                });
            }
        }
        AssetInfo::Cw20 { contract_addr } => {
            // The transport pulls CW20 tokens via allowance
            response = response.add_message(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: contract_addr.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::IncreaseAllowance {
                    spender: config.transport_endpoint.to_string(),
                    amount: total,
                    expires: None,
                })?,
                funds: vec![],
            }));
        }
    }

    PENDING_BRIDGE.save(
        deps.storage,
        &PendingBridge {
            campaign_hash: campaign_hash.clone(),
            nonce,
            total,
            included: included as u32,
        },
    )?;

    response = response.add_submessage(SubMsg::reply_on_success(
        WasmMsg::Execute {
            contract_addr: config.transport_endpoint.to_string(),
            msg: to_json_binary(&TransportExecuteMsg::Send(params))?,
            funds: send_funds,
        },
        BRIDGE_REPLY_ID,
    ));

    // Refund native overpayment
    let refund = paid - fee;
    if !refund.is_zero() {
        response = response.add_message(CosmosMsg::Bank(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: vec![Coin {
                denom: config.fee_denom.clone(),
                amount: refund,
            }],
        }));
    }

    Ok(response
        .add_attribute("method", "bridge_dispatch")
        .add_attribute("campaign_hash", hex::encode(hash))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("included", included.to_string())
        .add_attribute("total", total.to_string())
        .add_attribute("gas_limit", gas_limit.to_string())
        .add_attribute("fee", fee.to_string()))
}

/// Raw 20-byte form of an escrow owner for the wire payload.
fn wire_owner(owner: &cosmwasm_std::Addr) -> Result<[u8; OWNER_BYTES], ContractError> {
    decode_bech32_address(owner.as_str()).map_err(|err| ContractError::InvalidAddress {
        reason: format!("owner {}: {}", owner, err),
    })
}

// ============================================================================
// Transport Reply
// ============================================================================

/// Validate the transport's send receipt. Failing here rolls back the whole
/// bridge call, ledger clearing included.
pub fn handle_bridge_reply(deps: DepsMut, reply: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_BRIDGE
        .may_load(deps.storage)?
        .ok_or(ContractError::MissingBridgeContext)?;
    PENDING_BRIDGE.remove(deps.storage);

    let result = reply
        .result
        .into_result()
        .map_err(|err| ContractError::InvalidReceipt { reason: err })?;
    let data = result.data.ok_or(ContractError::InvalidReceipt {
        reason: "transport returned no receipt data".to_string(),
    })?;
    let receipt: SendReceipt =
        from_json(&data).map_err(|err| ContractError::InvalidReceipt {
            reason: err.to_string(),
        })?;

    // A partial-amount delivery is a hard failure of the whole call
    if receipt.amount_received != pending.total {
        return Err(ContractError::RemoteAmountShortfall {
            expected: pending.total,
            received: receipt.amount_received,
        });
    }

    let mut stats = STATS.load(deps.storage)?;
    stats.total_bridges += 1;
    stats.total_amount_bridged += pending.total;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_attribute("method", "bridged")
        .add_attribute("message_id", hex::encode(receipt.message_id.as_slice()))
        .add_attribute("transport_nonce", receipt.nonce.to_string())
        .add_attribute("nonce", pending.nonce.to_string())
        .add_attribute(
            "campaign_hash",
            hex::encode(pending.campaign_hash.as_slice()),
        )
        .add_attribute("total", pending.total.to_string())
        .add_attribute("included", pending.included.to_string()))
}
