#![allow(dead_code)]

//! Mock collaborator contracts for locker integration tests: the market
//! registry, escrow accounts, and the token-transport endpoint.

use common::engine::{EscrowQueryMsg, OwnerResponse};
use common::registry::{InputTokenResponse, RegistryQueryMsg};
use common::transport::{
    AdapterResponse, QuoteResponse, SendParams, SendReceipt, TransportExecuteMsg,
};
use common::AssetInfo;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, Uint128, WasmMsg,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::Item;

// ============================================================================
// Mock Market Registry
// ============================================================================

#[cw_serde]
pub struct RegistryInstantiateMsg {
    /// (campaign hash, input token) pairs served by the registry
    pub campaigns: Vec<(Binary, AssetInfo)>,
}

#[cw_serde]
pub enum RegistryExecuteMsg {
    /// Test-only: bind another campaign to an input token
    Register {
        campaign_hash: Binary,
        input_token: AssetInfo,
    },
}

const REGISTRY_CAMPAIGNS: Item<Vec<(Binary, AssetInfo)>> = Item::new("registry_campaigns");

fn registry_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: RegistryInstantiateMsg,
) -> StdResult<Response> {
    REGISTRY_CAMPAIGNS.save(deps.storage, &msg.campaigns)?;
    Ok(Response::new())
}

fn registry_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: RegistryExecuteMsg,
) -> StdResult<Response> {
    match msg {
        RegistryExecuteMsg::Register {
            campaign_hash,
            input_token,
        } => {
            let mut campaigns = REGISTRY_CAMPAIGNS.load(deps.storage)?;
            campaigns.push((campaign_hash, input_token));
            REGISTRY_CAMPAIGNS.save(deps.storage, &campaigns)?;
            Ok(Response::new())
        }
    }
}

fn registry_query(deps: Deps, _env: Env, msg: RegistryQueryMsg) -> StdResult<Binary> {
    match msg {
        RegistryQueryMsg::InputToken { campaign_hash } => {
            let campaigns = REGISTRY_CAMPAIGNS.load(deps.storage)?;
            let input_token = campaigns
                .into_iter()
                .find(|(hash, _)| *hash == campaign_hash)
                .map(|(_, token)| token)
                .ok_or_else(|| StdError::generic_err("campaign not registered"))?;
            to_json_binary(&InputTokenResponse { input_token })
        }
    }
}

pub fn registry_contract() -> Box<dyn Contract<cosmwasm_std::Empty>> {
    Box::new(ContractWrapper::new(
        registry_execute,
        registry_instantiate,
        registry_query,
    ))
}

// ============================================================================
// Mock Escrow Account
// ============================================================================

#[cw_serde]
pub struct EscrowInstantiateMsg {
    pub owner: String,
}

#[cw_serde]
pub enum EscrowExecuteMsg {
    /// Relay an arbitrary message from the escrow account's own address
    Forward {
        contract: String,
        msg: Binary,
        funds: Vec<Coin>,
    },
}

const ESCROW_OWNER: Item<Addr> = Item::new("escrow_owner");

fn escrow_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: EscrowInstantiateMsg,
) -> StdResult<Response> {
    ESCROW_OWNER.save(deps.storage, &Addr::unchecked(msg.owner))?;
    Ok(Response::new())
}

fn escrow_execute(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: EscrowExecuteMsg,
) -> StdResult<Response> {
    match msg {
        EscrowExecuteMsg::Forward {
            contract,
            msg,
            funds,
        } => Ok(Response::new().add_message(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: contract,
            msg,
            funds,
        }))),
    }
}

fn escrow_query(deps: Deps, _env: Env, msg: EscrowQueryMsg) -> StdResult<Binary> {
    match msg {
        EscrowQueryMsg::Owner {} => to_json_binary(&OwnerResponse {
            owner: ESCROW_OWNER.load(deps.storage)?,
        }),
    }
}

pub fn escrow_contract() -> Box<dyn Contract<cosmwasm_std::Empty>> {
    Box::new(ContractWrapper::new(
        escrow_execute,
        escrow_instantiate,
        escrow_query,
    ))
}

// ============================================================================
// Mock Transport Endpoint
// ============================================================================

#[cw_serde]
pub struct TransportInstantiateMsg {
    /// Quoted native fee for every send
    pub fee: Uint128,
    /// Amount deducted from the receipt's `amount_received` (0 = faithful)
    pub shortfall: Uint128,
}

#[cw_serde]
pub enum MockTransportQueryMsg {
    QuoteSend(SendParams),
    AdapterOf { token: String },
    /// Test-only: the parameters and funds of the last `Send`
    LastSend {},
}

#[cw_serde]
pub struct LastSendResponse {
    pub amount: Uint128,
    pub gas_limit: u64,
    pub compose_payload: Binary,
    pub attached_funds: Vec<Coin>,
}

const TRANSPORT_CONFIG: Item<TransportInstantiateMsg> = Item::new("transport_config");
const TRANSPORT_NONCE: Item<u64> = Item::new("transport_nonce");
const LAST_SEND: Item<LastSendResponse> = Item::new("last_send");

fn transport_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: TransportInstantiateMsg,
) -> StdResult<Response> {
    TRANSPORT_CONFIG.save(deps.storage, &msg)?;
    TRANSPORT_NONCE.save(deps.storage, &0u64)?;
    Ok(Response::new())
}

fn transport_execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: TransportExecuteMsg,
) -> StdResult<Response> {
    match msg {
        TransportExecuteMsg::Send(params) => {
            let config = TRANSPORT_CONFIG.load(deps.storage)?;
            let nonce = TRANSPORT_NONCE.load(deps.storage)?;
            TRANSPORT_NONCE.save(deps.storage, &(nonce + 1))?;

            LAST_SEND.save(
                deps.storage,
                &LastSendResponse {
                    amount: params.amount,
                    gas_limit: params.gas_limit,
                    compose_payload: params.compose_payload.clone(),
                    attached_funds: info.funds,
                },
            )?;

            let receipt = SendReceipt {
                message_id: Binary::from([nonce as u8; 32].to_vec()),
                nonce,
                amount_received: params.amount.checked_sub(config.shortfall).unwrap_or_default(),
            };
            Ok(Response::new()
                .set_data(to_json_binary(&receipt)?)
                .add_attribute("method", "mock_send")
                .add_attribute("nonce", nonce.to_string()))
        }
    }
}

fn transport_query(deps: Deps, _env: Env, msg: MockTransportQueryMsg) -> StdResult<Binary> {
    match msg {
        MockTransportQueryMsg::QuoteSend(_) => {
            let config = TRANSPORT_CONFIG.load(deps.storage)?;
            to_json_binary(&QuoteResponse {
                native_fee: config.fee,
            })
        }
        MockTransportQueryMsg::AdapterOf { .. } => to_json_binary(&AdapterResponse {
            adapter: Addr::unchecked("terra1adapter"),
        }),
        MockTransportQueryMsg::LastSend {} => to_json_binary(&LAST_SEND.load(deps.storage)?),
    }
}

pub fn transport_contract() -> Box<dyn Contract<cosmwasm_std::Empty>> {
    Box::new(ContractWrapper::new(
        transport_execute,
        transport_instantiate,
        transport_query,
    ))
}
