#![allow(dead_code)]

//! Mock collaborator contracts for executor integration tests: the transport
//! endpoint and the scripted-execution engine.

use common::engine::EngineExecuteMsg;
use common::transport::{AdapterResponse, QuoteResponse, SendParams};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, Uint128, WasmMsg,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::Item;

// ============================================================================
// Mock Transport Endpoint
// ============================================================================

#[cw_serde]
pub struct EndpointInstantiateMsg {
    /// (token id, adapter address) wiring reported by `AdapterOf`
    pub adapters: Vec<(String, String)>,
}

#[cw_serde]
pub enum EndpointExecuteMsg {
    /// Test-only: relay a delivery so the executor sees the endpoint as the
    /// immediate caller
    Deliver {
        target: String,
        msg: Binary,
        funds: Vec<Coin>,
    },
}

#[cw_serde]
pub enum MockEndpointQueryMsg {
    QuoteSend(SendParams),
    AdapterOf { token: String },
}

const ADAPTERS: Item<Vec<(String, String)>> = Item::new("adapters");

fn endpoint_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: EndpointInstantiateMsg,
) -> StdResult<Response> {
    ADAPTERS.save(deps.storage, &msg.adapters)?;
    Ok(Response::new())
}

fn endpoint_execute(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: EndpointExecuteMsg,
) -> StdResult<Response> {
    match msg {
        EndpointExecuteMsg::Deliver {
            target,
            msg,
            funds,
        } => Ok(Response::new().add_message(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: target,
            msg,
            funds,
        }))),
    }
}

fn endpoint_query(deps: Deps, _env: Env, msg: MockEndpointQueryMsg) -> StdResult<Binary> {
    match msg {
        MockEndpointQueryMsg::QuoteSend(_) => to_json_binary(&QuoteResponse {
            native_fee: Uint128::zero(),
        }),
        MockEndpointQueryMsg::AdapterOf { token } => {
            let adapters = ADAPTERS.load(deps.storage)?;
            let adapter = adapters
                .into_iter()
                .find(|(id, _)| *id == token)
                .map(|(_, adapter)| adapter)
                .ok_or_else(|| StdError::generic_err("token has no adapter"))?;
            to_json_binary(&AdapterResponse {
                adapter: Addr::unchecked(adapter),
            })
        }
    }
}

pub fn endpoint_contract() -> Box<dyn Contract<cosmwasm_std::Empty>> {
    Box::new(ContractWrapper::new(
        endpoint_execute,
        endpoint_instantiate,
        endpoint_query,
    ))
}

// ============================================================================
// Mock Script Engine
// ============================================================================

#[cw_serde]
pub struct EngineInstantiateMsg {}

#[cw_serde]
pub enum EngineQueryMsg {
    /// Test-only: number of scripts the engine has executed
    Calls {},
}

#[cw_serde]
pub struct CallsResponse {
    pub calls: u64,
}

const ENGINE_CALLS: Item<u64> = Item::new("engine_calls");

fn engine_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: EngineInstantiateMsg,
) -> StdResult<Response> {
    ENGINE_CALLS.save(deps.storage, &0u64)?;
    Ok(Response::new())
}

fn engine_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: EngineExecuteMsg,
) -> StdResult<Response> {
    match msg {
        EngineExecuteMsg::ExecuteScript {
            account_id, owner, ..
        } => {
            let calls = ENGINE_CALLS.load(deps.storage)?;
            ENGINE_CALLS.save(deps.storage, &(calls + 1))?;
            Ok(Response::new()
                .add_attribute("method", "mock_execute_script")
                .add_attribute("account_id", account_id.to_base64())
                .add_attribute("owner", owner))
        }
    }
}

fn engine_query(deps: Deps, _env: Env, msg: EngineQueryMsg) -> StdResult<Binary> {
    match msg {
        EngineQueryMsg::Calls {} => to_json_binary(&CallsResponse {
            calls: ENGINE_CALLS.load(deps.storage)?,
        }),
    }
}

pub fn engine_contract() -> Box<dyn Contract<cosmwasm_std::Empty>> {
    Box::new(ContractWrapper::new(
        engine_execute,
        engine_instantiate,
        engine_query,
    ))
}
