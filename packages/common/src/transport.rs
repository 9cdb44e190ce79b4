//! Token-transport collaborator interface.
//!
//! The transport is an opaque external service with a quote/send/receipt
//! contract. The locker quotes a native fee, dispatches `Send` with the
//! compose payload, and reads the `SendReceipt` back from the response data
//! in its reply handler. On the destination chain the transport's endpoint
//! invokes the executor directly; the executor asks the endpoint which
//! adapter instance corresponds to a token so it can bind a received payload
//! to the correct token.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, QuerierWrapper, StdResult, Uint128};

/// Parameters of one outbound transfer, shared by `QuoteSend` and `Send`
#[cw_serde]
pub struct SendParams {
    /// Destination endpoint identifier
    pub dest_endpoint_id: u32,
    /// Recipient on the destination chain (32-byte universal address)
    pub recipient: Binary,
    /// Amount of the token to move
    pub amount: Uint128,
    /// Minimum amount that must arrive on the remote side
    pub min_amount: Uint128,
    /// Gas budget for destination-side execution of the compose payload
    pub gas_limit: u64,
    /// Compose payload delivered alongside the tokens
    pub compose_payload: Binary,
}

/// Execute messages accepted by the transport endpoint
#[cw_serde]
pub enum TransportExecuteMsg {
    /// Move tokens and deliver the compose payload.
    ///
    /// Payable: the quoted native fee must be attached. CW20 tokens are
    /// pulled from the caller via allowance; native tokens ride in the funds.
    /// The response data is a json-encoded [`SendReceipt`].
    Send(SendParams),
}

/// Queries served by the transport endpoint
#[cw_serde]
pub enum TransportQueryMsg {
    /// Fee quote for a prospective `Send`
    QuoteSend(SendParams),
    /// The on-chain adapter instance wired to a token
    AdapterOf { token: String },
}

#[cw_serde]
pub struct QuoteResponse {
    /// Fee payable in the native currency
    pub native_fee: Uint128,
}

#[cw_serde]
pub struct AdapterResponse {
    pub adapter: Addr,
}

/// Receipt returned in the `Send` response data
#[cw_serde]
pub struct SendReceipt {
    /// Transport-assigned message identifier (32 bytes)
    pub message_id: Binary,
    /// Transport-assigned message nonce
    pub nonce: u64,
    /// Amount credited on the remote side
    pub amount_received: Uint128,
}

/// Quote the native fee for `params` on the transport endpoint
pub fn quote_send(
    querier: &QuerierWrapper,
    endpoint: &Addr,
    params: &SendParams,
) -> StdResult<Uint128> {
    let res: QuoteResponse =
        querier.query_wasm_smart(endpoint, &TransportQueryMsg::QuoteSend(params.clone()))?;
    Ok(res.native_fee)
}

/// Resolve the adapter instance the transport has wired to `token`
pub fn adapter_of(querier: &QuerierWrapper, endpoint: &Addr, token: String) -> StdResult<Addr> {
    let res: AdapterResponse =
        querier.query_wasm_smart(endpoint, &TransportQueryMsg::AdapterOf { token })?;
    Ok(res.adapter)
}
