//! Scripted-execution engine collaborator interface.
//!
//! Escrow accounts execute campaign scripts through an external engine. The
//! contracts never interpret a recipe; they store the opaque command/state
//! descriptors and hand them to the engine when a script is triggered.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, QuerierWrapper, StdResult};

/// Opaque script descriptor: engine command words plus initial state
#[cw_serde]
pub struct Recipe {
    pub commands: Vec<Binary>,
    pub state: Vec<Binary>,
}

impl Recipe {
    /// A recipe with nothing to execute
    pub fn empty() -> Self {
        Self {
            commands: vec![],
            state: vec![],
        }
    }
}

/// Execute messages accepted by the engine
#[cw_serde]
pub enum EngineExecuteMsg {
    /// Run a script on behalf of an escrow account
    ExecuteScript {
        /// Deterministic escrow account id the script runs against
        account_id: Binary,
        /// Owner the engine acts for
        owner: String,
        commands: Vec<Binary>,
        state: Vec<Binary>,
    },
}

/// Queries served by source-side escrow accounts
#[cw_serde]
pub enum EscrowQueryMsg {
    /// The depositor that owns this escrow account
    Owner {},
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

/// Ask an escrow account contract who owns it
pub fn query_escrow_owner(querier: &QuerierWrapper, escrow: &Addr) -> StdResult<Addr> {
    let res: OwnerResponse = querier.query_wasm_smart(escrow, &EscrowQueryMsg::Owner {})?;
    Ok(res.owner)
}
