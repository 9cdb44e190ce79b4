//! Destination execution gas estimation.
//!
//! Executor-side cost is linear in the batch size: a base cost covering the
//! message decode plus the first depositor's account materialization, and a
//! fixed marginal cost per additional depositor. The batch cap exists to keep
//! this estimate under the transport's deliverable maximum.

use crate::state::DEFAULT_MAX_DEPOSITORS_PER_BRIDGE;

/// Gas to decode the payload and materialize the first depositor
pub const CAMPAIGN_RECEIVE_BASE_GAS: u64 = 420_000;

/// Marginal gas per additional depositor in the batch
pub const PER_DEPOSITOR_GAS: u64 = 160_000;

/// Largest gas budget the transport will deliver
pub const MAX_DELIVERABLE_GAS: u64 = 80_000_000;

/// Destination execution gas budget for a batch of `depositor_count`.
///
/// The orchestrator never dispatches an empty batch; a count of zero returns
/// the base cost so the query stays total.
pub fn executor_gas_budget(depositor_count: u32) -> u64 {
    if depositor_count <= 1 {
        return CAMPAIGN_RECEIVE_BASE_GAS;
    }
    CAMPAIGN_RECEIVE_BASE_GAS + PER_DEPOSITOR_GAS * (depositor_count as u64 - 1)
}
