//! Common - Shared Types and Utilities for CCDM Contracts
//!
//! This package provides the types shared between the deposit-locker and
//! deposit-executor contracts:
//! - `address` - bech32 translation between depositor addresses and the
//!   payload's raw 20-byte owner field
//! - `asset` - native/CW20 token abstraction
//! - `payload` - the bridge payload wire codec (must be byte-exact on both
//!   sides of the bridge)
//! - `registry`, `transport`, `engine` - typed interfaces of the external
//!   collaborators (market registry, token transport, scripted-execution
//!   engine)

pub mod address;
pub mod asset;
pub mod engine;
pub mod payload;
pub mod registry;
pub mod transport;

pub use asset::{Asset, AssetInfo};
pub use payload::{BridgePayload, PayloadError, PayloadHeader, MAX_WIRE_AMOUNT};
