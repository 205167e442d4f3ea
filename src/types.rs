//! Re-exported types from external crates for convenience.
//!
//! These types are commonly used in this SDK and are re-exported here
//! so users don't need to add these dependencies to their `Cargo.toml`.

/// Ethereum address type and the [`address!`] macro for compile-time address literals.
/// [`ChainId`] is a type alias for `u64` representing EVM chain IDs.
/// [`Signature`] represents the 65-byte secp256k1 signatures of signed orders.
/// [`B256`] is a 256-bit fixed-size byte array type used for EIP-712 hashes.
/// [`U256`] and [`U512`] are the integer types all wei amounts flow through;
/// the 512-bit width carries intermediate products during book walking.
pub use alloy::primitives::{Address, B256, ChainId, Signature, U256, U512, address, b256};
/// Date and time types for order expiration.
pub use chrono::{DateTime, Utc};
