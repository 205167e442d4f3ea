#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod amounts;
pub mod book;
pub mod builder;
pub mod error;
pub mod order;
pub mod signer;
pub mod types;
pub mod units;

use alloy::primitives::ChainId;
use phf::phf_map;

use crate::error::Error;
use crate::types::{Address, address};

pub type Result<T> = std::result::Result<T, Error>;

/// [`ChainId`] for BNB Smart Chain mainnet
pub const BNB_MAINNET: ChainId = 56;

/// [`ChainId`] for BNB Smart Chain testnet <https://docs.bnbchain.org/bnb-smart-chain/developers/quick-guide/>
pub const BNB_TESTNET: ChainId = 97;

static CONFIG: phf::Map<ChainId, ContractConfig> = phf_map! {
    56_u64 => ContractConfig {
        exchange: address!("0x8f4c9b7e2d1a6f3b5c8e0d9a4b7f2e1c6a3d5b8f"),
        yield_bearing_exchange: address!("0x3a7d2f9c5b8e1a4f6d0c3b9e7a2f5d8c1b4e6a9d"),
        collateral: address!("0x55d398326f99059ff775485246999027b3197955"),
        conditional_tokens: address!("0x4d97dcd97ec945f40cf65f87097ace5ea0476045"),
    },
    97_u64 => ContractConfig {
        exchange: address!("0x2c8f5b1d9e4a7c3f6b0e8d2a5f9c4b7e1a3d6f8c"),
        yield_bearing_exchange: address!("0x7e3b9f5d1c8a4e6b2d0f7c3a9e5b8d1f4c6a2e9b"),
        collateral: address!("0x337610d27c682e347c9cd60bd4b3b107c9d34ddd"),
        conditional_tokens: address!("0x69308fb512518e39f9b16112fa8d994f4e2bf8bb"),
    },
};

static NEG_RISK_CONFIG: phf::Map<ChainId, ContractConfig> = phf_map! {
    56_u64 => ContractConfig {
        exchange: address!("0x6b1e8d4a9f2c7b5e3a0d8f6c1b9e4a7d2f5c8b3e"),
        yield_bearing_exchange: address!("0x9d5a3f7c1e8b4d6a2f9c5e0b7d3a8f1c6e4b2d9a"),
        collateral: address!("0x55d398326f99059ff775485246999027b3197955"),
        conditional_tokens: address!("0x4d97dcd97ec945f40cf65f87097ace5ea0476045"),
    },
    97_u64 => ContractConfig {
        exchange: address!("0x4a9c2e7f5b1d8a3c6f9b0e4d7a2c5f8b3e6d1a9f"),
        yield_bearing_exchange: address!("0x1f6d4b8a2e9c5f3b7d0a8e6c4f1b9d5a3c7e2f6b"),
        collateral: address!("0x337610d27c682e347c9cd60bd4b3b107c9d34ddd"),
        conditional_tokens: address!("0x69308fb512518e39f9b16112fa8d994f4e2bf8bb"),
    },
};

/// Helper struct to group the relevant deployed contract addresses
///
/// `exchange` and `yield_bearing_exchange` are the two CTF Exchange
/// deployments orders can settle against; which one verifies a given order is
/// selected by the yield-bearing flag at typed-data assembly time.
#[non_exhaustive]
#[derive(Debug)]
pub struct ContractConfig {
    pub exchange: Address,
    pub yield_bearing_exchange: Address,
    pub collateral: Address,
    pub conditional_tokens: Address,
}

impl ContractConfig {
    /// Exchange deployment verifying orders with the given collateral flavor.
    #[must_use]
    pub fn exchange_for(&self, is_yield_bearing: bool) -> Address {
        if is_yield_bearing {
            self.yield_bearing_exchange
        } else {
            self.exchange
        }
    }
}

/// Given a `chain_id` and `is_neg_risk`, return the relevant [`ContractConfig`]
#[must_use]
pub fn contract_config(chain_id: ChainId, is_neg_risk: bool) -> Option<&'static ContractConfig> {
    if is_neg_risk {
        NEG_RISK_CONFIG.get(&chain_id)
    } else {
        CONFIG.get(&chain_id)
    }
}
