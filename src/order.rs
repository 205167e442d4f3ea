//! Canonical order types and their EIP-712 typed-data payloads.

use std::borrow::Cow;

use alloy::core::sol;
use alloy::dyn_abi::Eip712Domain;
use alloy::primitives::{Address, B256, ChainId, U256};
use alloy::sol_types::SolStruct as _;
use bon::Builder;
use chrono::{DateTime, Utc};
use rand::Rng as _;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_repr::Serialize_repr;
use serde_with::{DisplayFromStr, serde_as};
use strum_macros::Display;

use crate::Result;
use crate::error::Error;

/// EIP-712 domain name of the CTF Exchange deployments.
pub const EIP712_DOMAIN_NAME: &str = "predict.fun CTF Exchange";

/// EIP-712 domain version of the CTF Exchange deployments.
pub const EIP712_DOMAIN_VERSION: &str = "1";

/// Upper bound for order salts.
///
/// The venue parses salts as IEEE-754 numbers, so anything above 2^53 - 1
/// would lose precision on its side.
pub const MAX_SALT: u64 = (1 << 53) - 1;

/// Draws a fresh salt uniformly from `[0, MAX_SALT]`.
pub(crate) fn generate_order_salt() -> u64 {
    rand::rng().random_range(0..=MAX_SALT)
}

#[non_exhaustive]
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[repr(u8)]
pub enum Side {
    #[serde(alias = "buy")]
    Buy = 0,
    #[serde(alias = "sell")]
    Sell = 1,
}

impl TryFrom<u8> for Side {
    type Error = Error;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Side::Buy),
            1 => Ok(Side::Sell),
            other => Err(Error::validation(format!(
                "Unable to create Side from {other}"
            ))),
        }
    }
}

#[non_exhaustive]
#[derive(
    Clone, Copy, Display, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Serialize_repr, Deserialize,
)]
#[repr(u8)]
pub enum SignatureType {
    #[default]
    Eoa = 0,
    Proxy = 1,
    GnosisSafe = 2,
}

/// Whether an order came from a limit intent or a market intent. Limit
/// orders may rest on the book and carry an expiration; market orders
/// execute immediately.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum OrderKind {
    #[serde(alias = "limit")]
    Limit,
    #[serde(alias = "market")]
    Market,
}

sol! {
    /// Alloy solidity type representing an order in the context of the CTF
    /// exchange
    ///
    /// <!-- The venue expects every numeric field as a decimal string; JSON
    /// numbers get truncated to 64-bit floats by common parsers.
    /// -->
    #[non_exhaustive]
    #[serde_as]
    #[derive(Serialize, Debug, Default, PartialEq)]
    struct Order {
        #[serde_as(as = "DisplayFromStr")]
        uint256 salt;
        address maker;
        address signer;
        address taker;
        #[serde_as(as = "DisplayFromStr")]
        uint256 tokenId;
        #[serde_as(as = "DisplayFromStr")]
        uint256 makerAmount;
        #[serde_as(as = "DisplayFromStr")]
        uint256 takerAmount;
        #[serde_as(as = "DisplayFromStr")]
        uint256 expiration;
        #[serde_as(as = "DisplayFromStr")]
        uint256 nonce;
        #[serde_as(as = "DisplayFromStr")]
        uint256 feeRateBps;
        uint8   side;
        uint8   signatureType;
    }
}

/// Inputs for assembling a canonical [`Order`].
///
/// `maker_amount` and `taker_amount` normally come straight from an
/// [`Amounts`](crate::amounts::Amounts) computation.
#[non_exhaustive]
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
pub struct BuildOrderInput {
    pub side: Side,
    pub token_id: U256,
    pub maker_amount: U256,
    pub taker_amount: U256,
    #[builder(default)]
    pub fee_rate_bps: u32,
    pub salt: Option<u64>,
    pub maker: Option<Address>,
    pub taker: Option<Address>,
    pub nonce: Option<u64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub signature_type: Option<SignatureType>,
}

/// Domain separator inputs of a [`TypedData`] payload.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    pub name: &'static str,
    pub version: &'static str,
    pub chain_id: ChainId,
    pub verifying_contract: Address,
}

/// EIP-712 typed-data payload for an [`Order`], ready for signing.
///
/// Assembly is deterministic: the same order, chain and verifying contract
/// always produce the same signing hash.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    pub types: serde_json::Value,
    pub primary_type: &'static str,
    pub domain: TypedDataDomain,
    pub message: serde_json::Value,
    #[serde(skip)]
    signing_hash: B256,
}

impl TypedData {
    pub(crate) fn from_order(
        order: &Order,
        chain_id: ChainId,
        verifying_contract: Address,
    ) -> Result<Self> {
        let domain = Eip712Domain {
            name: Some(Cow::Borrowed(EIP712_DOMAIN_NAME)),
            version: Some(Cow::Borrowed(EIP712_DOMAIN_VERSION)),
            chain_id: Some(U256::from(chain_id)),
            verifying_contract: Some(verifying_contract),
            ..Eip712Domain::default()
        };

        Ok(Self {
            types: order_schema(),
            primary_type: "Order",
            domain: TypedDataDomain {
                name: EIP712_DOMAIN_NAME,
                version: EIP712_DOMAIN_VERSION,
                chain_id,
                verifying_contract,
            },
            message: serde_json::to_value(order)?,
            signing_hash: order.eip712_signing_hash(&domain),
        })
    }

    /// The `keccak256("\x19\x01" || domain_separator || struct_hash)` digest
    /// a signer capability signs.
    #[must_use]
    pub fn signing_hash(&self) -> B256 {
        self.signing_hash
    }
}

fn order_schema() -> serde_json::Value {
    json!({
        "EIP712Domain": [
            { "name": "name", "type": "string" },
            { "name": "version", "type": "string" },
            { "name": "chainId", "type": "uint256" },
            { "name": "verifyingContract", "type": "address" },
        ],
        "Order": [
            { "name": "salt", "type": "uint256" },
            { "name": "maker", "type": "address" },
            { "name": "signer", "type": "address" },
            { "name": "taker", "type": "address" },
            { "name": "tokenId", "type": "uint256" },
            { "name": "makerAmount", "type": "uint256" },
            { "name": "takerAmount", "type": "uint256" },
            { "name": "expiration", "type": "uint256" },
            { "name": "nonce", "type": "uint256" },
            { "name": "feeRateBps", "type": "uint256" },
            { "name": "side", "type": "uint8" },
            { "name": "signatureType", "type": "uint8" },
        ],
    })
}
