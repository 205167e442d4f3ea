//! The embedder-facing handle for computing amounts, assembling orders and
//! producing signatures.

use std::fmt;

use alloy::primitives::{Address, ChainId, Signature, U256};
use chrono::Utc;

use crate::amounts::{self, Amounts, LimitAmountRequest, MarketAmountRequest};
use crate::book::Book;
use crate::error::Error;
use crate::order::{
    BuildOrderInput, MAX_SALT, Order, OrderKind, TypedData, generate_order_salt,
};
use crate::signer::OrderSigner;
use crate::{Result, contract_config};

/// Immutable bundle of chain configuration and an optional signing
/// capability.
///
/// Construction is cheap and the handle is safe to share across threads;
/// prefer building a new one over mutating when the chain or signer changes.
pub struct OrderBuilder {
    chain_id: ChainId,
    signer: Option<Box<dyn OrderSigner>>,
}

impl fmt::Debug for OrderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBuilder")
            .field("chain_id", &self.chain_id)
            .field("signer", &self.signer_address())
            .finish()
    }
}

impl OrderBuilder {
    /// Creates a signerless builder for the given chain. Amount and order
    /// assembly work without a signer; only signing requires one.
    #[must_use]
    pub fn make(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            signer: None,
        }
    }

    /// Returns a builder that signs with the provided capability.
    #[must_use]
    pub fn with_signer<S: OrderSigner + 'static>(self, signer: S) -> Self {
        Self {
            signer: Some(Box::new(signer)),
            ..self
        }
    }

    #[must_use]
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Address of the configured signer capability, if any.
    #[must_use]
    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_deref().map(OrderSigner::address)
    }

    /// Computes the maker/taker amount pair for a limit intent.
    ///
    /// Prices snap to a 3-significant-digit grid and quantities to a
    /// 5-significant-digit grid before any arithmetic.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err(level = "warn"))
    )]
    pub fn get_limit_order_amounts(&self, request: LimitAmountRequest) -> Result<Amounts> {
        let result = amounts::limit_amounts(&request)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            side = %request.side,
            maker_amount = %result.maker_amount,
            taker_amount = %result.taker_amount,
            price_per_share = %result.price_per_share,
            "limit order amounts computed"
        );

        Ok(result)
    }

    /// Computes the maker/taker amount pair for a market intent by walking
    /// the provided book snapshot.
    ///
    /// Buys walk the asks, sells the bids, consuming best-first until the
    /// requested size or value fills. The slippage buffer is applied against
    /// the worst tier consumed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, book), err(level = "warn"))
    )]
    pub fn get_market_order_amounts(
        &self,
        request: MarketAmountRequest,
        book: &Book,
    ) -> Result<Amounts> {
        let result = amounts::market_amounts(&request, book)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            market_id = book.market_id,
            maker_amount = %result.maker_amount,
            taker_amount = %result.taker_amount,
            last_price = %result.last_price,
            slippage_bps = result.slippage_bps,
            "market order amounts computed"
        );

        Ok(result)
    }

    /// Assembles the canonical [`Order`] for the given kind and inputs.
    ///
    /// Omitted salts are drawn fresh from `[0, MAX_SALT]`; custom salts are
    /// used verbatim and rejected above `MAX_SALT`. Limit expirations must
    /// be in the future; market expirations are taken verbatim. The `maker`
    /// defaults to the signer address and must match it when both are set.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err(level = "warn"))
    )]
    pub fn build_order(&self, kind: OrderKind, input: BuildOrderInput) -> Result<Order> {
        let salt = match input.salt {
            Some(salt) if salt > MAX_SALT => {
                return Err(Error::numeric(format!(
                    "salt {salt} exceeds the maximum of {MAX_SALT}"
                )));
            }
            Some(salt) => salt,
            None => generate_order_salt(),
        };

        let expiration = match input.expires_at {
            None => U256::ZERO,
            Some(expires_at) => {
                if matches!(kind, OrderKind::Limit) && expires_at <= Utc::now() {
                    return Err(Error::invalid_expiration(expires_at));
                }

                let Ok(timestamp) = u64::try_from(expires_at.timestamp()) else {
                    return Err(Error::invalid_expiration(expires_at));
                };
                U256::from(timestamp)
            }
        };

        let maker = match (input.maker, self.signer_address()) {
            (Some(maker), Some(signer)) if maker != signer => {
                return Err(Error::maker_signer_mismatch(maker, signer));
            }
            (Some(maker), _) => maker,
            (None, Some(signer)) => signer,
            (None, None) => Address::ZERO,
        };

        let order = Order {
            salt: U256::from(salt),
            maker,
            signer: maker,
            taker: input.taker.unwrap_or(Address::ZERO),
            tokenId: input.token_id,
            makerAmount: input.maker_amount,
            takerAmount: input.taker_amount,
            expiration,
            nonce: U256::from(input.nonce.unwrap_or(0)),
            feeRateBps: U256::from(input.fee_rate_bps),
            side: input.side as u8,
            signatureType: input.signature_type.unwrap_or_default() as u8,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(kind = %kind, side = %input.side, token_id = %input.token_id, "order built");

        Ok(order)
    }

    /// Produces the EIP-712 typed-data payload for an order, selecting the
    /// verifying contract from the chain's address table by
    /// `(is_neg_risk, is_yield_bearing)`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, order), err(level = "warn"))
    )]
    pub fn build_typed_data(
        &self,
        order: &Order,
        is_neg_risk: bool,
        is_yield_bearing: bool,
    ) -> Result<TypedData> {
        let config = contract_config(self.chain_id, is_neg_risk)
            .ok_or_else(|| Error::missing_contract_config(self.chain_id, is_neg_risk))?;

        TypedData::from_order(order, self.chain_id, config.exchange_for(is_yield_bearing))
    }

    /// Signs a typed-data payload with the configured capability.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, err(level = "warn"))
    )]
    pub async fn sign_typed_data_order(&self, typed_data: &TypedData) -> Result<Signature> {
        let signer = self.signer.as_deref().ok_or_else(Error::missing_signer)?;

        signer.sign_order_hash(typed_data.signing_hash()).await
    }
}
