//! Order amount calculations for limit and market intents.
//!
//! Every computation is integer-only in wei. Book walks keep the running
//! price-times-quantity sum at `1e36` scale in 512 bits and divide exactly
//! once at the end, so weighted-average prices carry no intermediate
//! rounding.

use alloy::primitives::{U256, U512};
use bon::Builder;

use crate::Result;
use crate::book::{Book, Tier};
use crate::error::Error;
use crate::order::Side;
use crate::units::{WAD, retain_significant_digits, to_wei};

/// Prices snap to a 3-significant-digit grid.
pub(crate) const PRICE_SIGNIFICANT_DIGITS: u32 = 3;

/// Share quantities snap to a 5-significant-digit grid.
pub(crate) const QUANTITY_SIGNIFICANT_DIGITS: u32 = 5;

/// Smallest order quantity the exchange accepts: 0.01 shares.
pub const MIN_QUANTITY_WEI: u64 = 10_000_000_000_000_000;

/// Smallest value-sized market order: one collateral unit.
pub const MIN_VALUE_WEI: u64 = WAD;

const BPS_DENOMINATOR: u64 = 10_000;

/// Maker/taker amount pair for an order, plus the prices observed while
/// computing it.
///
/// `maker_amount` and `taker_amount` carry any slippage buffer;
/// `price_per_share` (volume-weighted average) and `last_price` (worst tier
/// touched) are the unbuffered market observations.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Amounts {
    pub maker_amount: U256,
    pub taker_amount: U256,
    pub price_per_share: U256,
    pub last_price: U256,
    pub slippage_bps: u32,
}

/// Limit order intent: a price and a share quantity, both in wei.
#[non_exhaustive]
#[derive(Builder, Clone, Copy, Debug, Eq, PartialEq)]
pub struct LimitAmountRequest {
    pub side: Side,
    pub price_per_share_wei: U256,
    pub quantity_wei: U256,
}

/// Market order intent sized by share quantity.
#[non_exhaustive]
#[derive(Builder, Clone, Copy, Debug, Eq, PartialEq)]
pub struct MarketQuantityRequest {
    pub side: Side,
    pub quantity_wei: U256,
    #[builder(default)]
    pub slippage_bps: u32,
}

/// Market order intent sized by collateral value. BUY only: a sell has no
/// fixed spend, it has shares to dispose of.
#[non_exhaustive]
#[derive(Builder, Clone, Copy, Debug, Eq, PartialEq)]
pub struct MarketValueRequest {
    pub side: Side,
    pub value_wei: U256,
    #[builder(default)]
    pub slippage_bps: u32,
}

/// Either flavor of market intent.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MarketAmountRequest {
    ByQuantity(MarketQuantityRequest),
    ByValue(MarketValueRequest),
}

impl From<MarketQuantityRequest> for MarketAmountRequest {
    fn from(request: MarketQuantityRequest) -> Self {
        Self::ByQuantity(request)
    }
}

impl From<MarketValueRequest> for MarketAmountRequest {
    fn from(request: MarketValueRequest) -> Self {
        Self::ByValue(request)
    }
}

pub(crate) fn limit_amounts(request: &LimitAmountRequest) -> Result<Amounts> {
    let price = retain_significant_digits(request.price_per_share_wei, PRICE_SIGNIFICANT_DIGITS);
    let quantity = retain_significant_digits(request.quantity_wei, QUANTITY_SIGNIFICANT_DIGITS);

    if quantity < U256::from(MIN_QUANTITY_WEI) {
        return Err(Error::invalid_quantity(
            quantity,
            U256::from(MIN_QUANTITY_WEI),
        ));
    }

    if price.is_zero() || price > U256::from(WAD) {
        return Err(Error::numeric(format!(
            "price per share {price} is outside (0, {WAD}]"
        )));
    }

    let collateral = mul_div(price, quantity, U256::from(WAD))?;

    // A buyer makes collateral and takes shares; a seller the reverse.
    let (maker_amount, taker_amount) = match request.side {
        Side::Buy => (collateral, quantity),
        Side::Sell => (quantity, collateral),
    };

    Ok(Amounts {
        maker_amount,
        taker_amount,
        price_per_share: price,
        last_price: price,
        slippage_bps: 0,
    })
}

pub(crate) fn market_amounts(request: &MarketAmountRequest, book: &Book) -> Result<Amounts> {
    match request {
        MarketAmountRequest::ByQuantity(request) => market_amounts_by_quantity(request, book),
        MarketAmountRequest::ByValue(request) => market_amounts_by_value(request, book),
    }
}

fn market_amounts_by_quantity(request: &MarketQuantityRequest, book: &Book) -> Result<Amounts> {
    if request.quantity_wei < U256::from(MIN_QUANTITY_WEI) {
        return Err(Error::invalid_quantity(
            request.quantity_wei,
            U256::from(MIN_QUANTITY_WEI),
        ));
    }

    // Buys lift asks, sells hit bids. Both sides arrive best-first.
    let tiers = match request.side {
        Side::Buy => &book.asks,
        Side::Sell => &book.bids,
    };

    let walk = walk_by_quantity(tiers, request.quantity_wei)?;

    // The execution price the contract enforces on the furthest fill is the
    // worst tier touched, so amounts are derived from it rather than from
    // the volume-weighted average.
    let collateral = mul_div(walk.last_price, walk.filled_quantity, U256::from(WAD))?;
    let (maker_amount, taker_amount) = match request.side {
        Side::Buy => (collateral, walk.filled_quantity),
        Side::Sell => (walk.filled_quantity, collateral),
    };

    let (maker_amount, taker_amount) =
        apply_slippage(request.side, maker_amount, taker_amount, request.slippage_bps)?;

    Ok(Amounts {
        maker_amount,
        taker_amount,
        price_per_share: walk.price_per_share,
        last_price: walk.last_price,
        slippage_bps: request.slippage_bps,
    })
}

fn market_amounts_by_value(request: &MarketValueRequest, book: &Book) -> Result<Amounts> {
    if matches!(request.side, Side::Sell) {
        return Err(Error::validation(
            "value-sized market orders must be BUY; sells are sized in shares",
        ));
    }

    if request.value_wei < U256::from(MIN_VALUE_WEI) {
        return Err(Error::invalid_quantity(
            request.value_wei,
            U256::from(MIN_VALUE_WEI),
        ));
    }

    let walk = walk_by_value(&book.asks, request.value_wei)?;

    let (maker_amount, taker_amount) = apply_slippage(
        Side::Buy,
        request.value_wei,
        walk.filled_quantity,
        request.slippage_bps,
    )?;

    Ok(Amounts {
        maker_amount,
        taker_amount,
        price_per_share: walk.price_per_share,
        last_price: walk.last_price,
        slippage_bps: request.slippage_bps,
    })
}

/// Prices and quantities consumed during one pass over a book side.
#[derive(Debug)]
struct WalkOutcome {
    filled_quantity: U256,
    price_per_share: U256,
    last_price: U256,
}

fn walk_by_quantity(tiers: &[Tier], quantity: U256) -> Result<WalkOutcome> {
    let mut remaining = quantity;
    let mut filled = U256::ZERO;
    let mut notional = U512::ZERO;
    let mut last_price = U256::ZERO;

    for tier in tiers {
        if remaining.is_zero() {
            break;
        }

        let (price, size) = tier_to_wei(tier)?;
        let take = size.min(remaining);

        filled += take;
        notional += widen(price) * widen(take);
        last_price = price;
        remaining -= take;
    }

    if !remaining.is_zero() {
        return Err(Error::insufficient_liquidity(quantity, filled));
    }

    let price_per_share = narrow(notional / widen(filled))?;

    Ok(WalkOutcome {
        filled_quantity: filled,
        price_per_share,
        last_price,
    })
}

fn walk_by_value(tiers: &[Tier], value: U256) -> Result<WalkOutcome> {
    let mut remaining = value;
    let mut shares = U256::ZERO;
    let mut notional = U512::ZERO;
    let mut last_price = U256::ZERO;

    for tier in tiers {
        if remaining.is_zero() {
            break;
        }

        let (price, size) = tier_to_wei(tier)?;
        let tier_value = mul_div(size, price, U256::from(WAD))?;
        let spend = tier_value.min(remaining);
        if spend.is_zero() {
            continue;
        }

        let take = mul_div(spend, U256::from(WAD), price)?;

        shares += take;
        notional += widen(price) * widen(take);
        last_price = price;
        remaining -= spend;
    }

    if !remaining.is_zero() {
        return Err(Error::insufficient_liquidity(value, value - remaining));
    }

    if shares.is_zero() {
        return Err(Error::invalid_quantity(
            U256::ZERO,
            U256::from(MIN_QUANTITY_WEI),
        ));
    }

    let price_per_share = narrow(notional / widen(shares))?;

    Ok(WalkOutcome {
        filled_quantity: shares,
        price_per_share,
        last_price,
    })
}

/// Buffers the amount exposed to execution risk by `slippage_bps` basis
/// points of the worst consumed tier.
///
/// Buys offer more collateral but never above one unit per share (a share
/// settles at most at one unit); sells accept less collateral, saturating
/// at zero.
fn apply_slippage(
    side: Side,
    maker_amount: U256,
    taker_amount: U256,
    slippage_bps: u32,
) -> Result<(U256, U256)> {
    if slippage_bps == 0 {
        return Ok((maker_amount, taker_amount));
    }

    match side {
        Side::Buy => {
            let buffered = mul_div(
                maker_amount,
                U256::from(BPS_DENOMINATOR + u64::from(slippage_bps)),
                U256::from(BPS_DENOMINATOR),
            )?;
            Ok((buffered.min(taker_amount), taker_amount))
        }
        Side::Sell => {
            let factor = BPS_DENOMINATOR.saturating_sub(u64::from(slippage_bps));
            let buffered = mul_div(
                taker_amount,
                U256::from(factor),
                U256::from(BPS_DENOMINATOR),
            )?;
            Ok((maker_amount, buffered))
        }
    }
}

fn tier_to_wei(tier: &Tier) -> Result<(U256, U256)> {
    if tier.price.is_sign_negative() {
        return Err(Error::invalid_book(format!(
            "tier price {} is negative",
            tier.price
        )));
    }
    if tier.size.is_sign_negative() {
        return Err(Error::invalid_book(format!(
            "tier size {} is negative",
            tier.size
        )));
    }

    let price = to_wei(tier.price)?;
    if price.is_zero() || price > U256::from(WAD) {
        return Err(Error::invalid_book(format!(
            "tier price {} is outside (0, 1]",
            tier.price
        )));
    }

    let size = to_wei(tier.size)?;
    if size.is_zero() {
        return Err(Error::invalid_book(format!(
            "tier size {} must be positive",
            tier.size
        )));
    }

    Ok((price, size))
}

/// `a * b / denominator` with the product staged through 512 bits, so wei
/// pairs whose product exceeds 256 bits divide without overflow.
pub(crate) fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(Error::numeric("division by zero"));
    }

    narrow(widen(a) * widen(b) / widen(denominator))
}

fn widen(value: U256) -> U512 {
    let limbs = value.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

fn narrow(value: U512) -> Result<U256> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(Error::numeric("amount does not fit into 256 bits"));
    }

    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}
