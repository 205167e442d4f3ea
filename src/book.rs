//! Orderbook snapshot types consumed by market-order amount calculations.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// One `(price, size)` level of an orderbook snapshot.
///
/// Prices are fractions of one collateral unit per share; sizes are share
/// counts. Both arrive as doubles off the wire and are converted to wei the
/// moment a tier is consumed.
#[non_exhaustive]
#[derive(Builder, Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Tier {
    pub price: f64,
    pub size: f64,
}

impl From<(f64, f64)> for Tier {
    fn from((price, size): (f64, f64)) -> Self {
        Self { price, size }
    }
}

/// Snapshot of one market's orderbook.
///
/// Tier ordering is the snapshot producer's contract: asks ascending in
/// price, bids descending, so both sides read best-first in execution
/// priority. Amount calculations walk the tiers in the order provided.
#[non_exhaustive]
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Book {
    pub market_id: u64,
    pub update_timestamp_ms: i64,
    #[builder(default)]
    #[serde(default)]
    pub asks: Vec<Tier>,
    #[builder(default)]
    #[serde(default)]
    pub bids: Vec<Tier>,
}

impl Book {
    /// Builds a snapshot from raw `(price, size)` pairs.
    #[must_use]
    pub fn from_levels(
        market_id: u64,
        update_timestamp_ms: i64,
        asks: &[(f64, f64)],
        bids: &[(f64, f64)],
    ) -> Self {
        Self {
            market_id,
            update_timestamp_ms,
            asks: asks.iter().copied().map(Tier::from).collect(),
            bids: bids.iter().copied().map(Tier::from).collect(),
        }
    }
}
