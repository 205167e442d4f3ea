#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests"
)]
#![allow(unused, reason = "Not every helper is used by every test binary")]

use predict_client_sdk::BNB_MAINNET;
use predict_client_sdk::book::Book;
use predict_client_sdk::builder::OrderBuilder;
use predict_client_sdk::types::U256;

// publicly known private key
pub const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const WAD: u128 = 1_000_000_000_000_000_000;

#[must_use]
pub fn builder() -> OrderBuilder {
    OrderBuilder::make(BNB_MAINNET)
}

/// `n` whole shares (or collateral units) in wei.
#[must_use]
pub fn wei(n: u128) -> U256 {
    U256::from(n) * U256::from(WAD)
}

#[must_use]
pub fn fresh_orderbook() -> Book {
    Book::from_levels(
        1,
        1_700_000_000_000,
        &[(0.50, 100.0), (0.51, 200.0), (0.52, 300.0)],
        &[(0.49, 100.0), (0.48, 200.0), (0.47, 300.0)],
    )
}

/// Single deep tier on each side; fills never spill over.
#[must_use]
pub fn slippage_book() -> Book {
    Book::from_levels(
        1,
        0,
        &[(0.27, 100.0), (0.30, 200.0)],
        &[(0.27, 100.0), (0.25, 200.0)],
    )
}

/// Three tiers a 100-share fill walks entirely, so the weighted average and
/// the worst tier differ.
#[must_use]
pub fn deep_book() -> Book {
    Book::from_levels(
        1,
        0,
        &[(0.25, 50.0), (0.27, 30.0), (0.30, 20.0)],
        &[(0.30, 50.0), (0.27, 30.0), (0.25, 20.0)],
    )
}
