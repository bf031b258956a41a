//! Market-microstructure features computed from immutable order-book snapshots.
//!
//! ## Architecture
//!
//! Every feature is a pure transform over one input type, `OrderBookSnapshot`:
//!
//! 1. `compute_depth`: aggregate resting size near the top of the book
//! 2. `compute_imbalance`: share of that size resting on the bid side
//! 3. `compute_expected_slippage`: walks one side to fill a notional order and
//!    measures the average fill against mid
//! 4. `compute_simple_market_impact`: buy and sell slippage combined into one score
//! 5. `compute_orderbook_bundle`: all of the above under fixed, named keys
//!
//! Each transform returns a `Feature` carrying its value, the named components it was
//! derived from, and the timestamp of the source snapshot.
//!
//! ## Example Usage
//!
//! ```rust
//! use orderbook_features::{
//!     compute_expected_slippage, compute_orderbook_bundle, Decimal, OrderBookSnapshot,
//!     PriceLevel, Side,
//! };
//!
//! let bids = (0..10)
//!     .map(|i| PriceLevel::new(Decimal::new(1000 - i, 1), Decimal::from(10 + i)))
//!     .collect();
//! let asks = (0..10)
//!     .map(|i| PriceLevel::new(Decimal::new(1001 + i, 1), Decimal::from(9 + i)))
//!     .collect();
//! let snapshot = OrderBookSnapshot::new(bids, asks, chrono::Utc::now());
//!
//! // A single transform
//! let buy = compute_expected_slippage(&snapshot, Side::Buy, Decimal::new(1000, 0), 20);
//! assert!(buy.component("qty").unwrap() > Decimal::ZERO);
//!
//! // Or everything at once
//! let bundle = compute_orderbook_bundle(&snapshot, Decimal::new(1000, 0));
//! assert!(bundle["market_impact"].value >= Decimal::ZERO);
//! ```
//!
//! Degenerate books never produce errors: an empty book has zero depth, a neutral
//! imbalance of 0.5 and zero slippage. The only fallible operations turn caller input
//! into typed values (`Side::from_str`, `PriceLevel::from_f64`,
//! `OrderBookFeatureEngine::new`).
//!
//! Snapshots are never mutated, so any transform may run concurrently on a shared
//! `Arc<OrderBookSnapshot>` without locking.

mod bundle;
mod config;
mod depth;
mod error;
mod slippage;
mod types;

// Re-export public API
pub use bundle::{
    compute_orderbook_bundle, OrderBookFeatureEngine, BUNDLE_KEYS, DEPTH_10, DEPTH_5,
    EXPECTED_SLIPPAGE_BUY, EXPECTED_SLIPPAGE_SELL, IMBALANCE_10, IMBALANCE_5, MARKET_IMPACT,
};
pub use config::FeatureConfig;
pub use depth::{compute_depth, compute_imbalance, side_depth, DEFAULT_DEPTH_LEVELS};
pub use error::FeatureError;
pub use slippage::{
    compute_expected_slippage, compute_simple_market_impact, DEFAULT_MAX_LEVELS, DEFAULT_NOTIONAL,
};
pub use types::{ComponentMap, Feature, FeatureBundle, OrderBookSnapshot, PriceLevel, Side};

// Re-export commonly used external dependencies
pub use rust_decimal::Decimal;
