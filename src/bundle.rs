use crate::config::FeatureConfig;
use crate::depth::{compute_depth, compute_imbalance};
use crate::error::FeatureError;
use crate::slippage::{compute_expected_slippage, compute_simple_market_impact, DEFAULT_MAX_LEVELS};
use crate::types::{Feature, FeatureBundle, OrderBookSnapshot, Side};
use rust_decimal::Decimal;
use tracing::trace;

/// Depth over the top 5 levels of each side.
pub const DEPTH_5: &str = "depth_5";
/// Depth over the top 10 levels of each side.
pub const DEPTH_10: &str = "depth_10";
/// Imbalance over the top 5 levels of each side.
pub const IMBALANCE_5: &str = "imbalance_5";
/// Imbalance over the top 10 levels of each side.
pub const IMBALANCE_10: &str = "imbalance_10";
/// Slippage of a buy at the bundle notional.
pub const EXPECTED_SLIPPAGE_BUY: &str = "expected_slippage_buy";
/// Slippage of a sell at the bundle notional.
pub const EXPECTED_SLIPPAGE_SELL: &str = "expected_slippage_sell";
/// Round-trip market impact at the bundle notional.
pub const MARKET_IMPACT: &str = "market_impact";

/// Every key a bundle carries. Downstream consumers depend on these exact names.
pub const BUNDLE_KEYS: [&str; 7] = [
    DEPTH_5,
    DEPTH_10,
    IMBALANCE_5,
    IMBALANCE_10,
    EXPECTED_SLIPPAGE_BUY,
    EXPECTED_SLIPPAGE_SELL,
    MARKET_IMPACT,
];

/// Runs every transform with its standard parameterization.
///
/// Depth and imbalance are computed over 5 and 10 levels, slippage on both sides and
/// market impact for `notional` with a walk capped at 20 levels.
///
/// ## Examples
///
/// ```
/// use orderbook_features::{compute_orderbook_bundle, OrderBookSnapshot, BUNDLE_KEYS};
/// use rust_decimal::Decimal;
///
/// let snapshot = OrderBookSnapshot::empty(chrono::Utc::now());
/// let bundle = compute_orderbook_bundle(&snapshot, Decimal::new(1000, 0));
///
/// assert_eq!(bundle.len(), BUNDLE_KEYS.len());
/// assert_eq!(bundle["imbalance_5"].value, Decimal::new(5, 1));
/// ```
pub fn compute_orderbook_bundle(snapshot: &OrderBookSnapshot, notional: Decimal) -> FeatureBundle {
    bundle_with(snapshot, notional, DEFAULT_MAX_LEVELS)
}

fn bundle_with(snapshot: &OrderBookSnapshot, notional: Decimal, max_levels: usize) -> FeatureBundle {
    trace!(
        timestamp = %snapshot.timestamp(),
        bid_levels = snapshot.bids().len(),
        ask_levels = snapshot.asks().len(),
        %notional,
        max_levels,
        "computing order book bundle"
    );

    let features: [(&str, Feature); 7] = [
        (DEPTH_5, compute_depth(snapshot, 5)),
        (DEPTH_10, compute_depth(snapshot, 10)),
        (IMBALANCE_5, compute_imbalance(snapshot, 5)),
        (IMBALANCE_10, compute_imbalance(snapshot, 10)),
        (
            EXPECTED_SLIPPAGE_BUY,
            compute_expected_slippage(snapshot, Side::Buy, notional, max_levels),
        ),
        (
            EXPECTED_SLIPPAGE_SELL,
            compute_expected_slippage(snapshot, Side::Sell, notional, max_levels),
        ),
        (
            MARKET_IMPACT,
            compute_simple_market_impact(snapshot, notional, max_levels),
        ),
    ];

    features
        .into_iter()
        .map(|(name, feature)| (name.to_string(), feature))
        .collect()
}

/// Feature transforms bound to a validated [`FeatureConfig`].
///
/// The engine holds no state besides its parameters, so a single instance can be
/// shared freely across threads and reused for every incoming snapshot.
///
/// ## Examples
///
/// ```
/// use orderbook_features::{FeatureConfig, OrderBookFeatureEngine, OrderBookSnapshot, PriceLevel};
/// use rust_decimal::Decimal;
///
/// let engine = OrderBookFeatureEngine::new(FeatureConfig {
///     notional: Decimal::new(250, 0),
///     ..FeatureConfig::default()
/// })
/// .unwrap();
///
/// let snapshot = OrderBookSnapshot::new(
///     vec![PriceLevel::new(Decimal::new(100, 0), Decimal::new(4, 0))],
///     vec![PriceLevel::new(Decimal::new(101, 0), Decimal::new(1, 0))],
///     chrono::Utc::now(),
/// );
///
/// assert_eq!(engine.depth(&snapshot).value, Decimal::new(5, 0));
/// assert_eq!(engine.bundle(&snapshot).len(), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderBookFeatureEngine {
    config: FeatureConfig,
}

impl OrderBookFeatureEngine {
    /// Builds an engine after validating `config`.
    pub fn new(config: FeatureConfig) -> Result<Self, FeatureError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated parameters this engine runs with.
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Depth over the configured `depth_levels`.
    pub fn depth(&self, snapshot: &OrderBookSnapshot) -> Feature {
        compute_depth(snapshot, self.config.depth_levels)
    }

    /// Imbalance over the configured `depth_levels`.
    pub fn imbalance(&self, snapshot: &OrderBookSnapshot) -> Feature {
        compute_imbalance(snapshot, self.config.depth_levels)
    }

    /// Slippage of `side` at the configured notional and walk cap.
    pub fn expected_slippage(&self, snapshot: &OrderBookSnapshot, side: Side) -> Feature {
        compute_expected_slippage(snapshot, side, self.config.notional, self.config.max_levels)
    }

    /// Market impact at the configured notional and walk cap.
    pub fn market_impact(&self, snapshot: &OrderBookSnapshot) -> Feature {
        compute_simple_market_impact(snapshot, self.config.notional, self.config.max_levels)
    }

    /// The standard bundle at the configured notional and walk cap.
    ///
    /// Depth and imbalance windows stay at 5 and 10 levels because the bundle's key
    /// names encode them.
    pub fn bundle(&self, snapshot: &OrderBookSnapshot) -> FeatureBundle {
        bundle_with(snapshot, self.config.notional, self.config.max_levels)
    }
}
