use crate::error::FeatureError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The direction of a hypothetical order walked through the book.
///
/// - `Buy` consumes liquidity resting on the ask side (buying from sellers)
/// - `Sell` consumes liquidity resting on the bid side (selling to buyers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Lift the asks.
    Buy,
    /// Hit the bids.
    Sell,
}

impl Side {
    /// Returns the book side this order would consume, best level first.
    ///
    /// ## Examples
    ///
    /// ```
    /// use orderbook_features::{OrderBookSnapshot, PriceLevel, Side};
    /// use rust_decimal::Decimal;
    ///
    /// let snapshot = OrderBookSnapshot::new(
    ///     vec![PriceLevel::new(Decimal::new(99, 0), Decimal::ONE)],
    ///     vec![PriceLevel::new(Decimal::new(101, 0), Decimal::TWO)],
    ///     chrono::Utc::now(),
    /// );
    ///
    /// assert_eq!(Side::Buy.consumed_levels(&snapshot)[0].price, Decimal::new(101, 0));
    /// assert_eq!(Side::Sell.consumed_levels(&snapshot)[0].price, Decimal::new(99, 0));
    /// ```
    pub fn consumed_levels(self, snapshot: &OrderBookSnapshot) -> &[PriceLevel] {
        match self {
            Side::Buy => snapshot.asks(),
            Side::Sell => snapshot.bids(),
        }
    }

    /// Lowercase name of the side, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = FeatureError;

    /// Parses `buy` or `sell` (case-insensitive). Anything else is rejected.
    ///
    /// ## Examples
    ///
    /// ```
    /// use orderbook_features::{FeatureError, Side};
    ///
    /// assert_eq!("BUY".parse::<Side>(), Ok(Side::Buy));
    /// assert_eq!(
    ///     "hold".parse::<Side>(),
    ///     Err(FeatureError::InvalidSide("hold".to_string()))
    /// );
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.eq_ignore_ascii_case("buy") {
            Ok(Side::Buy)
        } else if input.eq_ignore_ascii_case("sell") {
            Ok(Side::Sell)
        } else {
            Err(FeatureError::InvalidSide(input.to_string()))
        }
    }
}

/// Resting quantity at a single price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price of the level in quote currency
    pub price: Decimal,
    /// Resting size in base units. Negative sizes are read as zero liquidity.
    pub size: Decimal,
}

impl PriceLevel {
    /// Creates a level from exact decimal price and size.
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }

    /// Creates a level from floating-point inputs.
    ///
    /// ## Errors
    ///
    /// Returns `FeatureError::InvalidNumber` when either value is NaN, infinite
    /// or outside the range of `Decimal`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use orderbook_features::PriceLevel;
    /// use rust_decimal::Decimal;
    ///
    /// let level = PriceLevel::from_f64(100.25, 3.0).unwrap();
    /// assert_eq!(level.price, Decimal::new(10025, 2));
    ///
    /// assert!(PriceLevel::from_f64(f64::NAN, 1.0).is_err());
    /// ```
    pub fn from_f64(price: f64, size: f64) -> Result<Self, FeatureError> {
        let price = Decimal::try_from(price)
            .map_err(|_| FeatureError::InvalidNumber { field: "price", value: price })?;
        let size = Decimal::try_from(size)
            .map_err(|_| FeatureError::InvalidNumber { field: "size", value: size })?;
        Ok(Self::new(price, size))
    }

    /// Size as consumable liquidity: never below zero.
    #[inline]
    pub fn liquidity(&self) -> Decimal {
        self.size.max(Decimal::ZERO)
    }
}

/// An immutable point-in-time view of one venue's book.
///
/// Levels are read in the order given: bids are expected best (highest) first and
/// asks best (lowest) first. The snapshot never re-sorts; unsorted input does not
/// fail, it just yields features computed over the levels as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
    timestamp: DateTime<Utc>,
}

impl OrderBookSnapshot {
    /// Creates a snapshot from both sides of the book and the observation time.
    pub fn new(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>, timestamp: DateTime<Utc>) -> Self {
        Self {
            bids,
            asks,
            timestamp,
        }
    }

    /// A snapshot with no resting liquidity on either side.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self::new(Vec::new(), Vec::new(), timestamp)
    }

    /// Bid levels, in the order supplied.
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    /// Ask levels, in the order supplied.
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// When the snapshot was observed.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Price of the first bid level, if there is one with a positive price.
    pub fn best_bid(&self) -> Option<Decimal> {
        Self::best_price(&self.bids)
    }

    /// Price of the first ask level, if there is one with a positive price.
    pub fn best_ask(&self) -> Option<Decimal> {
        Self::best_price(&self.asks)
    }

    /// Reference price used to normalize slippage.
    ///
    /// - Both sides present: the average of best bid and best ask
    /// - One side present: that side's best price
    /// - Empty book: zero
    ///
    /// ## Examples
    ///
    /// ```
    /// use orderbook_features::{OrderBookSnapshot, PriceLevel};
    /// use rust_decimal::Decimal;
    ///
    /// let ts = chrono::Utc::now();
    /// let bid = PriceLevel::new(Decimal::new(100, 0), Decimal::ONE);
    /// let ask = PriceLevel::new(Decimal::new(101, 0), Decimal::ONE);
    ///
    /// let both = OrderBookSnapshot::new(vec![bid], vec![ask], ts);
    /// assert_eq!(both.mid_price(), Decimal::new(1005, 1));
    ///
    /// let bid_only = OrderBookSnapshot::new(vec![bid], vec![], ts);
    /// assert_eq!(bid_only.mid_price(), Decimal::new(100, 0));
    ///
    /// assert_eq!(OrderBookSnapshot::empty(ts).mid_price(), Decimal::ZERO);
    /// ```
    pub fn mid_price(&self) -> Decimal {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => match bid.checked_add(ask) {
                Some(sum) => sum / Decimal::TWO,
                // Halfway from bid to ask, for quotes whose sum exceeds the range of `Decimal`
                None => bid.saturating_add((ask - bid) / Decimal::TWO),
            },
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => Decimal::ZERO,
        }
    }

    /// `best_ask - best_bid` when both sides are quoted.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    fn best_price(levels: &[PriceLevel]) -> Option<Decimal> {
        levels
            .first()
            .map(|level| level.price)
            .filter(|price| *price > Decimal::ZERO)
    }
}

/// Named intermediate quantities behind a feature value.
pub type ComponentMap = BTreeMap<String, Decimal>;

/// The output of a single transform.
///
/// `components` holds the intermediate quantities the value was derived from, and
/// `timestamp` is copied from the source snapshot so features can be aligned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// The primary result of the transform
    pub value: Decimal,
    /// Named intermediate quantities `value` was derived from
    pub components: ComponentMap,
    /// Observation time of the source snapshot
    pub timestamp: DateTime<Utc>,
}

impl Feature {
    /// Creates a feature from its value, named components and source timestamp.
    pub fn new<I, K>(value: Decimal, components: I, timestamp: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<String>,
    {
        Self {
            value,
            components: components
                .into_iter()
                .map(|(name, amount)| (name.into(), amount))
                .collect(),
            timestamp,
        }
    }

    /// Looks up one named component.
    pub fn component(&self, name: &str) -> Option<Decimal> {
        self.components.get(name).copied()
    }
}

/// Features produced by the bundle orchestrator, keyed by their fixed names.
pub type FeatureBundle = BTreeMap<String, Feature>;
