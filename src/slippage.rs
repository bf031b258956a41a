use crate::types::{Feature, OrderBookSnapshot, Side};
use rust_decimal::Decimal;
use tracing::{debug, trace};

/// How many levels a notional walk may consume when the caller has no preference.
pub const DEFAULT_MAX_LEVELS: usize = 20;

/// Reference order size, in quote currency, for slippage and impact features.
pub const DEFAULT_NOTIONAL: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Accumulated result of walking one side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BookWalk {
    /// Quote currency spent (buy) or received (sell)
    cost: Decimal,
    /// Base quantity filled
    quantity: Decimal,
    /// Notional left unfilled once the walk stopped
    remaining: Decimal,
    /// Levels visited, including ones skipped for a non-positive price
    levels_walked: usize,
}

impl BookWalk {
    /// Fills `notional` against `side`'s opposite book, best level first.
    ///
    /// Whole levels are consumed until the one that can absorb what is left, which
    /// is then consumed partially. Levels without a positive price hold no usable
    /// liquidity and are stepped over. A level whose notional exceeds the range of
    /// `Decimal` can absorb any remainder. The walk stops early, keeping what it has
    /// filled, if a running total would leave that range.
    fn fill(snapshot: &OrderBookSnapshot, side: Side, notional: Decimal, max_levels: usize) -> Self {
        let mut walk = BookWalk {
            cost: Decimal::ZERO,
            quantity: Decimal::ZERO,
            remaining: notional,
            levels_walked: 0,
        };

        for level in side.consumed_levels(snapshot).iter().take(max_levels) {
            walk.levels_walked += 1;
            if level.price <= Decimal::ZERO {
                continue;
            }

            let size = level.liquidity();
            match size.checked_mul(level.price) {
                Some(level_notional) if level_notional < walk.remaining => {
                    if !walk.take(level_notional, size) {
                        break;
                    }
                }
                _ => {
                    // trade_qty * price == remaining
                    match walk.remaining.checked_div(level.price) {
                        Some(trade_quantity) => {
                            walk.take(walk.remaining, trade_quantity);
                        }
                        None => debug!(
                            %side,
                            price = %level.price,
                            remaining = %walk.remaining,
                            "fill quantity out of decimal range; walk stopped"
                        ),
                    }
                    break;
                }
            }
        }

        walk
    }

    /// Adds one fill to the running totals, leaving them untouched on overflow.
    fn take(&mut self, notional: Decimal, quantity: Decimal) -> bool {
        let (Some(cost), Some(total_quantity), Some(remaining)) = (
            self.cost.checked_add(notional),
            self.quantity.checked_add(quantity),
            self.remaining.checked_sub(notional),
        ) else {
            debug!(
                levels_walked = self.levels_walked,
                cost = %self.cost,
                quantity = %self.quantity,
                "running fill totals out of decimal range; walk stopped"
            );
            return false;
        };

        self.cost = cost;
        self.quantity = total_quantity;
        self.remaining = remaining;
        true
    }
}

fn no_fill(snapshot: &OrderBookSnapshot) -> Feature {
    Feature::new(
        Decimal::ZERO,
        [("filled", Decimal::ZERO), ("mid", Decimal::ZERO)],
        snapshot.timestamp(),
    )
}

/// Expected slippage, relative to mid, of filling `notional` on one side.
///
/// The order walks the opposite side of the book (a buy lifts the asks, a sell hits
/// the bids) over at most `max_levels` levels. The average fill price is compared
/// to the mid price so that a positive value always means a worse fill than mid:
///
/// - Buy: `(avg_fill - mid) / mid`
/// - Sell: `(mid - avg_fill) / mid`
///
/// A negative `notional` is treated as zero. When nothing is filled the value is
/// zero with components `filled` and `mid` both zero. Otherwise the components are
/// `avg_fill`, `mid`, `filled_notional` and `qty`; a partial fill (book exhausted
/// within `max_levels`) is only visible as `filled_notional < notional`. Without a
/// positive mid price the value is zero. Magnitudes beyond the range of `Decimal`
/// never panic: the walk stops at the last representable fill, and an average price
/// that cannot be represented yields the no-fill result.
///
/// On a well-formed book (best bid below best ask) a larger notional never slips
/// less. A crossed book can fill on the favorable side of mid, where the value is
/// negative and its magnitude may shrink as the order grows.
///
/// ## Examples
///
/// ```
/// use orderbook_features::{compute_expected_slippage, OrderBookSnapshot, PriceLevel, Side};
/// use rust_decimal::Decimal;
///
/// let snapshot = OrderBookSnapshot::new(
///     vec![PriceLevel::new(Decimal::new(99, 0), Decimal::new(10, 0))],
///     vec![
///         PriceLevel::new(Decimal::new(101, 0), Decimal::new(1, 0)),
///         PriceLevel::new(Decimal::new(102, 0), Decimal::new(10, 0)),
///     ],
///     chrono::Utc::now(),
/// );
///
/// // 101 from the first ask, 204 more from the second: 3 units at an average of 101.666...
/// let slippage = compute_expected_slippage(&snapshot, Side::Buy, Decimal::new(305, 0), 20);
/// assert_eq!(slippage.component("qty"), Some(Decimal::new(3, 0)));
/// assert_eq!(slippage.component("mid"), Some(Decimal::new(100, 0)));
/// assert!(slippage.value > Decimal::ZERO);
/// ```
pub fn compute_expected_slippage(
    snapshot: &OrderBookSnapshot,
    side: Side,
    notional: Decimal,
    max_levels: usize,
) -> Feature {
    let notional = notional.max(Decimal::ZERO);
    let walk = BookWalk::fill(snapshot, side, notional, max_levels);

    if walk.quantity <= Decimal::ZERO {
        trace!(%side, %notional, levels_walked = walk.levels_walked, "no liquidity consumed");
        return no_fill(snapshot);
    }

    if walk.remaining > Decimal::ZERO {
        debug!(
            %side,
            %notional,
            remaining = %walk.remaining,
            levels_walked = walk.levels_walked,
            "order only partially filled within walked levels"
        );
    }

    let Some(avg_fill_price) = walk.cost.checked_div(walk.quantity) else {
        debug!(
            %side,
            cost = %walk.cost,
            quantity = %walk.quantity,
            "average fill price out of decimal range"
        );
        return no_fill(snapshot);
    };
    let mid = snapshot.mid_price();

    let slippage = if mid <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        let distance = match side {
            Side::Buy => avg_fill_price - mid,
            Side::Sell => mid - avg_fill_price,
        };
        distance.checked_div(mid).unwrap_or(Decimal::ZERO)
    };

    Feature::new(
        slippage,
        [
            ("avg_fill", avg_fill_price),
            ("mid", mid),
            ("filled_notional", walk.cost),
            ("qty", walk.quantity),
        ],
        snapshot.timestamp(),
    )
}

/// Symmetric round-trip cost of trading `notional` against the book.
///
/// Buy and sell slippage are computed independently for the same notional and the
/// value is `|buy_slippage| + |sell_slippage|`, so it is never negative. The signed
/// slippages are kept as the `buy_slippage` and `sell_slippage` components.
///
/// ## Examples
///
/// ```
/// use orderbook_features::{compute_simple_market_impact, OrderBookSnapshot, PriceLevel};
/// use rust_decimal::Decimal;
///
/// let snapshot = OrderBookSnapshot::new(
///     vec![PriceLevel::new(Decimal::new(99, 0), Decimal::new(200, 0))],
///     vec![PriceLevel::new(Decimal::new(101, 0), Decimal::new(200, 0))],
///     chrono::Utc::now(),
/// );
///
/// // Each side fills at its touch, one unit away from a mid of 100
/// let impact = compute_simple_market_impact(&snapshot, Decimal::new(9999, 0), 20);
/// assert_eq!(impact.value, Decimal::new(2, 2));
/// ```
pub fn compute_simple_market_impact(
    snapshot: &OrderBookSnapshot,
    notional: Decimal,
    max_levels: usize,
) -> Feature {
    let buy_slippage = compute_expected_slippage(snapshot, Side::Buy, notional, max_levels).value;
    let sell_slippage = compute_expected_slippage(snapshot, Side::Sell, notional, max_levels).value;

    Feature::new(
        buy_slippage.abs().saturating_add(sell_slippage.abs()),
        [
            ("buy_slippage", buy_slippage),
            ("sell_slippage", sell_slippage),
        ],
        snapshot.timestamp(),
    )
}
