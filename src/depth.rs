use crate::types::{Feature, OrderBookSnapshot, PriceLevel};
use rust_decimal::Decimal;

/// Depth window used when the caller has no preference.
pub const DEFAULT_DEPTH_LEVELS: usize = 5;

/// Imbalance of a book with no directional signal.
const NEUTRAL_IMBALANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Sums the consumable size of the first `levels` entries of one book side.
///
/// Negative sizes contribute nothing; a side shorter than `levels` is summed in full.
/// A total beyond the range of `Decimal` saturates at `Decimal::MAX`.
pub fn side_depth(side: &[PriceLevel], levels: usize) -> Decimal {
    side.iter()
        .take(levels)
        .map(PriceLevel::liquidity)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Aggregate resting size across both sides near the top of the book.
///
/// The value is `bid_depth + ask_depth`, each side summed over at most `levels`
/// entries. Both side totals are reported as components.
///
/// ## Examples
///
/// ```
/// use orderbook_features::{compute_depth, OrderBookSnapshot, PriceLevel};
/// use rust_decimal::Decimal;
///
/// let snapshot = OrderBookSnapshot::new(
///     vec![
///         PriceLevel::new(Decimal::new(100, 0), Decimal::new(10, 0)),
///         PriceLevel::new(Decimal::new(99, 0), Decimal::new(20, 0)),
///     ],
///     vec![PriceLevel::new(Decimal::new(101, 0), Decimal::new(5, 0))],
///     chrono::Utc::now(),
/// );
///
/// let depth = compute_depth(&snapshot, 1);
/// assert_eq!(depth.value, Decimal::new(15, 0));
/// assert_eq!(depth.component("bid_depth"), Some(Decimal::new(10, 0)));
/// assert_eq!(depth.timestamp, snapshot.timestamp());
/// ```
pub fn compute_depth(snapshot: &OrderBookSnapshot, levels: usize) -> Feature {
    let bid_depth = side_depth(snapshot.bids(), levels);
    let ask_depth = side_depth(snapshot.asks(), levels);

    Feature::new(
        bid_depth.saturating_add(ask_depth),
        [("bid_depth", bid_depth), ("ask_depth", ask_depth)],
        snapshot.timestamp(),
    )
}

/// Share of top-of-book liquidity resting on the bid side.
///
/// `bid_depth / (bid_depth + ask_depth)` over the first `levels` entries of each
/// side, so the value lies in `[0, 1]`: 1 is all bids (buy pressure), 0 is all asks
/// (sell pressure). A book with no liquidity carries no directional signal and
/// yields exactly 0.5.
///
/// ## Examples
///
/// ```
/// use orderbook_features::{compute_imbalance, OrderBookSnapshot, PriceLevel};
/// use rust_decimal::Decimal;
///
/// let ts = chrono::Utc::now();
/// let snapshot = OrderBookSnapshot::new(
///     vec![PriceLevel::new(Decimal::new(100, 0), Decimal::new(30, 0))],
///     vec![PriceLevel::new(Decimal::new(101, 0), Decimal::new(10, 0))],
///     ts,
/// );
/// assert_eq!(compute_imbalance(&snapshot, 5).value, Decimal::new(75, 2));
///
/// let empty = OrderBookSnapshot::empty(ts);
/// assert_eq!(compute_imbalance(&empty, 5).value, Decimal::new(5, 1));
/// ```
pub fn compute_imbalance(snapshot: &OrderBookSnapshot, levels: usize) -> Feature {
    let bid_depth = side_depth(snapshot.bids(), levels);
    let ask_depth = side_depth(snapshot.asks(), levels);
    let components = [("bid_depth", bid_depth), ("ask_depth", ask_depth)];

    if bid_depth.saturating_add(ask_depth) <= Decimal::ZERO {
        return Feature::new(NEUTRAL_IMBALANCE, components, snapshot.timestamp());
    }

    let imbalance = match bid_depth.checked_add(ask_depth) {
        Some(total_depth) => bid_depth
            .checked_div(total_depth)
            .unwrap_or(NEUTRAL_IMBALANCE),
        None => bid_share_by_ratio(bid_depth, ask_depth),
    };

    Feature::new(imbalance, components, snapshot.timestamp())
}

/// Bid share for depths whose sum does not fit in a `Decimal`.
///
/// Divides the smaller side by the larger so no intermediate exceeds 2.
fn bid_share_by_ratio(bid_depth: Decimal, ask_depth: Decimal) -> Decimal {
    let share = if bid_depth >= ask_depth {
        ask_depth
            .checked_div(bid_depth)
            .and_then(|ratio| Decimal::ONE.checked_div(Decimal::ONE + ratio))
    } else {
        bid_depth
            .checked_div(ask_depth)
            .and_then(|ratio| ratio.checked_div(Decimal::ONE + ratio))
    };
    share.unwrap_or(NEUTRAL_IMBALANCE)
}
