use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::clock::MonotonicClock;
use crate::order::{Order, Side};
use crate::price_level::PriceLevel;
use crate::trade::Trade;

/// Limit order book: two price-keyed maps of [`PriceLevel`]s, matching,
/// resting, cancel, modify, and top-of-book.
///
/// - `bids`, keyed ascending by `BTreeMap`'s natural order; read
///   descending (best = highest price) by iterating in reverse.
/// - `asks`, keyed and read ascending (best = lowest price).
///
/// Not thread-safe: touched only by the single consumer thread draining the
/// ring queue (see `driver.rs`).
pub struct OrderBook {
    bids: BTreeMap<u64, PriceLevel>,
    asks: BTreeMap<u64, PriceLevel>,
    clock: MonotonicClock,
}

/// Unifies ascending (`IterMut`) and descending (`Rev<IterMut>`) traversal
/// of a price-level map so the matching walk has one code path regardless
/// of which side it's sweeping.
enum EitherIterMut<'a> {
    Fwd(std::collections::btree_map::IterMut<'a, u64, PriceLevel>),
    Rev(std::iter::Rev<std::collections::btree_map::IterMut<'a, u64, PriceLevel>>),
}

impl<'a> Iterator for EitherIterMut<'a> {
    type Item = (&'a u64, &'a mut PriceLevel);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            EitherIterMut::Fwd(it) => it.next(),
            EitherIterMut::Rev(it) => it.next(),
        }
    }
}

/// Walks `opposite` from its best price outward, filling `taker` against
/// each marketable level until the taker is exhausted or the book is no
/// longer marketable. Levels emptied by the walk are pruned afterwards.
fn match_against(
    taker: &mut Order,
    opposite: &mut BTreeMap<u64, PriceLevel>,
    reversed: bool,
    trades: &mut Vec<Trade>,
) {
    let iter = if reversed {
        EitherIterMut::Rev(opposite.iter_mut().rev())
    } else {
        EitherIterMut::Fwd(opposite.iter_mut())
    };

    let mut levels_to_remove = Vec::new();
    for (&price, level) in iter {
        if taker.quantity == 0 {
            break;
        }
        let marketable = match taker.side {
            Side::Buy => taker.price >= price,
            Side::Sell => taker.price <= price,
        };
        if !marketable {
            break;
        }

        level.match_taker(taker, trades);
        if level.is_empty() {
            levels_to_remove.push(price);
        }
    }

    for price in levels_to_remove {
        opposite.remove(&price);
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            clock: MonotonicClock::new(),
        }
    }

    /// Admits `order`: stamps its timestamp, matches it against the
    /// opposite side, and rests whatever quantity survives. Returns the
    /// trades produced, in the order they were matched (possibly empty).
    pub fn add_order(&mut self, mut order: Order) -> Vec<Trade> {
        order.timestamp = self.clock.now_ns();

        let mut trades = Vec::new();
        match order.side {
            Side::Buy => match_against(&mut order, &mut self.asks, false, &mut trades),
            Side::Sell => match_against(&mut order, &mut self.bids, true, &mut trades),
        }

        if !trades.is_empty() {
            info!(
                order_id = order.order_id,
                fills = trades.len(),
                remaining = order.quantity,
                "order matched"
            );
        }

        if order.quantity > 0 {
            self.rest(order);
        }

        trades
    }

    fn rest(&mut self, order: Order) {
        debug!(
            order_id = order.order_id,
            side = ?order.side,
            price = order.price,
            quantity = order.quantity,
            "resting remainder"
        );
        let book_side = match order.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        book_side
            .entry(order.price)
            .or_insert_with(PriceLevel::new)
            .append(order);
    }

    /// Removes a resting order by exact `(order_id, side, price)` key.
    /// `false` if the level or the order within it doesn't exist.
    pub fn cancel_order(&mut self, order_id: u64, side: Side, price: u64) -> bool {
        let book_side = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let Some(level) = book_side.get_mut(&price) else {
            warn!(order_id, ?side, price, "cancel: no price level at this key");
            return false;
        };

        match level.find_and_remove(order_id) {
            Some(_) => {
                if level.is_empty() {
                    book_side.remove(&price);
                }
                info!(order_id, ?side, price, "order cancelled");
                true
            }
            None => {
                warn!(order_id, ?side, price, "cancel: order not found at level");
                false
            }
        }
    }

    /// Quantity-only modify: updates the resting quantity in place,
    /// preserving the order's position (and therefore its time priority).
    /// A price move isn't supported here — callers cancel and re-add.
    /// `new_quantity == 0` is treated as a cancel.
    pub fn modify_order(&mut self, order_id: u64, side: Side, price: u64, new_quantity: u64) -> bool {
        if new_quantity == 0 {
            return self.cancel_order(order_id, side, price);
        }

        let book_side = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        match book_side.get_mut(&price) {
            Some(level) => {
                let modified = level.find_and_modify(order_id, new_quantity);
                if modified {
                    info!(order_id, ?side, price, new_quantity, "order modified");
                } else {
                    warn!(order_id, ?side, price, "modify: order not found at level");
                }
                modified
            }
            None => {
                warn!(order_id, ?side, price, "modify: no price level at this key");
                false
            }
        }
    }

    pub fn best_bid(&self) -> Option<u64> {
        self.bids.keys().next_back().copied()
    }

    pub fn best_ask(&self) -> Option<u64> {
        self.asks.keys().next().copied()
    }

    #[cfg(test)]
    fn bid_level(&self, price: u64) -> Option<&PriceLevel> {
        self.bids.get(&price)
    }

    #[cfg(test)]
    fn ask_level(&self, price: u64) -> Option<&PriceLevel> {
        self.asks.get(&price)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
