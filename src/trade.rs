/// A trade represents a matched transaction between two orders.
///
/// - `price` comes from the maker's resting order, never the taker's.
/// - `quantity` is the amount filled by this one trade, not either order's
///   total quantity.
/// - A `Trade` is emitted once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub taker_order_id: u64,
    pub maker_order_id: u64,
    pub quantity: u64,
    pub price: u64,
    pub timestamp: u64,
}
