use crate::book::OrderBook;
use crate::order::Order;
use crate::queue::BoundedQueue;
use crate::trade::Trade;

/// Outcome of a single drain attempt against the ring queue.
pub enum DrainOutcome {
    /// Nothing was waiting.
    Empty,
    /// An order was dequeued and admitted to the book.
    Processed { order_id: u64, trades: Vec<Trade> },
}

/// Pulls at most one order off `queue` and admits it to `book`. The thin
/// boundary between the lock-free transport and the single-threaded
/// matching engine; callers loop this from the one consumer thread.
pub fn drain_one(queue: &BoundedQueue<Order>, book: &mut OrderBook) -> DrainOutcome {
    match queue.try_pop() {
        Some(order) => {
            let order_id = order.order_id;
            let trades = book.add_order(order);
            DrainOutcome::Processed { order_id, trades }
        }
        None => DrainOutcome::Empty,
    }
}

/// Drains `queue` until it's empty, folding every admitted order's trades
/// into a single `Vec`. Useful for tests and the demo CLI; a live consumer
/// loop would call `drain_one` directly so it can interleave other work.
pub fn drain_all(queue: &BoundedQueue<Order>, book: &mut OrderBook) -> Vec<Trade> {
    let mut all_trades = Vec::new();
    loop {
        match drain_one(queue, book) {
            DrainOutcome::Processed { trades, .. } => all_trades.extend(trades),
            DrainOutcome::Empty => break,
        }
    }
    all_trades
}
