use thiserror::Error;

/// Boundary-layer rejection of an order before it ever reaches the queue or
/// the book. Neither variant is fatal; the caller chooses what to do with a
/// rejected order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    #[error("price must be positive, got {0}")]
    NonPositivePrice(u64),
    #[error("quantity must be at least 1, got {0}")]
    ZeroQuantity(u64),
}

/// Fatal at construction: the ring queue was asked for a capacity that
/// cannot be masked with a single bitwise AND.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("capacity {0} must be a power of two >= 2")]
    InvalidCapacity(usize),
}
