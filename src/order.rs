use std::time::SystemTime;

/// Which side of the book an order rests on or takes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// A single order moving through the book.
///
/// `order_id`, `side`, `price`, and the quantity the order was *submitted*
/// with are fixed at construction. `quantity` is mutable while the order
/// rests: matching decrements it, `modify` can overwrite it directly.
/// `timestamp` starts at `0` and is overwritten by the book at admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: u64,
    pub side: Side,
    pub price: u64,
    pub quantity: u64,
    pub timestamp: u64,
}

impl Order {
    /// Builds an order ready for submission; `timestamp` is `0` until the
    /// book admits it.
    pub fn new(order_id: u64, side: Side, price: u64, quantity: u64) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
            timestamp: 0,
        }
    }

    /// Boundary-layer validation: a positive price and a quantity of at
    /// least one. The book itself does not call this — sanitizing an order
    /// before it reaches the queue is the ingress's job.
    pub fn validate(&self) -> Result<(), crate::errors::OrderError> {
        if self.price == 0 {
            return Err(crate::errors::OrderError::NonPositivePrice(self.price));
        }
        if self.quantity == 0 {
            return Err(crate::errors::OrderError::ZeroQuantity(self.quantity));
        }
        Ok(())
    }
}

/// Nanoseconds since `UNIX_EPOCH`. Used only to seed demo orders with a
/// human-legible creation time; the book overwrites `timestamp` on
/// admission regardless.
pub fn wall_clock_nanos() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_zero_price() {
        let order = Order::new(1, Side::Buy, 0, 10);
        assert!(matches!(
            order.validate(),
            Err(crate::errors::OrderError::NonPositivePrice(0))
        ));
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        let order = Order::new(1, Side::Buy, 100, 0);
        assert!(matches!(
            order.validate(),
            Err(crate::errors::OrderError::ZeroQuantity(0))
        ));
    }

    #[test]
    fn validate_accepts_well_formed_order() {
        let order = Order::new(1, Side::Buy, 100, 10);
        assert!(order.validate().is_ok());
    }
}
