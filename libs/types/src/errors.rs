//! Error types for the order book
//!
//! All failures are synchronous validation results; nothing here needs retry.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use thiserror::Error;

/// Errors returned by book operations
///
/// Every operation validates before mutating, so an error means the book is
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Duplicate order: {order_id}")]
    DuplicateOrder { order_id: OrderId },

    #[error("Invalid order: {reason}")]
    InvalidOrder { reason: String },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: Quantity },

    #[error("Invalid price: {price}")]
    InvalidPrice { price: Price },
}

/// Structural inconsistencies found by an invariant audit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{side} order {order_id} in levels but missing from the store")]
    MissingFromStore { side: Side, order_id: OrderId },

    #[error("order {order_id} in the store but not on its price level")]
    MissingFromLevels { order_id: OrderId },

    #[error("order {order_id} appears more than once in the book")]
    DuplicateEntry { order_id: OrderId },

    #[error("order {order_id} rests with zero quantity")]
    EmptyOrder { order_id: OrderId },

    #[error("order {order_id} sits on the {side} side at {level} but is priced {price}")]
    WrongLevel {
        order_id: OrderId,
        side: Side,
        level: Price,
        price: Price,
    },

    #[error("empty {side} level retained at {price}")]
    EmptyLevel { side: Side, price: Price },

    #[error("{side} level {price} caches {cached} but holds {actual}")]
    LevelTotal {
        side: Side,
        price: Price,
        cached: Quantity,
        actual: Quantity,
    },

    #[error("{side} level {price} total exceeds the quantity range")]
    LevelOverflow { side: Side, price: Price },

    #[error("{side} level {price} is out of time priority at order {order_id}")]
    TimePriority {
        side: Side,
        price: Price,
        order_id: OrderId,
    },

    #[error("book crossed: best bid {bid} >= best ask {ask}")]
    Crossed { bid: Price, ask: Price },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_error_display() {
        let err = BookError::OrderNotFound {
            order_id: OrderId::new(9),
        };
        assert_eq!(err.to_string(), "Order not found: 9");

        let err = BookError::InvalidQuantity {
            quantity: Quantity::zero(),
        };
        assert_eq!(err.to_string(), "Invalid quantity: 0");
    }

    #[test]
    fn test_invariant_violation_display() {
        let err = InvariantViolation::Crossed {
            bid: Price::from_u64(101),
            ask: Price::from_u64(100),
        };
        assert!(err.to_string().contains("101"));
        assert!(err.to_string().contains("100"));
    }
}
