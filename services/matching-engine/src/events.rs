//! Event structures for the order book
//!
//! Outcomes of cancel and amend operations, in a form a reporting layer can
//! serialize and forward.

use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use crate::engine::SubmitResult;

/// Order canceled event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCanceled {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub unfilled_quantity: Quantity,
    pub entry_priority: u64,
}

impl From<Order> for OrderCanceled {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            side: order.side,
            price: order.price,
            unfilled_quantity: order.quantity,
            entry_priority: order.entry_priority,
        }
    }
}

/// Order amended event
///
/// An amendment is a remove-then-resubmit, so `outcome` is the result of the
/// resubmission and may carry fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAmended {
    pub order_id: OrderId,
    pub previous_price: Price,
    pub previous_quantity: Quantity,
    pub outcome: SubmitResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canceled_from_order() {
        let order = Order::new(
            OrderId::new(3),
            Side::BUY,
            Price::from_u64(99),
            Quantity::new(10),
            42,
        );

        let event = OrderCanceled::from(order);
        assert_eq!(event.order_id, OrderId::new(3));
        assert_eq!(event.unfilled_quantity, Quantity::new(10));
        assert_eq!(event.entry_priority, 42);
    }

    #[test]
    fn test_amended_serialization() {
        let event = OrderAmended {
            order_id: OrderId::new(3),
            previous_price: Price::from_u64(99),
            previous_quantity: Quantity::new(10),
            outcome: SubmitResult::Filled { fills: Vec::new() },
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: OrderAmended = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
