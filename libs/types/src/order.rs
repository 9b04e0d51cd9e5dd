//! Order types
//!
//! An order carries an immutable identity (`order_id`, `side`,
//! `entry_priority`) and a mutable remaining `price`/`quantity` pair that only
//! the matching and amendment paths change.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => write!(f, "BUY"),
            Side::SELL => write!(f, "SELL"),
        }
    }
}

/// Good-until-canceled limit order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    /// Arrival marker used only to break ties at equal price
    pub entry_priority: u64,
    pub price: Price,
    /// Remaining unfilled quantity
    pub quantity: Quantity,
}

impl Order {
    /// Create an order with an explicit entry priority
    pub fn new(
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
        entry_priority: u64,
    ) -> Self {
        Self {
            order_id,
            side,
            entry_priority,
            price,
            quantity,
        }
    }

    /// Check if nothing remains to be filled
    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Decrement the remaining quantity by a fill
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining quantity
    pub fn apply_fill(&mut self, fill_quantity: Quantity) {
        assert!(
            fill_quantity <= self.quantity,
            "Fill would exceed order quantity"
        );
        self.quantity -= fill_quantity;
    }
}
