//! Fill types
//!
//! A fill is one crossing between the incoming (taker) order and a resting
//! (maker) order. Fills are emitted in generation order; surrounding layers
//! do the reporting.

use crate::ids::{OrderId, TradeId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quantity exchanged between an incoming and a resting order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub trade_id: TradeId,
    /// Per-book monotonic sequence
    pub sequence: u64,

    /// Resting order
    pub maker_order_id: OrderId,
    /// Incoming order
    pub taker_order_id: OrderId,

    /// Taker side
    pub side: Side,
    /// Execution price (the resting order's price)
    pub price: Price,
    pub quantity: Quantity,
}

impl Fill {
    pub fn new(
        sequence: u64,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            trade_id: TradeId::new(),
            sequence,
            maker_order_id,
            taker_order_id,
            side,
            price,
            quantity,
        }
    }

    /// Calculate fill value (price × quantity)
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * Decimal::from(self.quantity.value())
    }
}

/// Sum of fill quantities
pub fn filled_quantity(fills: &[Fill]) -> Quantity {
    fills.iter().map(|fill| fill.quantity).sum()
}
