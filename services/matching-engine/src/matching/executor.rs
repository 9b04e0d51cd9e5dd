//! Match execution
//!
//! Sweeps an incoming order against the opposite side, head first, and turns
//! each crossing into a sequenced `Fill`.

use tracing::{debug, error};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Fill;

use super::crossing;
use crate::book::{BookSide, OrderStore};

/// Match executor for handling fill generation
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    sequence_counter: u64,
}

impl MatchExecutor {
    /// Create a new match executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Sequence the next fill will carry
    pub fn next_sequence_number(&self) -> u64 {
        self.sequence_counter
    }

    /// Get next sequence number (monotonically increasing, wraps at `u64::MAX`)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter = self.sequence_counter.wrapping_add(1);
        seq
    }

    /// Record a fill between a resting (maker) and incoming (taker) order
    pub fn execute_fill(
        &mut self,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        side: Side,   // From taker perspective
        price: Price, // Execution price (maker's price)
        quantity: Quantity,
    ) -> Fill {
        let sequence = self.next_sequence();
        Fill::new(
            sequence,
            maker_order_id,
            taker_order_id,
            side,
            price,
            quantity,
        )
    }

    /// Cross `incoming` against the head of `opposite` while prices cross
    ///
    /// Both quantities are decremented in place. Exhausted resting orders are
    /// removed from their level and from `store` together; the incoming order
    /// is left to the caller even when it ends up fully filled.
    pub fn match_incoming<B: BookSide>(
        &mut self,
        incoming: &mut Order,
        opposite: &mut B,
        store: &mut OrderStore,
    ) -> Vec<Fill> {
        let mut fills = Vec::new();

        while !incoming.is_filled() {
            let Some((level_price, level)) = opposite.best_level_mut() else {
                break;
            };

            if !crossing::incoming_can_match(incoming.side, incoming.price, level_price) {
                break;
            }

            let Some(maker_order_id) = level.front() else {
                opposite.drop_level_if_empty(level_price);
                continue;
            };

            let Some(maker) = store.get_mut(&maker_order_id) else {
                error!(
                    order_id = %maker_order_id,
                    price = %level_price,
                    "Resting order missing from store; dropping it from its level"
                );
                level.pop_front();
                opposite.drop_level_if_empty(level_price);
                continue;
            };

            let fill_quantity = incoming.quantity.min(maker.quantity);
            incoming.apply_fill(fill_quantity);
            maker.apply_fill(fill_quantity);
            let maker_exhausted = maker.is_filled();

            level.reduce(fill_quantity);
            if maker_exhausted {
                level.pop_front();
            }
            let level_empty = level.is_empty();

            if maker_exhausted {
                store.remove(&maker_order_id);
            }
            if level_empty {
                opposite.drop_level_if_empty(level_price);
            }

            let fill = self.execute_fill(
                maker_order_id,
                incoming.order_id,
                incoming.side,
                level_price,
                fill_quantity,
            );

            debug!(
                sequence = fill.sequence,
                maker_order_id = %maker_order_id,
                taker_order_id = %incoming.order_id,
                side = %incoming.side,
                price = %level_price,
                quantity = %fill_quantity,
                notional = %fill.notional(),
                maker_exhausted,
                "Fill executed"
            );

            fills.push(fill);
        }

        fills
    }
}
