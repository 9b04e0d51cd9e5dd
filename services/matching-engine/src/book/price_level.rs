//! Price level implementation with a time-priority queue
//!
//! A price level holds the ids of all resting orders at one price, ordered by
//! entry priority (oldest first). Order records themselves live in the
//! `OrderStore`; the level only caches the aggregate quantity.

use std::collections::VecDeque;
use types::ids::OrderId;
use types::numeric::Quantity;

/// A price level containing orders at a specific price
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level, ascending entry priority
    orders: VecDeque<LevelEntry>,
    /// Total remaining quantity at this level
    total_quantity: Quantity,
}

/// Entry in the price level queue
#[derive(Debug, Clone, Copy)]
struct LevelEntry {
    order_id: OrderId,
    entry_priority: u64,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_quantity: Quantity::zero(),
        }
    }

    /// Insert an order behind every order of equal or lower entry priority
    ///
    /// Fresh orders carry the newest priority and land at the back; a
    /// reintroduced (amended) order goes back to its original place.
    ///
    /// The total saturates; callers check headroom with `has_room_for` first.
    pub fn insert(&mut self, order_id: OrderId, entry_priority: u64, quantity: Quantity) {
        let position = self
            .orders
            .partition_point(|entry| entry.entry_priority <= entry_priority);
        self.orders.insert(
            position,
            LevelEntry {
                order_id,
                entry_priority,
            },
        );
        self.total_quantity = self.total_quantity.saturating_add(quantity);
    }

    /// Whether `quantity` more fits in the level total after releasing
    /// `released` (an order about to be replaced)
    pub fn has_room_for(&self, quantity: Quantity, released: Quantity) -> bool {
        self.total_quantity
            .saturating_sub(released)
            .checked_add(quantity)
            .is_some()
    }

    /// Remove an order by id, releasing its remaining quantity
    ///
    /// Returns false if the order is not queued here
    pub fn remove(&mut self, order_id: &OrderId, remaining: Quantity) -> bool {
        let Some(position) = self.orders.iter().position(|entry| &entry.order_id == order_id) else {
            return false;
        };
        self.orders.remove(position);
        self.total_quantity = self.total_quantity.saturating_sub(remaining);
        true
    }

    /// Id of the order with time priority at this level
    pub fn front(&self) -> Option<OrderId> {
        self.orders.front().map(|entry| entry.order_id)
    }

    /// Account for a fill against an order at this level
    pub fn reduce(&mut self, filled: Quantity) {
        self.total_quantity = self.total_quantity.saturating_sub(filled);
    }

    /// Pop the front order once its quantity has been fully reduced
    pub fn pop_front(&mut self) -> Option<OrderId> {
        self.orders.pop_front().map(|entry| entry.order_id)
    }

    /// Queued `(order_id, entry_priority)` pairs in time priority
    pub fn entries(&self) -> impl Iterator<Item = (OrderId, u64)> + '_ {
        self.orders
            .iter()
            .map(|entry| (entry.order_id, entry.entry_priority))
    }

    /// Queued order ids in time priority
    pub fn order_ids(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.orders.iter().map(|entry| entry.order_id)
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
