//! Order store
//!
//! The single owner of every resting order record. Price levels refer to
//! orders by id only, so there is exactly one mutable copy per order.

use std::collections::HashMap;
use types::ids::OrderId;
use types::order::Order;

/// Mapping from order id to the resting order
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: HashMap<OrderId, Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resting order, returning the record it displaced (if any)
    pub fn insert(&mut self, order: Order) -> Option<Order> {
        self.orders.insert(order.order_id, order)
    }

    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        self.orders.remove(order_id)
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    pub fn get_mut(&mut self, order_id: &OrderId) -> Option<&mut Order> {
        self.orders.get_mut(order_id)
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.orders.contains_key(order_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Resting orders in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.values()
    }
}
