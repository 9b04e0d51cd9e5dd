//! Read-only views of the book

use serde::{Deserialize, Serialize};
use types::numeric::{Price, Quantity};
use types::order::Order;

use crate::book::{BookSide, OrderStore};

/// Head order of each side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopOfBook {
    pub best_bid: Option<Order>,
    pub best_ask: Option<Order>,
}

/// Every resting order, each side in priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub bids: Vec<Order>,
    pub asks: Vec<Order>,
}

impl BookSnapshot {
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }
}

/// Aggregated quantity per price level, best level first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}

/// Resolve one side's queued ids against the store, in priority order
pub(crate) fn collect_side<B: BookSide>(side: &B, store: &OrderStore) -> Vec<Order> {
    side.levels_by_priority()
        .flat_map(|(_, level)| level.order_ids())
        .filter_map(|order_id| store.get(&order_id).cloned())
        .collect()
}

/// Head order of one side
pub(crate) fn head_of<'a, B: BookSide>(side: &B, store: &'a OrderStore) -> Option<&'a Order> {
    let price = side.best_price()?;
    let order_id = side.levels().get(&price)?.front()?;
    store.get(&order_id)
}
