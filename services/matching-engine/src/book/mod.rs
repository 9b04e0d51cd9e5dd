//! Order book infrastructure module
//!
//! Contains the order store, price levels, bid book, and ask book.
//! Both sides share the `BookSide` trait so the match executor works against
//! either without knowing which way its prices sort.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;
pub mod store;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;
pub use store::OrderStore;

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// One side of the price-time book
///
/// Levels live in a `BTreeMap` keyed by price; implementors only decide which
/// end of the map is the best price.
pub trait BookSide {
    /// Side of the orders resting here
    fn side(&self) -> Side;

    fn levels(&self) -> &BTreeMap<Price, PriceLevel>;

    fn levels_mut(&mut self) -> &mut BTreeMap<Price, PriceLevel>;

    /// Best (most aggressive) resting price
    fn best_price(&self) -> Option<Price>;

    /// Levels from best to worst price
    fn levels_by_priority(&self) -> Box<dyn Iterator<Item = (&Price, &PriceLevel)> + '_>;

    /// Insert a resting order at its price, behind older orders
    fn insert(&mut self, order: &Order) {
        self.levels_mut()
            .entry(order.price)
            .or_default()
            .insert(order.order_id, order.entry_priority, order.quantity);
    }

    /// Remove a resting order from its level
    ///
    /// Returns true if the order was found and removed
    fn remove(&mut self, order: &Order) -> bool {
        let Some(level) = self.levels_mut().get_mut(&order.price) else {
            return false;
        };
        if !level.remove(&order.order_id, order.quantity) {
            return false;
        }
        // Remove empty price levels to keep book clean
        self.drop_level_if_empty(order.price);
        true
    }

    /// Whether `quantity` can rest at `price` without overflowing the level
    /// total, once `replacing` (if it rests at that price) is taken out
    fn has_room_at(&self, price: Price, quantity: Quantity, replacing: Option<&Order>) -> bool {
        let released = replacing
            .filter(|order| order.price == price)
            .map_or(Quantity::zero(), |order| order.quantity);
        self.levels()
            .get(&price)
            .map_or(true, |level| level.has_room_for(quantity, released))
    }

    /// Mutable access to the best level
    fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        let price = self.best_price()?;
        self.levels_mut().get_mut(&price).map(|level| (price, level))
    }

    fn drop_level_if_empty(&mut self, price: Price) {
        if self.levels().get(&price).is_some_and(PriceLevel::is_empty) {
            self.levels_mut().remove(&price);
        }
    }

    /// Aggregated `(price, quantity)` for the best `depth` levels
    fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels_by_priority()
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.levels().is_empty()
    }

    /// Get the total number of price levels
    fn level_count(&self) -> usize {
        self.levels().len()
    }

    /// Get the total number of resting orders
    fn order_count(&self) -> usize {
        self.levels().values().map(PriceLevel::order_count).sum()
    }
}
