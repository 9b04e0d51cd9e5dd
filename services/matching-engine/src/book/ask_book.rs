//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::numeric::Price;
use types::order::Side;

use super::price_level::PriceLevel;
use super::BookSide;

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are kept in entry-priority order.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    /// Price levels sorted ascending (lowest price first)
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookSide for AskBook {
    fn side(&self) -> Side {
        Side::SELL
    }

    fn levels(&self) -> &BTreeMap<Price, PriceLevel> {
        &self.levels
    }

    fn levels_mut(&mut self) -> &mut BTreeMap<Price, PriceLevel> {
        &mut self.levels
    }

    fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    fn levels_by_priority(&self) -> Box<dyn Iterator<Item = (&Price, &PriceLevel)> + '_> {
        Box::new(self.levels.iter())
    }
}
