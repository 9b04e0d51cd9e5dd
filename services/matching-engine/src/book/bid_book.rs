//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::numeric::Price;
use types::order::Side;

use super::price_level::PriceLevel;
use super::BookSide;

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// At each price level, orders are kept in entry-priority order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels keyed ascending; the best bid is the last key
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookSide for BidBook {
    fn side(&self) -> Side {
        Side::BUY
    }

    fn levels(&self) -> &BTreeMap<Price, PriceLevel> {
        &self.levels
    }

    fn levels_mut(&mut self) -> &mut BTreeMap<Price, PriceLevel> {
        &mut self.levels
    }

    fn best_price(&self) -> Option<Price> {
        // BTreeMap iter is ascending, so we need the last key
        self.levels.keys().next_back().copied()
    }

    fn levels_by_priority(&self) -> Box<dyn Iterator<Item = (&Price, &PriceLevel)> + '_> {
        Box::new(self.levels.iter().rev())
    }
}
