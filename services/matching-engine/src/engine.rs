//! Order book facade
//!
//! Main coordinator for the order store, both book sides and the match
//! executor. Every public operation validates before it mutates, so an `Err`
//! leaves the book untouched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use types::clock::{LogicalClock, PriorityClock};
use types::errors::{BookError, InvariantViolation};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Fill;

use crate::audit;
use crate::book::{AskBook, BidBook, BookSide, OrderStore};
use crate::config::BookConfig;
use crate::events::{OrderAmended, OrderCanceled};
use crate::matching::MatchExecutor;
use crate::snapshot::{self, BookSnapshot, DepthSnapshot, TopOfBook};

/// Single-instrument limit order book
pub struct OrderBook<C = LogicalClock> {
    /// Owner of every resting order
    store: OrderStore,
    bids: BidBook,
    asks: AskBook,
    /// Fill executor with sequence generation
    executor: MatchExecutor,
    /// Entry-priority source for `submit`
    clock: C,
    config: BookConfig,
}

/// Result of introducing an order to the book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitResult {
    /// Order was added to book (no match)
    Resting { order: Order },
    /// Order was partially filled; the remainder rests
    PartiallyFilled { fills: Vec<Fill>, remaining: Order },
    /// Order was completely filled and never rested
    Filled { fills: Vec<Fill> },
}

impl SubmitResult {
    /// Fills in generation order
    pub fn fills(&self) -> &[Fill] {
        match self {
            SubmitResult::Resting { .. } => &[],
            SubmitResult::PartiallyFilled { fills, .. } | SubmitResult::Filled { fills } => fills,
        }
    }

    /// The resting remainder, if any
    pub fn resting(&self) -> Option<&Order> {
        match self {
            SubmitResult::Resting { order } => Some(order),
            SubmitResult::PartiallyFilled { remaining, .. } => Some(remaining),
            SubmitResult::Filled { .. } => None,
        }
    }

    /// Quantity left resting (zero when fully filled)
    pub fn resting_quantity(&self) -> Quantity {
        self.resting()
            .map_or(Quantity::zero(), |order| order.quantity)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, SubmitResult::Filled { .. })
    }
}

impl OrderBook<LogicalClock> {
    /// Create an empty book with default configuration and a logical clock
    pub fn new() -> Self {
        Self::with_config(BookConfig::default(), LogicalClock::default())
    }
}

impl Default for OrderBook<LogicalClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: PriorityClock> OrderBook<C> {
    /// Create an empty book with an injected configuration and clock
    pub fn with_config(config: BookConfig, clock: C) -> Self {
        info!(
            starting_sequence = config.starting_sequence,
            price_floor = ?config.price_floor,
            verify_invariants = config.verify_invariants,
            "OrderBook initialized"
        );

        Self {
            store: OrderStore::new(),
            bids: BidBook::new(),
            asks: AskBook::new(),
            executor: MatchExecutor::new(config.starting_sequence),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Stamp a new order with the book's clock and add it
    pub fn submit(
        &mut self,
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<SubmitResult, BookError> {
        // Validate before the clock ticks so rejected orders burn no priority
        self.validate_new(order_id, side, price, quantity)?;
        let entry_priority = self.clock.next_priority();
        self.add_order(Order::new(order_id, side, price, quantity, entry_priority))
    }

    /// Add an order: match it against the opposite side, rest any remainder
    pub fn add_order(&mut self, order: Order) -> Result<SubmitResult, BookError> {
        self.validate_new(order.order_id, order.side, order.price, order.quantity)?;

        debug!(
            order_id = %order.order_id,
            side = %order.side,
            price = %order.price,
            quantity = %order.quantity,
            entry_priority = order.entry_priority,
            "Order accepted"
        );

        let outcome = self.match_and_rest(order);
        self.audit_if_enabled();
        Ok(outcome)
    }

    /// Cancel a resting order
    ///
    /// Reports `OrderNotFound` for an absent id without touching the book.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Result<OrderCanceled, BookError> {
        let Some(order) = self.remove_resting(&order_id) else {
            warn!(order_id = %order_id, "Cancel rejected: order not found");
            return Err(BookError::OrderNotFound { order_id });
        };

        debug!(
            order_id = %order_id,
            side = %order.side,
            price = %order.price,
            unfilled_quantity = %order.quantity,
            "Order canceled"
        );

        self.audit_if_enabled();
        Ok(OrderCanceled::from(order))
    }

    /// Change the remaining quantity of a resting order
    pub fn amend_quantity(
        &mut self,
        order_id: OrderId,
        new_quantity: Quantity,
    ) -> Result<OrderAmended, BookError> {
        self.amend(order_id, Some(new_quantity), None)
    }

    /// Change the limit price of a resting order
    pub fn amend_price(&mut self, order_id: OrderId, new_price: Price) -> Result<OrderAmended, BookError> {
        self.amend(order_id, None, Some(new_price))
    }

    /// Change both quantity and price of a resting order
    pub fn amend_order(
        &mut self,
        order_id: OrderId,
        new_quantity: Quantity,
        new_price: Price,
    ) -> Result<OrderAmended, BookError> {
        self.amend(order_id, Some(new_quantity), Some(new_price))
    }

    /// Head of the bid side
    pub fn best_bid(&self) -> Option<&Order> {
        snapshot::head_of(&self.bids, &self.store)
    }

    /// Head of the ask side
    pub fn best_ask(&self) -> Option<&Order> {
        snapshot::head_of(&self.asks, &self.store)
    }

    pub fn best_bid_price(&self) -> Option<Price> {
        self.bids.best_price()
    }

    pub fn best_ask_price(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Best ask minus best bid, when both sides are populated
    pub fn spread(&self) -> Option<Decimal> {
        let bid = self.best_bid_price()?;
        let ask = self.best_ask_price()?;
        Some(ask.as_decimal() - bid.as_decimal())
    }

    pub fn top_of_book(&self) -> TopOfBook {
        TopOfBook {
            best_bid: self.best_bid().cloned(),
            best_ask: self.best_ask().cloned(),
        }
    }

    /// Full book, each side in priority order
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: snapshot::collect_side(&self.bids, &self.store),
            asks: snapshot::collect_side(&self.asks, &self.store),
        }
    }

    /// Aggregated quantity for the best `levels` price levels per side
    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        DepthSnapshot {
            bids: self.bids.depth_snapshot(levels),
            asks: self.asks.depth_snapshot(levels),
        }
    }

    pub fn get_order(&self, order_id: &OrderId) -> Option<&Order> {
        self.store.get(order_id)
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.store.contains(order_id)
    }

    /// Resting orders in no particular order
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.store.iter()
    }

    /// Number of resting orders
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Sequence the next fill will carry
    pub fn next_fill_sequence(&self) -> u64 {
        self.executor.next_sequence_number()
    }

    /// Verify store/side correspondence, level ordering and totals, and that
    /// the book is not crossed
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        audit::check_book(&self.bids, &self.asks, &self.store)
    }

    fn validate_new(
        &self,
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<(), BookError> {
        let reason = if quantity.is_zero() {
            Some(format!("order {order_id} has zero quantity"))
        } else if !self.config.accepts_price(price) {
            Some(format!("order {order_id} has unacceptable price {price}"))
        } else if !self.has_room_at(side, price, quantity, None) {
            Some(format!("order {order_id} would overflow the {side} level at {price}"))
        } else {
            None
        };

        if let Some(reason) = reason {
            warn!(order_id = %order_id, %reason, "Order rejected");
            return Err(BookError::InvalidOrder { reason });
        }

        if self.store.contains(&order_id) {
            warn!(order_id = %order_id, "Order rejected: duplicate id");
            return Err(BookError::DuplicateOrder { order_id });
        }

        Ok(())
    }

    fn amend(
        &mut self,
        order_id: OrderId,
        new_quantity: Option<Quantity>,
        new_price: Option<Price>,
    ) -> Result<OrderAmended, BookError> {
        if !self.store.contains(&order_id) {
            warn!(order_id = %order_id, "Amend rejected: order not found");
            return Err(BookError::OrderNotFound { order_id });
        }
        if let Some(quantity) = new_quantity.filter(|quantity| quantity.is_zero()) {
            warn!(order_id = %order_id, %quantity, "Amend rejected: invalid quantity");
            return Err(BookError::InvalidQuantity { quantity });
        }
        if let Some(price) = new_price.filter(|price| !self.config.accepts_price(*price)) {
            warn!(order_id = %order_id, %price, "Amend rejected: invalid price");
            return Err(BookError::InvalidPrice { price });
        }

        if let Some(current) = self.store.get(&order_id) {
            let quantity = new_quantity.unwrap_or(current.quantity);
            let price = new_price.unwrap_or(current.price);
            if !self.has_room_at(current.side, price, quantity, Some(current)) {
                warn!(order_id = %order_id, %quantity, %price, "Amend rejected: level total would overflow");
                return Err(BookError::InvalidQuantity { quantity });
            }
        }

        let Some(mut order) = self.remove_resting(&order_id) else {
            return Err(BookError::OrderNotFound { order_id });
        };
        let previous_price = order.price;
        let previous_quantity = order.quantity;

        if let Some(quantity) = new_quantity {
            order.quantity = quantity;
        }
        if let Some(price) = new_price {
            order.price = price;
        }

        // Resubmit through the add path, keeping the original entry priority
        let outcome = self.match_and_rest(order);

        debug!(
            order_id = %order_id,
            %previous_price,
            %previous_quantity,
            fills = outcome.fills().len(),
            resting_quantity = %outcome.resting_quantity(),
            "Order amended"
        );

        self.audit_if_enabled();
        Ok(OrderAmended {
            order_id,
            previous_price,
            previous_quantity,
            outcome,
        })
    }

    /// Cross against the opposite side, then rest whatever remains
    fn match_and_rest(&mut self, mut order: Order) -> SubmitResult {
        let fills = match order.side {
            Side::BUY => self
                .executor
                .match_incoming(&mut order, &mut self.asks, &mut self.store),
            Side::SELL => self
                .executor
                .match_incoming(&mut order, &mut self.bids, &mut self.store),
        };

        if order.is_filled() {
            return SubmitResult::Filled { fills };
        }

        self.rest(order.clone());
        debug!(
            order_id = %order.order_id,
            side = %order.side,
            price = %order.price,
            quantity = %order.quantity,
            "Order resting"
        );

        if fills.is_empty() {
            SubmitResult::Resting { order }
        } else {
            SubmitResult::PartiallyFilled {
                fills,
                remaining: order,
            }
        }
    }

    /// Headroom check on the side `order` would rest on
    ///
    /// An order that crosses never finds a level of its own at its price, so
    /// checking before matching is exact.
    fn has_room_at(&self, side: Side, price: Price, quantity: Quantity, replacing: Option<&Order>) -> bool {
        match side {
            Side::BUY => self.bids.has_room_at(price, quantity, replacing),
            Side::SELL => self.asks.has_room_at(price, quantity, replacing),
        }
    }

    fn rest(&mut self, order: Order) {
        match order.side {
            Side::BUY => self.bids.insert(&order),
            Side::SELL => self.asks.insert(&order),
        }
        self.store.insert(order);
    }

    /// Take a resting order out of both the store and its side
    fn remove_resting(&mut self, order_id: &OrderId) -> Option<Order> {
        let order = self.store.remove(order_id)?;
        let removed = match order.side {
            Side::BUY => self.bids.remove(&order),
            Side::SELL => self.asks.remove(&order),
        };
        if !removed {
            error!(order_id = %order_id, price = %order.price, "Stored order missing from its level");
        }
        Some(order)
    }

    fn audit_if_enabled(&self) {
        if !self.config.verify_invariants {
            return;
        }
        if let Err(violation) = self.check_invariants() {
            error!(%violation, "Book invariant violated");
        }
    }
}
