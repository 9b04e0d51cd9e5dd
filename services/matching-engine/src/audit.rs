//! Structural audit of the book
//!
//! Checks that the store and both sides agree one-to-one, that every level is
//! in time priority with a correct cached total, and that the book is not
//! crossed. Price ordering across levels comes from the `BTreeMap` itself.

use std::collections::HashSet;
use types::errors::InvariantViolation;
use types::ids::OrderId;
use types::numeric::Quantity;

use crate::book::{AskBook, BidBook, BookSide, OrderStore};
use crate::matching::crossing;

pub(crate) fn check_book(
    bids: &BidBook,
    asks: &AskBook,
    store: &OrderStore,
) -> Result<(), InvariantViolation> {
    let mut seen = HashSet::with_capacity(store.len());
    check_side(bids, store, &mut seen)?;
    check_side(asks, store, &mut seen)?;

    if let Some(order) = store.iter().find(|order| !seen.contains(&order.order_id)) {
        return Err(InvariantViolation::MissingFromLevels {
            order_id: order.order_id,
        });
    }

    if let (Some(bid), Some(ask)) = (bids.best_price(), asks.best_price()) {
        if crossing::can_match(bid, ask) {
            return Err(InvariantViolation::Crossed { bid, ask });
        }
    }

    Ok(())
}

fn check_side<B: BookSide>(
    side: &B,
    store: &OrderStore,
    seen: &mut HashSet<OrderId>,
) -> Result<(), InvariantViolation> {
    for (&price, level) in side.levels().iter() {
        if level.is_empty() {
            return Err(InvariantViolation::EmptyLevel {
                side: side.side(),
                price,
            });
        }

        let mut actual = Quantity::zero();
        let mut last_priority = None;

        for (order_id, entry_priority) in level.entries() {
            if !seen.insert(order_id) {
                return Err(InvariantViolation::DuplicateEntry { order_id });
            }

            let order = store
                .get(&order_id)
                .ok_or_else(|| InvariantViolation::MissingFromStore {
                    side: side.side(),
                    order_id,
                })?;

            if order.side != side.side() || order.price != price {
                return Err(InvariantViolation::WrongLevel {
                    order_id,
                    side: side.side(),
                    level: price,
                    price: order.price,
                });
            }
            if order.quantity.is_zero() {
                return Err(InvariantViolation::EmptyOrder { order_id });
            }
            if order.entry_priority != entry_priority
                || last_priority.is_some_and(|last| entry_priority < last)
            {
                return Err(InvariantViolation::TimePriority {
                    side: side.side(),
                    price,
                    order_id,
                });
            }

            last_priority = Some(entry_priority);
            actual = actual.checked_add(order.quantity).ok_or_else(|| {
                InvariantViolation::LevelOverflow {
                    side: side.side(),
                    price,
                }
            })?;
        }

        if actual != level.total_quantity() {
            return Err(InvariantViolation::LevelTotal {
                side: side.side(),
                price,
                cached: level.total_quantity(),
                actual,
            });
        }
    }

    Ok(())
}
