//! Property tests for the order book
//!
//! Drives books through random operation sequences and checks, after every
//! step, ordering, no-cross, store/side correspondence and quantity
//! conservation. Rejected operations must leave the book unchanged.

use matching_engine::{BookSnapshot, OrderBook};
use proptest::prelude::*;
use std::collections::HashSet;
use types::errors::BookError;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::{filled_quantity, Fill};

#[derive(Debug, Clone)]
enum Op {
    Add { id: u64, side: Side, price: u64, qty: u64 },
    Cancel { id: u64 },
    AmendQuantity { id: u64, qty: u64 },
    AmendPrice { id: u64, price: u64 },
    Amend { id: u64, qty: u64, price: u64 },
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::BUY), Just(Side::SELL)]
}

/// Ids are drawn from a small pool so duplicates and misses happen often;
/// zero prices and quantities exercise validation
fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (1u64..40, side(), 95u64..106, 1u64..20)
            .prop_map(|(id, side, price, qty)| Op::Add { id, side, price, qty }),
        1 => (1u64..40, 0u64..4)
            .prop_map(|(id, qty)| Op::Add { id, side: Side::BUY, price: 0, qty }),
        2 => (1u64..40).prop_map(|id| Op::Cancel { id }),
        2 => (1u64..40, 0u64..20).prop_map(|(id, qty)| Op::AmendQuantity { id, qty }),
        2 => (1u64..40, 0u64..110).prop_map(|(id, price)| Op::AmendPrice { id, price }),
        1 => (1u64..40, 0u64..20, 94u64..107)
            .prop_map(|(id, qty, price)| Op::Amend { id, qty, price }),
    ]
}

fn assert_book_shape(book: &OrderBook) -> Result<(), TestCaseError> {
    prop_assert_eq!(book.check_invariants(), Ok(()));

    let snapshot = book.snapshot();
    assert_ordering(&snapshot)?;

    // Store and sides in one-to-one correspondence
    prop_assert_eq!(snapshot.order_count(), book.len());
    let mut ids = HashSet::new();
    for order in snapshot.bids.iter().chain(snapshot.asks.iter()) {
        prop_assert!(ids.insert(order.order_id), "id {} listed twice", order.order_id);
        prop_assert!(!order.quantity.is_zero());
        prop_assert_eq!(book.get_order(&order.order_id), Some(order));
    }
    Ok(())
}

fn assert_ordering(snapshot: &BookSnapshot) -> Result<(), TestCaseError> {
    for pair in snapshot.bids.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        prop_assert!(
            a.price > b.price || (a.price == b.price && a.entry_priority < b.entry_priority),
            "bids out of order: {:?} before {:?}",
            a,
            b
        );
    }
    for pair in snapshot.asks.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        prop_assert!(
            a.price < b.price || (a.price == b.price && a.entry_priority < b.entry_priority),
            "asks out of order: {:?} before {:?}",
            a,
            b
        );
    }
    if let (Some(bid), Some(ask)) = (snapshot.bids.first(), snapshot.asks.first()) {
        prop_assert!(bid.price < ask.price, "crossed: {} >= {}", bid.price, ask.price);
    }
    Ok(())
}

fn assert_fills_from(fills: &[Fill], taker: OrderId) -> Result<(), TestCaseError> {
    for window in fills.windows(2) {
        prop_assert!(window[0].sequence < window[1].sequence);
    }
    for fill in fills {
        prop_assert_eq!(fill.taker_order_id, taker);
        prop_assert!(!fill.quantity.is_zero());
    }
    Ok(())
}

fn apply(book: &mut OrderBook, op: &Op) -> Result<(), TestCaseError> {
    let before = book.snapshot();

    match *op {
        Op::Add { id, side, price, qty } => {
            let order_id = OrderId::new(id);
            match book.submit(order_id, side, Price::from_u64(price), Quantity::new(qty)) {
                Ok(result) => {
                    assert_fills_from(result.fills(), order_id)?;
                    prop_assert_eq!(
                        filled_quantity(result.fills()) + result.resting_quantity(),
                        Quantity::new(qty)
                    );
                    prop_assert_eq!(book.contains(&order_id), !result.is_filled());
                }
                Err(err) => {
                    let expected = matches!(
                        err,
                        BookError::DuplicateOrder { .. } | BookError::InvalidOrder { .. }
                    );
                    prop_assert!(expected, "unexpected rejection: {:?}", err);
                    prop_assert_eq!(book.snapshot(), before);
                }
            }
        }
        Op::Cancel { id } => {
            let order_id = OrderId::new(id);
            let was_resting = book.contains(&order_id);
            match book.cancel_order(order_id) {
                Ok(canceled) => {
                    prop_assert!(was_resting);
                    prop_assert_eq!(canceled.order_id, order_id);
                    prop_assert!(!book.contains(&order_id));
                    prop_assert_eq!(book.len() + 1, before.order_count());
                }
                Err(err) => {
                    prop_assert!(!was_resting);
                    prop_assert_eq!(err, BookError::OrderNotFound { order_id });
                    prop_assert_eq!(book.snapshot(), before);
                }
            }
        }
        Op::AmendQuantity { id, qty } => {
            let result = book.amend_quantity(OrderId::new(id), Quantity::new(qty));
            check_amend(book, &before, id, Some(qty), result)?;
        }
        Op::AmendPrice { id, price } => {
            let result = book.amend_price(OrderId::new(id), Price::from_u64(price));
            check_amend(book, &before, id, None, result)?;
        }
        Op::Amend { id, qty, price } => {
            let result =
                book.amend_order(OrderId::new(id), Quantity::new(qty), Price::from_u64(price));
            check_amend(book, &before, id, Some(qty), result)?;
        }
    }

    assert_book_shape(book)
}

fn check_amend(
    book: &OrderBook,
    before: &BookSnapshot,
    id: u64,
    new_qty: Option<u64>,
    result: Result<matching_engine::OrderAmended, BookError>,
) -> Result<(), TestCaseError> {
    let order_id = OrderId::new(id);
    match result {
        Ok(amended) => {
            let original = before
                .bids
                .iter()
                .chain(before.asks.iter())
                .find(|order| order.order_id == order_id);
            prop_assert!(original.is_some());

            assert_fills_from(amended.outcome.fills(), order_id)?;
            let submitted = new_qty.map_or(amended.previous_quantity, Quantity::new);
            prop_assert_eq!(
                filled_quantity(amended.outcome.fills()) + amended.outcome.resting_quantity(),
                submitted
            );
            if let (Some(resting), Some(original)) = (book.get_order(&order_id), original) {
                prop_assert_eq!(resting.entry_priority, original.entry_priority);
            }
        }
        Err(_) => {
            prop_assert_eq!(&book.snapshot(), before);
        }
    }
    Ok(())
}

fn build(ops: &[Op]) -> Result<OrderBook, TestCaseError> {
    let mut book = OrderBook::new();
    for op in ops {
        apply(&mut book, op)?;
    }
    Ok(book)
}

/// Fill fields that do not depend on the randomly generated trade id
fn fill_key(fill: &Fill) -> (u64, OrderId, OrderId, Side, Price, Quantity) {
    (
        fill.sequence,
        fill.maker_order_id,
        fill.taker_order_id,
        fill.side,
        fill.price,
        fill.quantity,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_invariants_hold_for_random_operations(ops in prop::collection::vec(op(), 1..80)) {
        build(&ops)?;
    }

    #[test]
    fn prop_cancel_of_absent_id_is_inert(
        ops in prop::collection::vec(op(), 0..40),
        absent in 1_000u64..2_000,
    ) {
        let mut book = build(&ops)?;
        let before = book.snapshot();
        let sequence = book.next_fill_sequence();

        for _ in 0..2 {
            prop_assert_eq!(
                book.cancel_order(OrderId::new(absent)),
                Err(BookError::OrderNotFound { order_id: OrderId::new(absent) })
            );
        }
        prop_assert_eq!(book.snapshot(), before);
        prop_assert_eq!(book.next_fill_sequence(), sequence);
    }

    /// Amending a price equals canceling and submitting afresh at the new
    /// price with the original entry priority
    #[test]
    fn prop_amend_price_matches_fresh_submission(
        ops in prop::collection::vec(op(), 1..60),
        pick in any::<prop::sample::Index>(),
        new_price in 94u64..107,
    ) {
        let mut amended_book = build(&ops)?;
        let mut fresh_book = build(&ops)?;

        let mut resting: Vec<Order> = amended_book.orders().cloned().collect();
        prop_assume!(!resting.is_empty());
        resting.sort_by_key(|order| order.order_id);
        let target = pick.get(&resting).clone();

        let amended = amended_book
            .amend_price(target.order_id, Price::from_u64(new_price))
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        fresh_book
            .cancel_order(target.order_id)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let fresh = fresh_book
            .add_order(Order::new(
                target.order_id,
                target.side,
                Price::from_u64(new_price),
                target.quantity,
                target.entry_priority,
            ))
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        let amended_fills: Vec<_> = amended.outcome.fills().iter().map(fill_key).collect();
        let fresh_fills: Vec<_> = fresh.fills().iter().map(fill_key).collect();
        prop_assert_eq!(amended_fills, fresh_fills);
        prop_assert_eq!(amended.outcome.resting(), fresh.resting());
        prop_assert_eq!(amended_book.snapshot(), fresh_book.snapshot());
        assert_book_shape(&amended_book)?;
    }
}
