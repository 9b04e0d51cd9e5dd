//! Types library for the limit order book
//!
//! Core type definitions shared by the matching engine and anything that
//! consumes its output.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, TradeId)
//! - `numeric`: Price and Quantity newtypes
//! - `order`: Order and Side
//! - `trade`: Fill records
//! - `clock`: Entry-priority clocks
//! - `errors`: Error taxonomy

pub mod clock;
pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
