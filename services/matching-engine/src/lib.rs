//! Matching Engine
//!
//! Single-instrument limit order book with price-time priority matching,
//! cancellation, and amend-as-cancel-and-resubmit.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Store and book sides in one-to-one correspondence
//! - Book never left crossed after an operation
//! - Conservation of quantity (incoming = filled + resting)
//!
//! The book is a single-writer structure with no internal synchronization;
//! callers that share it serialize access themselves.

mod audit;
pub mod book;
pub mod config;
pub mod engine;
pub mod events;
pub mod matching;
pub mod snapshot;

pub use config::BookConfig;
pub use engine::{OrderBook, SubmitResult};
pub use events::{OrderAmended, OrderCanceled};
pub use snapshot::{BookSnapshot, DepthSnapshot, TopOfBook};
