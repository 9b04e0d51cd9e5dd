//! Order book configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::numeric::Price;

/// Errors raised while loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid book configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for an order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Sequence number carried by the first fill
    pub starting_sequence: u64,
    /// Lowest acceptable limit price; prices must be positive regardless
    pub price_floor: Option<Price>,
    /// Audit book invariants after every mutating operation
    pub verify_invariants: bool,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            starting_sequence: 1,
            price_floor: None,
            verify_invariants: false,
        }
    }
}

impl BookConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a limit price passes validation
    pub fn accepts_price(&self, price: Price) -> bool {
        price.is_positive() && self.price_floor.map_or(true, |floor| price >= floor)
    }
}
