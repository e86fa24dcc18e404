//! Stock status classification.

use crate::ids::StoreId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Low-stock boundary used when a record carries no threshold of its own.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Availability of a product at one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    /// Comfortably above the low-stock threshold.
    InStock,
    /// Positive quantity at or below the threshold.
    LowStock,
    /// Nothing left.
    OutOfStock,
}

impl StockStatus {
    /// Classify a quantity against a low-stock threshold.
    ///
    /// Pure and total: zero (or less) is out of stock, anything up to and
    /// including the threshold is low, everything above is in stock.
    /// Negative quantities are a data-fetch validation problem, not this
    /// function's; they classify as out of stock.
    pub fn classify(quantity: i64, threshold: i64) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::OutOfStock => "out_of_stock",
        }
    }

    /// Label shown on the stock list.
    pub fn display_name(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In stock",
            StockStatus::LowStock => "Low stock",
            StockStatus::OutOfStock => "Out of stock",
        }
    }

    /// Whether the product can still be ordered.
    pub fn is_orderable(&self) -> bool {
        !matches!(self, StockStatus::OutOfStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the per-store stock list on the product screen.
///
/// Built through [`ProductStock::new`] so the status always agrees with the
/// quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductStock {
    /// Store holding the stock.
    pub store_id: StoreId,
    /// Store display name.
    pub store_name: String,
    /// Store street address.
    pub store_address: String,
    /// Units on hand.
    pub quantity: i64,
    /// Classification of `quantity`.
    pub status: StockStatus,
}

impl ProductStock {
    /// Create a record, classifying the quantity against the threshold.
    pub fn new(
        store_id: StoreId,
        store_name: impl Into<String>,
        store_address: impl Into<String>,
        quantity: i64,
        threshold: i64,
    ) -> Self {
        Self {
            store_id,
            store_name: store_name.into(),
            store_address: store_address.into(),
            quantity,
            status: StockStatus::classify(quantity, threshold),
        }
    }
}
