//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in commerce operations.
///
/// Absent data (unresolved distance, unknown store, pending fee) is modeled
/// with `Option`, not errors; these variants cover genuine caller misuse.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Insufficient stock at a store.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Shipping rate band with an inverted or negative range.
    #[error("Invalid shipping rate band: {band}")]
    InvalidRateBand { band: String },

    /// Shipping rate band overlapping an existing active band.
    #[error("Shipping rate band {band} overlaps existing band {existing}")]
    RateBandOverlap { band: String, existing: String },
}
