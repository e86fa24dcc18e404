//! Checkout module.
//!
//! Contains the header/item row model the order screen renders, the row
//! builder, shipping rates and distance, and checkout totals.

mod builder;
mod rows;
mod shipping;
mod summary;

pub use builder::build_checkout_rows;
pub use rows::{apply_shipping, CheckoutRow, StoreHeader};
pub use shipping::{haversine_km, FlatRate, RateTable, ShippingRate, ShippingResolver};
pub use summary::CheckoutSummary;
