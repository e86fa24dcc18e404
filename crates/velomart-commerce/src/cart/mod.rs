//! Shopping cart module.
//!
//! Contains the cart, its line items, and per-store grouping/summaries.

mod cart;
mod summary;

pub use cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
pub use summary::{CartSummary, StoreGroup};

pub(crate) use summary::partition_by_store;
