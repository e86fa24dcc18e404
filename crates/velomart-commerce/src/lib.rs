//! Multi-store commerce domain types and logic for Velomart.
//!
//! This crate is the client-side domain core of the Velomart shopping app:
//!
//! - **Cart**: multi-store shopping cart with line items, selection, and
//!   per-store grouping
//! - **Checkout**: the header/item row model consumed by the order list,
//!   shipping rate tables, and checkout totals
//! - **Catalog**: per-store stock records and availability classification
//!
//! Everything here is a pure, synchronous computation over in-memory data.
//! Fetching carts, stores, and stock is the surrounding app's job; this
//! crate turns what it fetched into display-ready structures.
//!
//! # Example
//!
//! ```rust,ignore
//! use velomart_commerce::prelude::*;
//!
//! let rows = build_checkout_rows(&cart.items, &stores, Some(&rate_table));
//! for row in &rows {
//!     match row {
//!         CheckoutRow::Header(h) => render_store_header(h),
//!         CheckoutRow::Item(item) => render_line_item(item),
//!     }
//! }
//! let summary = CheckoutSummary::from_rows(&rows, cart.currency)?;
//! println!("Total: {}", summary.grand_total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod store;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::store::Store;

    // Cart
    pub use crate::cart::{Cart, CartItem, CartSummary, StoreGroup, MAX_QUANTITY_PER_ITEM};

    // Checkout
    pub use crate::checkout::{
        apply_shipping, build_checkout_rows, haversine_km, CheckoutRow, CheckoutSummary, FlatRate,
        RateTable, ShippingRate, ShippingResolver, StoreHeader,
    };

    // Catalog
    pub use crate::catalog::{
        InventoryRecord, ProductStock, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD,
    };
}
