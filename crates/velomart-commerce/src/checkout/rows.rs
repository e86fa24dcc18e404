//! Checkout row model.
//!
//! The order screen renders a flat list that interleaves store headers with
//! the items below them. Modeling the row as a sum type keeps illegal
//! states (an item row carrying a store total) unrepresentable.

use crate::cart::CartItem;
use crate::ids::StoreId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One entry of the checkout list: a store header or a line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CheckoutRow {
    /// Section header for one store's group of items.
    Header(StoreHeader),
    /// A single cart item.
    Item(CartItem),
}

impl CheckoutRow {
    /// Create a header row for a store.
    pub fn header(store_id: StoreId, store_name: impl Into<String>) -> Self {
        Self::Header(StoreHeader::new(store_id, store_name))
    }

    /// Create an item row.
    pub fn item(item: CartItem) -> Self {
        Self::Item(item)
    }

    /// The store this row belongs to.
    ///
    /// For item rows the ID is derived from the embedded item and is `None`
    /// when the item has no backing store.
    pub fn store_id(&self) -> Option<&StoreId> {
        match self {
            Self::Header(h) => Some(&h.store_id),
            Self::Item(item) => item.store_id.as_ref(),
        }
    }

    /// Whether this is a header row.
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header(_))
    }

    /// Whether this is an item row.
    pub fn is_item(&self) -> bool {
        matches!(self, Self::Item(_))
    }

    /// The header, when this is a header row.
    pub fn as_header(&self) -> Option<&StoreHeader> {
        match self {
            Self::Header(h) => Some(h),
            Self::Item(_) => None,
        }
    }

    /// The item, when this is an item row.
    pub fn as_item(&self) -> Option<&CartItem> {
        match self {
            Self::Header(_) => None,
            Self::Item(item) => Some(item),
        }
    }
}

/// Header row for one store's group.
///
/// Distance, fee, and total start out `None` ("pending") and are attached
/// once, right after construction, via the two setters. The display layer
/// shows pending fields as "calculating" rather than zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreHeader {
    /// Store identifier.
    pub store_id: StoreId,
    /// Store display name; empty when the store is unknown to the caller's
    /// metadata map.
    pub store_name: String,
    /// Distance from the customer in km, once resolved.
    pub distance_km: Option<f64>,
    /// Shipping fee for this store's parcel, once resolved.
    pub shipping_fee: Option<Money>,
    /// Sum of this store's item totals.
    pub store_total: Option<Money>,
}

impl StoreHeader {
    /// Create a header with all aggregates pending.
    pub fn new(store_id: StoreId, store_name: impl Into<String>) -> Self {
        Self {
            store_id,
            store_name: store_name.into(),
            distance_km: None,
            shipping_fee: None,
            store_total: None,
        }
    }

    /// Attach the resolved distance and shipping fee.
    pub fn set_shipping(&mut self, distance_km: f64, shipping_fee: Money) {
        self.distance_km = Some(distance_km);
        self.shipping_fee = Some(shipping_fee);
    }

    /// Attach the computed store total.
    pub fn set_store_total(&mut self, store_total: Money) {
        self.store_total = Some(store_total);
    }

    /// Whether the shipping fee is still being resolved.
    pub fn shipping_pending(&self) -> bool {
        self.shipping_fee.is_none()
    }
}

/// Attach a late-arriving shipping estimate to the matching header row.
///
/// Fee estimation answers after the rows are built and on every address
/// change; this locates the store's header and applies `set_shipping`.
/// Returns whether a header was updated.
pub fn apply_shipping(
    rows: &mut [CheckoutRow],
    store_id: &StoreId,
    distance_km: f64,
    fee: Money,
) -> bool {
    for row in rows.iter_mut() {
        if let CheckoutRow::Header(header) = row {
            if &header.store_id == store_id {
                header.set_shipping(distance_km, fee);
                return true;
            }
        }
    }
    false
}
