//! Per-store cart grouping and summaries.

use crate::cart::{Cart, CartItem};
use crate::error::CommerceError;
use crate::ids::StoreId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The items of one store, with their subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreGroup {
    /// Store the group belongs to; `None` for items whose backing product
    /// no longer resolves to a store.
    pub store_id: Option<StoreId>,
    /// The store's items, in cart order.
    pub items: Vec<CartItem>,
    /// Sum of the items' totals. `None` for the store-less group and on
    /// overflow.
    pub store_total: Option<Money>,
}

/// Cart-level aggregates across all store groups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Number of distinct stores with selected items.
    pub total_stores: usize,
    /// Number of selected cart entries.
    pub total_items: usize,
    /// Sum of all store totals.
    pub grand_total: Money,
    /// Whether checkout will span more than one store.
    pub is_multi_store: bool,
}

impl Cart {
    /// Partition the selected items into per-store groups.
    ///
    /// Groups appear in first-seen order of their store IDs. Items without
    /// a store collect into a single group with `store_id: None` at the
    /// position its first item was seen; that group carries no total.
    pub fn group_by_store(&self) -> Vec<StoreGroup> {
        partition_by_store(self.selected_items())
            .into_iter()
            .map(|(store_id, items)| {
                let store_total = store_id.and_then(|_| {
                    Money::try_sum(items.iter().map(|i| &i.total_price), self.currency)
                });
                StoreGroup {
                    store_id: store_id.cloned(),
                    items: items.into_iter().cloned().collect(),
                    store_total,
                }
            })
            .collect()
    }

    /// Aggregate the selected items into a cart summary.
    ///
    /// Items without a store never contribute to `grand_total`. Returns an
    /// error only on arithmetic overflow.
    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        let groups = self.group_by_store();
        let total_stores = groups.iter().filter(|g| g.store_id.is_some()).count();
        let total_items = groups.iter().map(|g| g.items.len()).sum();

        let mut grand_total = Money::zero(self.currency);
        for total in groups.iter().filter_map(|g| g.store_total.as_ref()) {
            grand_total = grand_total.try_add(total).ok_or(CommerceError::Overflow)?;
        }

        tracing::debug!(
            stores = total_stores,
            items = total_items,
            "cart summary computed"
        );

        Ok(CartSummary {
            total_stores,
            total_items,
            grand_total,
            is_multi_store: total_stores > 1,
        })
    }
}

/// Partition items by store, preserving first-seen order of store IDs and
/// the items' relative order inside each group.
///
/// Items without a store share the single `None` key.
pub(crate) fn partition_by_store<'a, I>(items: I) -> Vec<(Option<&'a StoreId>, Vec<&'a CartItem>)>
where
    I: IntoIterator<Item = &'a CartItem>,
{
    let mut groups: Vec<(Option<&'a StoreId>, Vec<&'a CartItem>)> = Vec::new();
    for item in items {
        let key = item.store_id.as_ref();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((key, vec![item])),
        }
    }
    groups
}
