//! Checkout row builder.
//!
//! Turns the flat list of cart items into the header/item row sequence the
//! order screen renders: one header per store, followed by that store's
//! items, with per-store totals and shipping attached to the header.

use crate::cart::{partition_by_store, CartItem};
use crate::checkout::rows::{CheckoutRow, StoreHeader};
use crate::checkout::shipping::ShippingResolver;
use crate::ids::StoreId;
use crate::money::Money;
use crate::store::Store;
use std::collections::HashMap;

/// Build the ordered row sequence for the checkout screen.
///
/// Stores appear in first-seen order of the items' store IDs; each store
/// contributes one header followed by its items in their original relative
/// order. The header's `store_total` is the sum of its items' totals, and
/// its shipping fields are attached when the store's distance is known and
/// a fee can be resolved (the `resolver` first, falling back to a fee
/// already recorded on the store).
///
/// The builder never fails: unknown store IDs produce a header with an
/// empty name, unresolved distance or fee leaves the header's shipping
/// fields pending, and items without a backing store are emitted as a
/// headerless run where their first item appeared, contributing to no
/// total. Stores without items produce no rows.
pub fn build_checkout_rows(
    items: &[CartItem],
    stores: &HashMap<StoreId, Store>,
    resolver: Option<&dyn ShippingResolver>,
) -> Vec<CheckoutRow> {
    let groups = partition_by_store(items);
    let mut rows = Vec::with_capacity(items.len() + groups.len());
    let mut store_count = 0usize;

    for (key, group_items) in groups {
        if let Some(store_id) = key {
            store_count += 1;
            let store = stores.get(store_id);
            let store_name = store.map(|s| s.name.clone()).unwrap_or_default();
            let mut header = StoreHeader::new(store_id.clone(), store_name);

            if let Some(distance_km) = store.and_then(|s| s.distance_km) {
                let fee = resolver
                    .and_then(|r| r.fee_for(store_id, distance_km))
                    .or(store.and_then(|s| s.shipping_fee));
                if let Some(fee) = fee {
                    header.set_shipping(distance_km, fee);
                }
            }

            if let Some(total) = group_total(&group_items) {
                header.set_store_total(total);
            }

            rows.push(CheckoutRow::Header(header));
        }

        rows.extend(group_items.into_iter().cloned().map(CheckoutRow::Item));
    }

    tracing::debug!(rows = rows.len(), stores = store_count, "checkout rows built");
    rows
}

/// Sum a group's item totals. Groups are never empty, so the first item's
/// currency anchors the sum; `None` only on overflow.
fn group_total(items: &[&CartItem]) -> Option<Money> {
    let currency = items.first()?.total_price.currency;
    Money::try_sum(items.iter().map(|i| &i.total_price), currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn vnd(amount: i64) -> Money {
        Money::new(amount, Currency::VND)
    }

    fn item(product: &str, store: Option<&str>, quantity: i64, unit_price: i64) -> CartItem {
        CartItem::new(
            ProductId::new(product),
            store.map(StoreId::new),
            product,
            quantity,
            vnd(unit_price),
        )
        .unwrap()
    }

    fn store_map(entries: &[(&str, &str)]) -> HashMap<StoreId, Store> {
        entries
            .iter()
            .map(|(id, name)| {
                let id = StoreId::new(*id);
                (id.clone(), Store::new(id, *name))
            })
            .collect()
    }

    #[test]
    fn test_groups_headed_and_totaled() {
        // Interleaved stores: A, B, A
        let items = vec![
            item("bike-1", Some("a"), 2, 10),
            item("helmet-1", Some("b"), 1, 5),
            item("lock-1", Some("a"), 1, 10),
        ];
        let stores = store_map(&[("a", "Shop A"), ("b", "Shop B")]);

        let rows = build_checkout_rows(&items, &stores, None);

        assert_eq!(rows.len(), 5);

        let header_a = rows[0].as_header().unwrap();
        assert_eq!(header_a.store_name, "Shop A");
        assert_eq!(header_a.store_total, Some(vnd(30)));
        assert!(header_a.shipping_pending());

        assert_eq!(rows[1].as_item().unwrap().name, "bike-1");
        assert_eq!(rows[2].as_item().unwrap().name, "lock-1");

        let header_b = rows[3].as_header().unwrap();
        assert_eq!(header_b.store_name, "Shop B");
        assert_eq!(header_b.store_total, Some(vnd(5)));

        assert_eq!(rows[4].as_item().unwrap().name, "helmet-1");
    }

    #[test]
    fn test_item_rows_follow_their_header() {
        let items = vec![
            item("bike-1", Some("a"), 1, 10),
            item("helmet-1", Some("b"), 1, 5),
            item("lock-1", Some("a"), 1, 10),
            item("bell-1", Some("b"), 2, 3),
        ];
        let stores = store_map(&[("a", "Shop A"), ("b", "Shop B")]);

        let rows = build_checkout_rows(&items, &stores, None);

        // Every item row derives the store of the nearest preceding header
        let mut current_header: Option<StoreId> = None;
        for row in &rows {
            match row {
                CheckoutRow::Header(h) => current_header = Some(h.store_id.clone()),
                CheckoutRow::Item(i) => {
                    assert_eq!(i.store_id, current_header);
                }
            }
        }
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let items = vec![
            item("bike-1", Some("a"), 1, 10),
            item("helmet-1", Some("b"), 1, 5),
        ];
        let stores = store_map(&[("a", "Shop A"), ("b", "Shop B")]);

        let first = build_checkout_rows(&items, &stores, None);
        let second = build_checkout_rows(&items, &stores, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_store_without_items_emits_nothing() {
        let items = vec![item("bike-1", Some("a"), 1, 10)];
        let stores = store_map(&[("a", "Shop A"), ("empty", "Shop Empty")]);

        let rows = build_checkout_rows(&items, &stores, None);

        assert_eq!(rows.len(), 2);
        assert!(rows
            .iter()
            .all(|r| r.store_id() != Some(&StoreId::new("empty"))));
    }

    #[test]
    fn test_unknown_store_gets_empty_name() {
        let items = vec![item("bike-1", Some("mystery"), 1, 10)];
        let stores = store_map(&[]);

        let rows = build_checkout_rows(&items, &stores, None);

        let header = rows[0].as_header().unwrap();
        assert_eq!(header.store_name, "");
        assert_eq!(header.store_total, Some(vnd(10)));
    }

    #[test]
    fn test_storeless_items_stay_in_place() {
        let items = vec![
            item("bike-1", Some("a"), 1, 10),
            item("ghost-1", None, 1, 999),
            item("ghost-2", None, 1, 999),
        ];
        let stores = store_map(&[("a", "Shop A")]);

        let rows = build_checkout_rows(&items, &stores, None);

        // Header, its item, then the headerless run
        assert_eq!(rows.len(), 4);
        assert!(rows[0].is_header());
        assert_eq!(rows[2].store_id(), None);
        assert_eq!(rows[3].store_id(), None);

        // The storeless run never inflates a store total
        assert_eq!(rows[0].as_header().unwrap().store_total, Some(vnd(10)));
    }

    #[test]
    fn test_resolver_attaches_shipping() {
        let items = vec![item("bike-1", Some("a"), 1, 10)];
        let mut stores = store_map(&[("a", "Shop A")]);
        stores
            .get_mut(&StoreId::new("a"))
            .unwrap()
            .set_distance(4.0);

        let resolver = |_: &StoreId, distance_km: f64| -> Option<Money> {
            Some(vnd((distance_km * 5000.0) as i64))
        };
        let rows = build_checkout_rows(&items, &stores, Some(&resolver));

        let header = rows[0].as_header().unwrap();
        assert_eq!(header.distance_km, Some(4.0));
        assert_eq!(header.shipping_fee, Some(vnd(20000)));
    }

    #[test]
    fn test_unresolved_distance_leaves_shipping_pending() {
        let items = vec![item("bike-1", Some("a"), 1, 10)];
        let stores = store_map(&[("a", "Shop A")]);

        // Resolver available but distance unknown: both fields stay unset
        let resolver = |_: &StoreId, _: f64| -> Option<Money> { Some(vnd(5000)) };
        let rows = build_checkout_rows(&items, &stores, Some(&resolver));

        let header = rows[0].as_header().unwrap();
        assert_eq!(header.distance_km, None);
        assert_eq!(header.shipping_fee, None);
    }

    #[test]
    fn test_declining_resolver_falls_back_to_store_fee() {
        let items = vec![item("bike-1", Some("a"), 1, 10)];
        let mut stores = store_map(&[("a", "Shop A")]);
        let store = stores.get_mut(&StoreId::new("a")).unwrap();
        store.set_distance(4.0);
        store.shipping_fee = Some(vnd(15000));

        let resolver = |_: &StoreId, _: f64| -> Option<Money> { None };
        let rows = build_checkout_rows(&items, &stores, Some(&resolver));

        let header = rows[0].as_header().unwrap();
        assert_eq!(header.shipping_fee, Some(vnd(15000)));
    }

    #[test]
    fn test_worked_example() {
        // items [{A, qty 2, price 10}, {B, qty 1, price 5}, {A, qty 1, price 10}]
        let items = vec![
            item("p1", Some("a"), 2, 10),
            item("p2", Some("b"), 1, 5),
            item("p3", Some("a"), 1, 10),
        ];
        let stores = store_map(&[("a", "Shop A"), ("b", "Shop B")]);

        let rows = build_checkout_rows(&items, &stores, None);

        let expected: Vec<(bool, Option<&str>)> = vec![
            (true, Some("a")),
            (false, Some("a")),
            (false, Some("a")),
            (true, Some("b")),
            (false, Some("b")),
        ];
        let actual: Vec<(bool, Option<&str>)> = rows
            .iter()
            .map(|r| (r.is_header(), r.store_id().map(StoreId::as_str)))
            .collect();
        assert_eq!(actual, expected);

        assert_eq!(rows[0].as_header().unwrap().store_total, Some(vnd(30)));
        assert!(rows[0].as_header().unwrap().shipping_fee.is_none());
        assert_eq!(rows[1].as_item().unwrap().quantity, 2);
        assert_eq!(rows[3].as_header().unwrap().store_total, Some(vnd(5)));
    }
}
