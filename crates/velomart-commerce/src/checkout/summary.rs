//! Checkout totals.

use crate::checkout::rows::CheckoutRow;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Totals for the checkout footer, computed from the built row sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSummary {
    /// Sum of item totals across all store groups.
    pub subtotal: Money,
    /// Sum of the resolved header fees.
    pub shipping_total: Money,
    /// Subtotal plus shipping.
    pub grand_total: Money,
    /// Number of store headers.
    pub store_count: usize,
    /// Number of item rows.
    pub item_count: usize,
    /// Headers whose fee is still unresolved; their share is missing from
    /// `shipping_total` until the estimate arrives.
    pub pending_fees: usize,
}

impl CheckoutSummary {
    /// Walk the rows once and total them up.
    ///
    /// Items without a backing store are counted but priced into no total.
    pub fn from_rows(rows: &[CheckoutRow], currency: Currency) -> Result<Self, CommerceError> {
        let mut subtotal = Money::zero(currency);
        let mut shipping_total = Money::zero(currency);
        let mut store_count = 0usize;
        let mut item_count = 0usize;
        let mut pending_fees = 0usize;

        for row in rows {
            match row {
                CheckoutRow::Header(header) => {
                    store_count += 1;
                    match &header.shipping_fee {
                        Some(fee) => shipping_total = checked_add(shipping_total, fee)?,
                        None => pending_fees += 1,
                    }
                }
                CheckoutRow::Item(item) => {
                    item_count += 1;
                    if item.store_id.is_some() {
                        subtotal = checked_add(subtotal, &item.total_price)?;
                    }
                }
            }
        }

        let grand_total = checked_add(subtotal, &shipping_total)?;

        Ok(Self {
            subtotal,
            shipping_total,
            grand_total,
            store_count,
            item_count,
            pending_fees,
        })
    }

    /// Whether any store's fee is still being resolved.
    pub fn shipping_pending(&self) -> bool {
        self.pending_fees > 0
    }
}

fn checked_add(acc: Money, value: &Money) -> Result<Money, CommerceError> {
    if value.currency != acc.currency {
        return Err(CommerceError::CurrencyMismatch {
            expected: acc.currency.code().to_string(),
            got: value.currency.code().to_string(),
        });
    }
    acc.try_add(value).ok_or(CommerceError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::checkout::builder::build_checkout_rows;
    use crate::checkout::rows::apply_shipping;
    use crate::ids::{ProductId, StoreId};
    use crate::store::Store;
    use std::collections::HashMap;

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

    fn two_store_rows() -> Vec<CheckoutRow> {
        let items = vec![
            item("bike-1", Some("a"), 2, 1000),
            item("helmet-1", Some("b"), 1, 500),
        ];
        let stores: HashMap<StoreId, Store> = [("a", "Shop A"), ("b", "Shop B")]
            .iter()
            .map(|(id, name)| {
                let id = StoreId::new(*id);
                (id.clone(), Store::new(id, *name))
            })
            .collect();
        build_checkout_rows(&items, &stores, None)
    }

    #[test]
    fn test_totals_before_shipping_resolves() {
        let rows = two_store_rows();
        let summary = CheckoutSummary::from_rows(&rows, Currency::VND).unwrap();

        assert_eq!(summary.subtotal, vnd(2500));
        assert_eq!(summary.shipping_total, vnd(0));
        assert_eq!(summary.grand_total, vnd(2500));
        assert_eq!(summary.store_count, 2);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.pending_fees, 2);
        assert!(summary.shipping_pending());
    }

    #[test]
    fn test_totals_after_shipping_resolves() {
        let mut rows = two_store_rows();
        apply_shipping(&mut rows, &StoreId::new("a"), 4.0, vnd(20000));
        apply_shipping(&mut rows, &StoreId::new("b"), 7.0, vnd(30000));

        let summary = CheckoutSummary::from_rows(&rows, Currency::VND).unwrap();
        assert_eq!(summary.shipping_total, vnd(50000));
        assert_eq!(summary.grand_total, vnd(52500));
        assert!(!summary.shipping_pending());
    }

    #[test]
    fn test_subtotal_matches_store_totals() {
        let rows = two_store_rows();
        let summary = CheckoutSummary::from_rows(&rows, Currency::VND).unwrap();

        let header_sum = rows
            .iter()
            .filter_map(|r| r.as_header())
            .filter_map(|h| h.store_total)
            .fold(Money::zero(Currency::VND), |acc, t| acc + t);
        assert_eq!(summary.subtotal, header_sum);
    }

    #[test]
    fn test_storeless_items_counted_but_unpriced() {
        let items = vec![
            item("bike-1", Some("a"), 1, 1000),
            item("ghost", None, 1, 999),
        ];
        let stores: HashMap<StoreId, Store> = HashMap::new();
        let rows = build_checkout_rows(&items, &stores, None);

        let summary = CheckoutSummary::from_rows(&rows, Currency::VND).unwrap();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal, vnd(1000));
    }

    #[test]
    fn test_empty_rows() {
        let summary = CheckoutSummary::from_rows(&[], Currency::VND).unwrap();
        assert!(summary.subtotal.is_zero());
        assert_eq!(summary.store_count, 0);
        assert!(!summary.shipping_pending());
    }
}
