//! Per-store inventory records.

use crate::catalog::stock::{ProductStock, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::error::CommerceError;
use crate::ids::{ProductId, StoreId};
use crate::store::Store;
use serde::{Deserialize, Serialize};

/// Stock of one product at one store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    /// The product.
    pub product_id: ProductId,
    /// The store holding it.
    pub store_id: StoreId,
    /// Units on hand.
    pub quantity: i64,
    /// Per-record low-stock boundary; falls back to
    /// [`DEFAULT_LOW_STOCK_THRESHOLD`].
    pub low_stock_threshold: Option<i64>,
}

impl InventoryRecord {
    /// Create a record with the default threshold.
    pub fn new(product_id: ProductId, store_id: StoreId, quantity: i64) -> Self {
        Self {
            product_id,
            store_id,
            quantity,
            low_stock_threshold: None,
        }
    }

    /// The effective low-stock threshold.
    pub fn threshold(&self) -> i64 {
        self.low_stock_threshold
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    /// Current availability classification.
    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.quantity, self.threshold())
    }

    /// Whether the requested quantity can be fulfilled.
    pub fn is_available(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }

    /// Take stock out for an order.
    pub fn reduce(&mut self, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !self.is_available(quantity) {
            return Err(CommerceError::InsufficientStock {
                product_id: self.product_id.as_str().to_string(),
                requested: quantity,
                available: self.quantity,
            });
        }
        self.quantity -= quantity;
        Ok(())
    }

    /// Put stock back (restock or order cancellation).
    pub fn restock(&mut self, quantity: i64) {
        self.quantity += quantity.max(0);
    }

    /// Render this record as a stock-list row using the store's metadata.
    pub fn to_product_stock(&self, store: &Store) -> ProductStock {
        ProductStock::new(
            self.store_id.clone(),
            store.name.clone(),
            store.address.clone().unwrap_or_default(),
            self.quantity,
            self.threshold(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(quantity: i64) -> InventoryRecord {
        InventoryRecord::new(ProductId::new("bike-1"), StoreId::new("store-1"), quantity)
    }

    #[test]
    fn test_reduce_and_restock() {
        let mut inv = record(10);
        inv.reduce(3).unwrap();
        assert_eq!(inv.quantity, 7);

        inv.restock(5);
        assert_eq!(inv.quantity, 12);
    }

    #[test]
    fn test_reduce_insufficient() {
        let mut inv = record(2);
        let err = inv.reduce(3).unwrap_err();
        assert!(matches!(err, CommerceError::InsufficientStock { .. }));
        assert_eq!(inv.quantity, 2);
    }

    #[test]
    fn test_reduce_rejects_non_positive() {
        let mut inv = record(2);
        assert!(inv.reduce(0).is_err());
    }

    #[test]
    fn test_availability() {
        let inv = record(5);
        assert!(inv.is_available(5));
        assert!(!inv.is_available(6));
    }

    #[test]
    fn test_status_tracks_quantity() {
        let mut inv = record(20);
        assert_eq!(inv.status(), StockStatus::InStock);

        inv.reduce(15).unwrap();
        assert_eq!(inv.status(), StockStatus::LowStock);

        inv.reduce(5).unwrap();
        assert_eq!(inv.status(), StockStatus::OutOfStock);
    }

    #[test]
    fn test_custom_threshold() {
        let mut inv = record(5);
        inv.low_stock_threshold = Some(3);
        assert_eq!(inv.status(), StockStatus::InStock);
    }

    #[test]
    fn test_to_product_stock() {
        let inv = record(7);
        let store = Store::new(StoreId::new("store-1"), "Velomart Quận 1")
            .with_address("12 Nguyễn Huệ");

        let stock = inv.to_product_stock(&store);
        assert_eq!(stock.store_name, "Velomart Quận 1");
        assert_eq!(stock.store_address, "12 Nguyễn Huệ");
        assert_eq!(stock.status, StockStatus::LowStock);
    }
}
