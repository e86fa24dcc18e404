//! Cart and cart item types.

use crate::error::CommerceError;
use crate::ids::{CartId, CartItemId, ProductId, StoreId, UserId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart, possibly spanning multiple stores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Owning user, when signed in.
    pub user_id: Option<UserId>,
    /// Items in the cart.
    pub items: Vec<CartItem>,
    /// Cart currency.
    pub currency: Currency,
    /// Additional metadata.
    pub metadata: serde_json::Value,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new() -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            user_id: None,
            items: Vec::new(),
            currency: Currency::VND,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a cart for a signed-in user.
    pub fn for_user(user_id: UserId) -> Self {
        let mut cart = Self::new();
        cart.user_id = Some(user_id);
        cart
    }

    /// Add an item to the cart.
    ///
    /// An existing entry for the same product from the same store has its
    /// quantity increased instead of a duplicate entry being added.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - Adding would exceed MAX_QUANTITY_PER_ITEM
    /// - Arithmetic overflow would occur
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        store_id: Option<StoreId>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<CartItemId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id && i.store_id == store_id)
        {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            existing.update_total()?;
            self.updated_at = current_timestamp();
            return Ok(existing.id.clone());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = CartItem::new(product_id, store_id, name, quantity, unit_price)?;
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Update item quantity.
    ///
    /// If quantity is <= 0, removes the item. Returns whether an item was
    /// found.
    pub fn update_quantity(
        &mut self,
        item_id: &CartItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(item_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.id == item_id) {
            item.quantity = quantity;
            item.update_total()?;
            self.updated_at = current_timestamp();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, item_id: &CartItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Tick or untick an item's checkbox. Returns whether it was found.
    pub fn set_selected(&mut self, item_id: &CartItemId, selected: bool) -> bool {
        if let Some(item) = self.items.iter_mut().find(|i| &i.id == item_id) {
            item.selected = selected;
            self.updated_at = current_timestamp();
            true
        } else {
            false
        }
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Items currently ticked for checkout.
    pub fn selected_items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter().filter(|i| i.selected)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of cart entries.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of distinct stores among the items.
    pub fn store_count(&self) -> usize {
        let mut seen: Vec<&StoreId> = Vec::new();
        for item in &self.items {
            if let Some(sid) = &item.store_id {
                if !seen.contains(&sid) {
                    seen.push(sid);
                }
            }
        }
        seen.len()
    }

    /// Whether the cart spans more than one store.
    pub fn is_multi_store(&self) -> bool {
        self.store_count() > 1
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get_item(&self, item_id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == item_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// One product entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Unique cart item identifier.
    pub id: CartItemId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Store the item ships from. `None` when the backing product has been
    /// delisted and no longer resolves to a store.
    pub store_id: Option<StoreId>,
    /// Product name (denormalized for display).
    pub name: String,
    /// Quantity.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// Total price (unit_price * quantity).
    pub total_price: Money,
    /// First product image, when available.
    pub image_url: Option<String>,
    /// Checkbox state; only selected items proceed to checkout.
    pub selected: bool,
}

impl CartItem {
    /// Create a new cart item. New items start selected.
    pub fn new(
        product_id: ProductId,
        store_id: Option<StoreId>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, CommerceError> {
        let total_price = unit_price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            id: CartItemId::generate(),
            product_id,
            store_id,
            name: name.into(),
            quantity,
            unit_price,
            total_price,
            image_url: None,
            selected: true,
        })
    }

    /// Recompute the cached total from the current quantity.
    pub fn update_total(&mut self) -> Result<(), CommerceError> {
        self.total_price = self
            .unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
