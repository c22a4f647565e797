use crate::domain::product::{Price, Product};
use crate::error::{Result, ShopError};
use serde::{Deserialize, Serialize};

/// A product snapshot copied into the cart at add-time.
///
/// Snapshotting means later catalog edits (price changes, deletions) never
/// retroactively change a cart or an order built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: Price,
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
        }
    }
}

/// A user's in-progress selection. Insertion-ordered, duplicates allowed;
/// the display index shown to the user is this order, 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn add(&mut self, product: &Product) {
        self.items.push(CartItem::from(product));
    }

    /// Removes the item at the given 0-based position.
    pub fn remove(&mut self, index: usize) -> Result<CartItem> {
        if index < self.items.len() {
            Ok(self.items.remove(index))
        } else {
            Err(ShopError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> i64 {
        self.items.iter().map(|item| item.price.value()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, id.to_uppercase(), price).unwrap()
    }

    #[test]
    fn test_total_tracks_items() {
        let mut cart = Cart::default();
        assert_eq!(cart.total(), 0);

        cart.add(&product("apple", 50));
        cart.add(&product("banana", 70));
        cart.add(&product("apple", 50));
        assert_eq!(cart.total(), 170);

        cart.remove(1).unwrap();
        assert_eq!(cart.total(), 100);

        cart.clear();
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_remove_out_of_range_leaves_cart_unchanged() {
        let mut cart = Cart::default();
        cart.add(&product("apple", 50));
        cart.add(&product("banana", 70));

        let result = cart.remove(5);
        assert!(matches!(
            result,
            Err(ShopError::OutOfRange { index: 5, len: 2 })
        ));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), 120);
    }

    #[test]
    fn test_duplicates_allowed_in_insertion_order() {
        let mut cart = Cart::default();
        cart.add(&product("apple", 50));
        cart.add(&product("apple", 50));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id, "apple");
        assert_eq!(cart.items()[1].id, "apple");
    }

    #[test]
    fn test_snapshot_survives_product_mutation() {
        let mut cart = Cart::default();
        let apple = product("apple", 50);
        cart.add(&apple);

        // A replacement catalog entry with a new price must not touch the
        // snapshot already in the cart.
        let _repriced = product("apple", 90);
        assert_eq!(cart.items()[0].price.value(), 50);
    }
}
