use crate::error::ShopError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positive integer price in the shop's currency unit.
///
/// Wraps `i64` to enforce the domain rule that catalog prices are always
/// strictly positive; zero or negative values are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub fn new(value: i64) -> Result<Self, ShopError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(ShopError::InvalidInput(
                "price must be a positive integer".to_string(),
            ))
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Price {
    type Error = ShopError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog item. Immutable once created; admin edits replace the whole
/// entry. Identity is the `id` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Price,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: i64,
    ) -> Result<Self, ShopError> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            price: Price::new(price)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_validation() {
        assert!(Price::new(1).is_ok());
        assert!(matches!(Price::new(0), Err(ShopError::InvalidInput(_))));
        assert!(matches!(Price::new(-50), Err(ShopError::InvalidInput(_))));
    }

    #[test]
    fn test_product_rejects_bad_price() {
        assert!(Product::new("apple", "Apple", 50).is_ok());
        assert!(Product::new("apple", "Apple", 0).is_err());
    }

    #[test]
    fn test_price_serializes_as_plain_integer() {
        let price = Price::new(70).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "70");
        let back: Price = serde_json::from_str("70").unwrap();
        assert_eq!(back, price);
    }
}
