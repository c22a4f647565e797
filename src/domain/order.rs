use crate::domain::cart::{Cart, CartItem};
use serde::{Deserialize, Serialize};

pub type UserId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
}

/// A checkout snapshot of a cart.
///
/// The total is computed once at construction and never recomputed, so
/// catalog price edits after checkout cannot alter an order in flight.
/// The same record, with status flipped to `Paid` and the delivery address
/// filled in, is what gets appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub user_id: UserId,
    pub user_name: String,
    pub cart: Vec<CartItem>,
    pub total: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

impl Order {
    pub fn from_cart(user_id: UserId, user_name: impl Into<String>, cart: &Cart) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            cart: cart.items().to_vec(),
            total: cart.total(),
            status: OrderStatus::Pending,
            delivery_address: None,
        }
    }
}
