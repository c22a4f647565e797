use crate::domain::order::UserId;
use crate::error::ShopError;
use std::fmt;
use std::str::FromStr;

/// The button-token vocabulary carried in `ButtonPress` events.
///
/// Tokens are flat strings on the wire (`add_apple`, `remove_0`,
/// `approve_42`); this codec is the only place that parses or formats them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    Menu,
    Cart,
    Back,
    ClearCart,
    Add(String),
    Remove(usize),
    CheckoutOrder,
    SetAddress,
    Pay,
    ConfirmPayment,
    Approve(UserId),
    AdminPanel,
    AdminOrders,
    AdminProducts,
    DeleteProduct(String),
}

impl FromStr for CallbackAction {
    type Err = ShopError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let action = match token {
            "menu" => Self::Menu,
            "cart" => Self::Cart,
            "back" => Self::Back,
            "clear_cart" => Self::ClearCart,
            "checkout_order" => Self::CheckoutOrder,
            "set_address" => Self::SetAddress,
            "pay" => Self::Pay,
            "confirm_payment" => Self::ConfirmPayment,
            "admin_panel" => Self::AdminPanel,
            "admin_orders" => Self::AdminOrders,
            "admin_products" => Self::AdminProducts,
            _ => {
                if let Some(id) = token.strip_prefix("add_") {
                    Self::Add(id.to_string())
                } else if let Some(index) = token.strip_prefix("remove_") {
                    let index = index.parse().map_err(|_| {
                        ShopError::InvalidInput(format!("bad cart index in token '{token}'"))
                    })?;
                    Self::Remove(index)
                } else if let Some(user) = token.strip_prefix("approve_") {
                    let user = user.parse().map_err(|_| {
                        ShopError::InvalidInput(format!("bad user id in token '{token}'"))
                    })?;
                    Self::Approve(user)
                } else if let Some(id) = token.strip_prefix("delete_product_") {
                    Self::DeleteProduct(id.to_string())
                } else {
                    return Err(ShopError::InvalidInput(format!("unknown token '{token}'")));
                }
            }
        };
        Ok(action)
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu => write!(f, "menu"),
            Self::Cart => write!(f, "cart"),
            Self::Back => write!(f, "back"),
            Self::ClearCart => write!(f, "clear_cart"),
            Self::Add(id) => write!(f, "add_{id}"),
            Self::Remove(index) => write!(f, "remove_{index}"),
            Self::CheckoutOrder => write!(f, "checkout_order"),
            Self::SetAddress => write!(f, "set_address"),
            Self::Pay => write!(f, "pay"),
            Self::ConfirmPayment => write!(f, "confirm_payment"),
            Self::Approve(user) => write!(f, "approve_{user}"),
            Self::AdminPanel => write!(f, "admin_panel"),
            Self::AdminOrders => write!(f, "admin_orders"),
            Self::AdminProducts => write!(f, "admin_products"),
            Self::DeleteProduct(id) => write!(f, "delete_product_{id}"),
        }
    }
}
