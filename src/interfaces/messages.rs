//! Outbound text and keyboard composition.
//!
//! Everything the workflow says to users and to the administrator is built
//! here, so the engine stays free of formatting concerns.

use crate::domain::cart::Cart;
use crate::domain::event::{Button, OutboundMessage};
use crate::domain::order::{Order, UserId};
use crate::domain::product::Product;
use crate::error::ShopError;
use crate::interfaces::callback::CallbackAction;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Static payee details rendered into the payment instructions.
#[derive(Debug, Clone)]
pub struct PaymentDetails {
    pub payee: String,
    pub card_number: String,
    pub phone: String,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            payee: "Shop Owner".to_string(),
            card_number: "0000 0000 0000 0000".to_string(),
            phone: "+0 000 000 0000".to_string(),
        }
    }
}

/// Human-facing order number shown to the admin. Derived from a hash of the
/// user id; display-only, carries no uniqueness guarantee and is never used
/// as a ledger key.
pub fn display_order_number(user: UserId) -> u64 {
    let mut hasher = DefaultHasher::new();
    user.hash(&mut hasher);
    hasher.finish() % 1_000_000
}

fn button(label: &str, action: CallbackAction) -> Button {
    Button::new(label, action.to_string())
}

pub fn welcome(cart_count: usize) -> OutboundMessage {
    OutboundMessage::with_keyboard(
        "Welcome to our shop!",
        vec![
            vec![button("Menu", CallbackAction::Menu)],
            vec![button(&format!("Cart ({cart_count})"), CallbackAction::Cart)],
        ],
    )
}

pub fn help() -> OutboundMessage {
    OutboundMessage::text(
        "Available commands:\n\
         /start - begin\n\
         /help - show this message\n\
         /checkout - place your order",
    )
}

pub fn menu(products: &[Product]) -> OutboundMessage {
    let mut keyboard: Vec<Vec<Button>> = products
        .iter()
        .map(|p| {
            vec![button(
                &format!("{} - {}", p.name, p.price),
                CallbackAction::Add(p.id.clone()),
            )]
        })
        .collect();
    keyboard.push(vec![button("Back", CallbackAction::Back)]);
    OutboundMessage::with_keyboard("Pick a product:", keyboard)
}

pub fn added_to_cart(product: &Product) -> OutboundMessage {
    OutboundMessage::text(format!("Added: {}", product.name))
}

pub fn removed_from_cart(name: &str) -> OutboundMessage {
    OutboundMessage::text(format!("Removed: {name}"))
}

pub fn cart_cleared() -> OutboundMessage {
    OutboundMessage::text("Cart cleared.")
}

pub fn cart_view(cart: &Cart) -> OutboundMessage {
    if cart.is_empty() {
        return OutboundMessage::text("Your cart is empty.");
    }

    let lines: Vec<String> = cart
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {} - {}", i + 1, item.name, item.price))
        .collect();
    let text = format!("Your cart:\n{}\n\nTotal: {}", lines.join("\n"), cart.total());

    let mut keyboard = vec![
        vec![button("Menu", CallbackAction::Menu)],
        vec![button("Clear cart", CallbackAction::ClearCart)],
        vec![button("Checkout", CallbackAction::CheckoutOrder)],
    ];
    for i in 0..cart.len() {
        keyboard.push(vec![button(
            &format!("Remove item #{}", i + 1),
            CallbackAction::Remove(i),
        )]);
    }
    OutboundMessage::with_keyboard(text, keyboard)
}

pub fn order_summary(order: &Order) -> OutboundMessage {
    let lines: Vec<String> = order
        .cart
        .iter()
        .map(|item| format!("{} - {}", item.name, item.price))
        .collect();
    OutboundMessage::with_keyboard(
        format!(
            "Your order:\n{}\n\nTotal: {}\nSet a delivery address, then press Pay.",
            lines.join("\n"),
            order.total
        ),
        vec![
            vec![button("Set address", CallbackAction::SetAddress)],
            vec![button("Pay", CallbackAction::Pay)],
        ],
    )
}

pub fn address_prompt() -> OutboundMessage {
    OutboundMessage::text("Enter your delivery address:")
}

pub fn address_saved() -> OutboundMessage {
    OutboundMessage::with_keyboard(
        "Address saved. You can pay now.",
        vec![vec![button("Pay", CallbackAction::Pay)]],
    )
}

pub fn payment_instructions(details: &PaymentDetails, total: i64) -> OutboundMessage {
    OutboundMessage::with_keyboard(
        format!(
            "Payment details\n\
             Card number: {}\n\
             Payee: {}\n\
             Phone: {}\n\
             Amount due: {total}",
            details.card_number, details.payee, details.phone
        ),
        vec![vec![button("I paid", CallbackAction::ConfirmPayment)]],
    )
}

pub fn awaiting_admin() -> OutboundMessage {
    OutboundMessage::text("Send us the receipt or press \"I paid\" so we can verify the payment.")
}

pub fn admin_notification(order: &Order, address: Option<&str>) -> OutboundMessage {
    let lines: Vec<String> = order
        .cart
        .iter()
        .map(|item| format!("- {} - {}", item.name, item.price))
        .collect();
    OutboundMessage::with_keyboard(
        format!(
            "New order #{}\nCustomer: {} (ID: {})\nItems:\n{}\nTotal: {}\nAddress: {}\nPress the button below to confirm payment:",
            display_order_number(order.user_id),
            order.user_name,
            order.user_id,
            lines.join("\n"),
            order.total,
            address.unwrap_or("not specified"),
        ),
        vec![vec![button(
            "Confirm payment",
            CallbackAction::Approve(order.user_id),
        )]],
    )
}

pub fn receipt(order: &Order) -> OutboundMessage {
    let lines: Vec<String> = order
        .cart
        .iter()
        .map(|item| format!("- {} - {}", item.name, item.price))
        .collect();
    OutboundMessage::text(format!(
        "Receipt\nCustomer: {} (ID: {})\nDelivery address: {}\nItems:\n{}\nTotal: {}\nPayment confirmed!",
        order.user_name,
        order.user_id,
        order.delivery_address.as_deref().unwrap_or("not specified"),
        lines.join("\n"),
        order.total,
    ))
}

pub fn approval_done() -> OutboundMessage {
    OutboundMessage::text("You confirmed the payment.")
}

pub fn admin_panel() -> OutboundMessage {
    OutboundMessage::with_keyboard(
        "Admin panel",
        vec![
            vec![button("Recent orders", CallbackAction::AdminOrders)],
            vec![button("Edit products", CallbackAction::AdminProducts)],
        ],
    )
}

pub fn no_orders() -> OutboundMessage {
    OutboundMessage::text("No orders yet.")
}

pub fn ledger_entry(order: &Order) -> OutboundMessage {
    let lines: Vec<String> = order
        .cart
        .iter()
        .map(|item| format!("- {} - {}", item.name, item.price))
        .collect();
    OutboundMessage::text(format!(
        "Order by {} (ID: {})\nStatus: {}\nAddress: {}\nItems:\n{}\nTotal: {}",
        order.user_name,
        order.user_id,
        match order.status {
            crate::domain::order::OrderStatus::Pending => "pending",
            crate::domain::order::OrderStatus::Paid => "paid",
        },
        order.delivery_address.as_deref().unwrap_or("not specified"),
        lines.join("\n"),
        order.total,
    ))
}

pub fn product_settings(products: &[Product]) -> OutboundMessage {
    let mut keyboard: Vec<Vec<Button>> = products
        .iter()
        .map(|p| {
            vec![button(
                &format!("Delete {}", p.id),
                CallbackAction::DeleteProduct(p.id.clone()),
            )]
        })
        .collect();
    keyboard.push(vec![button("Back", CallbackAction::AdminPanel)]);
    OutboundMessage::with_keyboard("Product list:", keyboard)
}

pub fn product_added(name: &str) -> OutboundMessage {
    OutboundMessage::text(format!("Product '{name}' added."))
}

pub fn product_removed(id: &str) -> OutboundMessage {
    OutboundMessage::text(format!("Product '{id}' removed."))
}

pub fn receipt_forwarded(user: UserId) -> OutboundMessage {
    OutboundMessage::text(format!(
        "Payment receipt received from user {user}. Verify and approve their order."
    ))
}

pub fn receipt_ack() -> OutboundMessage {
    OutboundMessage::text("We received your receipt. Awaiting confirmation.")
}

/// User-facing rendering of workflow errors. I/O problems deliberately
/// collapse to a generic transient-failure message.
pub fn user_error(error: &ShopError) -> OutboundMessage {
    let text = match error {
        ShopError::InvalidInput(reason) => format!("Invalid input: {reason}."),
        ShopError::NotFound(what) => format!("Not found: {what}."),
        ShopError::OutOfRange { index, len } => {
            // Display index is 1-based; saturate so an absurd token index
            // cannot panic the reporting path.
            format!(
                "Item {} does not exist ({} in cart).",
                index.saturating_add(1),
                len
            )
        }
        ShopError::PermissionDenied => "Access denied.".to_string(),
        ShopError::Io(_) | ShopError::Json(_) => {
            "Something went wrong on our side. Please try again.".to_string()
        }
    };
    OutboundMessage::text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Product;

    #[test]
    fn test_display_order_number_is_stable() {
        assert_eq!(display_order_number(42), display_order_number(42));
        assert!(display_order_number(42) < 1_000_000);
    }

    #[test]
    fn test_cart_view_has_remove_buttons_per_item() {
        let mut cart = Cart::default();
        cart.add(&Product::new("apple", "Apple", 50).unwrap());
        cart.add(&Product::new("banana", "Banana", 70).unwrap());

        let message = cart_view(&cart);
        assert!(message.text.contains("Total: 120"));
        let tokens: Vec<&str> = message
            .keyboard
            .iter()
            .flatten()
            .map(|b| b.token.as_str())
            .collect();
        assert!(tokens.contains(&"remove_0"));
        assert!(tokens.contains(&"remove_1"));
        assert!(tokens.contains(&"checkout_order"));
    }

    #[test]
    fn test_permission_error_discloses_nothing() {
        let message = user_error(&ShopError::PermissionDenied);
        assert_eq!(message.text, "Access denied.");
    }

    #[test]
    fn test_out_of_range_display_survives_huge_index() {
        let message = user_error(&ShopError::OutOfRange {
            index: usize::MAX,
            len: 2,
        });
        assert!(message.text.contains(&format!("Item {}", usize::MAX)));
        assert!(message.text.contains("2 in cart"));
    }

    #[test]
    fn test_io_error_renders_generic() {
        let error = ShopError::Io(std::io::Error::other("disk gone"));
        let message = user_error(&error);
        assert!(!message.text.contains("disk gone"));
    }
}
