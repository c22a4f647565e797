use crate::domain::event::Event;
use crate::domain::order::{Order, OrderStatus, UserId};
use crate::domain::ports::{CatalogBox, MessengerBox, OrderLedgerBox, SessionStoreBox};
use crate::domain::product::Product;
use crate::domain::session::WorkflowState;
use crate::error::{Result, ShopError};
use crate::interfaces::callback::CallbackAction;
use crate::interfaces::messages::{self, PaymentDetails};
use tracing::{error, warn};

/// How many ledger entries the admin order listing shows.
const RECENT_ORDERS: usize = 5;

#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub admin_id: UserId,
    pub payment: PaymentDetails,
}

impl ShopConfig {
    pub fn new(admin_id: UserId) -> Self {
        Self {
            admin_id,
            payment: PaymentDetails::default(),
        }
    }
}

/// The order workflow engine.
///
/// Owns the injected stores and the outbound messenger, routes every
/// inbound event to the matching operation, and keeps each user's session
/// walking the `Idle` → `AwaitingAddress` / `AwaitingPaymentConfirmation`
/// state machine. The admin approval path takes an explicit target user id
/// and mutates that user's session, never the admin's own.
pub struct ShopEngine {
    catalog: CatalogBox,
    sessions: SessionStoreBox,
    ledger: OrderLedgerBox,
    messenger: MessengerBox,
    config: ShopConfig,
}

impl ShopEngine {
    pub fn new(
        catalog: CatalogBox,
        sessions: SessionStoreBox,
        ledger: OrderLedgerBox,
        messenger: MessengerBox,
        config: ShopConfig,
    ) -> Self {
        Self {
            catalog,
            sessions,
            ledger,
            messenger,
            config,
        }
    }

    /// Processes one inbound event to completion.
    ///
    /// Workflow errors are handled here at the boundary: they are logged
    /// and rendered back to the invoking user. Only a failure to deliver
    /// that error report escapes to the caller.
    pub async fn handle_event(&self, event: Event) -> Result<()> {
        let user = event.user();
        if let Err(err) = self.route(event).await {
            match &err {
                ShopError::Io(_) | ShopError::Json(_) => error!(user, %err, "handler failed"),
                _ => warn!(user, %err, "request rejected"),
            }
            self.messenger.send(user, messages::user_error(&err)).await?;
        }
        Ok(())
    }

    async fn route(&self, event: Event) -> Result<()> {
        match event {
            Event::Command {
                name,
                args,
                user,
                user_name,
            } => match name.as_str() {
                "start" => self.start(user).await,
                "help" => self.messenger.send(user, messages::help()).await,
                "checkout" => self.checkout(user, &user_name).await,
                "admin" => self.admin_panel(user).await,
                "add_product" => self.add_product(user, &args).await,
                "remove_product" => self.remove_product_cmd(user, &args).await,
                other => Err(ShopError::InvalidInput(format!("unknown command '/{other}'"))),
            },
            Event::ButtonPress {
                token,
                user,
                user_name,
            } => match token.parse::<CallbackAction>()? {
                CallbackAction::Menu => self.show_menu(user).await,
                CallbackAction::Cart => self.show_cart(user).await,
                CallbackAction::Back => self.start(user).await,
                CallbackAction::ClearCart => self.clear_cart(user).await,
                CallbackAction::Add(id) => self.add_to_cart(user, &id).await,
                CallbackAction::Remove(index) => self.remove_from_cart(user, index).await,
                CallbackAction::CheckoutOrder => self.checkout(user, &user_name).await,
                CallbackAction::SetAddress => self.request_address(user).await,
                CallbackAction::Pay => self.pay(user).await,
                CallbackAction::ConfirmPayment => self.confirm_payment(user).await,
                CallbackAction::Approve(target) => self.approve(user, target).await,
                CallbackAction::AdminPanel => self.admin_panel(user).await,
                CallbackAction::AdminOrders => self.list_orders(user).await,
                CallbackAction::AdminProducts => self.product_settings(user).await,
                CallbackAction::DeleteProduct(id) => self.delete_product(user, &id).await,
            },
            Event::TextMessage { body, user } => self.handle_text(user, &body).await,
            Event::MediaMessage { user } => self.forward_receipt(user).await,
        }
    }

    fn ensure_admin(&self, user: UserId) -> Result<()> {
        if user == self.config.admin_id {
            Ok(())
        } else {
            Err(ShopError::PermissionDenied)
        }
    }

    async fn start(&self, user: UserId) -> Result<()> {
        let session = self.sessions.get_or_create(user).await?;
        self.messenger
            .send(user, messages::welcome(session.cart.len()))
            .await
    }

    async fn show_menu(&self, user: UserId) -> Result<()> {
        let products = self.catalog.list().await?;
        self.messenger.send(user, messages::menu(&products)).await
    }

    async fn show_cart(&self, user: UserId) -> Result<()> {
        let session = self.sessions.get_or_create(user).await?;
        self.messenger
            .send(user, messages::cart_view(&session.cart))
            .await
    }

    async fn add_to_cart(&self, user: UserId, product_id: &str) -> Result<()> {
        let product = self
            .catalog
            .get(product_id)
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("product '{product_id}'")))?;

        let mut session = self.sessions.get_or_create(user).await?;
        session.cart.add(&product);
        self.sessions.store(user, session).await?;

        self.messenger
            .send(user, messages::added_to_cart(&product))
            .await
    }

    async fn remove_from_cart(&self, user: UserId, index: usize) -> Result<()> {
        let mut session = self.sessions.get_or_create(user).await?;
        let removed = session.cart.remove(index)?;
        let cart = session.cart.clone();
        self.sessions.store(user, session).await?;

        self.messenger
            .send(user, messages::removed_from_cart(&removed.name))
            .await?;
        self.messenger.send(user, messages::cart_view(&cart)).await
    }

    async fn clear_cart(&self, user: UserId) -> Result<()> {
        let mut session = self.sessions.get_or_create(user).await?;
        session.cart.clear();
        self.sessions.store(user, session).await?;
        self.messenger.send(user, messages::cart_cleared()).await
    }

    /// Snapshots the cart into a pending order draft. The total is frozen
    /// here; catalog edits after this point do not touch the draft.
    async fn checkout(&self, user: UserId, user_name: &str) -> Result<()> {
        let mut session = self.sessions.get_or_create(user).await?;
        if session.cart.is_empty() {
            return Err(ShopError::InvalidInput("your cart is empty".to_string()));
        }

        let draft = Order::from_cart(user, user_name, &session.cart);
        let summary = messages::order_summary(&draft);
        session.current_order = Some(draft);
        self.sessions.store(user, session).await?;

        self.messenger.send(user, summary).await
    }

    async fn request_address(&self, user: UserId) -> Result<()> {
        let mut session = self.sessions.get_or_create(user).await?;
        session.state = WorkflowState::AwaitingAddress;
        self.sessions.store(user, session).await?;
        self.messenger.send(user, messages::address_prompt()).await
    }

    async fn handle_text(&self, user: UserId, body: &str) -> Result<()> {
        let session = self.sessions.get_or_create(user).await?;
        if session.state == WorkflowState::AwaitingAddress {
            let address = body.trim();
            if address.is_empty() {
                // Rejecting before any session write keeps the state at
                // AwaitingAddress.
                return Err(ShopError::InvalidInput("address cannot be empty".to_string()));
            }

            let mut session = session;
            session.delivery_address = Some(address.to_string());
            session.state = WorkflowState::Idle;
            self.sessions.store(user, session).await?;
            return self.messenger.send(user, messages::address_saved()).await;
        }

        // Any other text outside the address step is treated like a payment
        // receipt from the customer.
        self.forward_receipt(user).await
    }

    async fn forward_receipt(&self, user: UserId) -> Result<()> {
        if user == self.config.admin_id {
            return Ok(());
        }
        self.messenger
            .send(self.config.admin_id, messages::receipt_forwarded(user))
            .await?;
        self.messenger.send(user, messages::receipt_ack()).await
    }

    async fn pay(&self, user: UserId) -> Result<()> {
        let mut session = self.sessions.get_or_create(user).await?;
        let total = session
            .current_order
            .as_ref()
            .ok_or_else(|| ShopError::NotFound("pending order".to_string()))?
            .total;

        session.state = WorkflowState::AwaitingPaymentConfirmation;
        self.sessions.store(user, session).await?;

        self.messenger
            .send(user, messages::payment_instructions(&self.config.payment, total))
            .await
    }

    async fn confirm_payment(&self, user: UserId) -> Result<()> {
        let session = self.sessions.get_or_create(user).await?;
        let draft = session
            .current_order
            .as_ref()
            .ok_or_else(|| ShopError::NotFound("pending order".to_string()))?;

        self.messenger
            .send(
                self.config.admin_id,
                messages::admin_notification(draft, session.delivery_address.as_deref()),
            )
            .await?;
        self.messenger.send(user, messages::awaiting_admin()).await
    }

    /// Admin approval. `target` is the user id carried in the approve
    /// token, so this mutates the customer's session, not the admin's.
    /// The ledger append happens before the session is cleared; a ledger
    /// failure therefore leaves the draft in place for a retry, while a
    /// failed receipt send after the append is reported without rolling
    /// anything back.
    async fn approve(&self, actor: UserId, target: UserId) -> Result<()> {
        self.ensure_admin(actor)?;

        let mut session = self.sessions.get_or_create(target).await?;
        let mut entry = session
            .current_order
            .take()
            .ok_or_else(|| ShopError::NotFound(format!("pending order for user {target}")))?;
        entry.status = OrderStatus::Paid;
        entry.delivery_address = session.delivery_address.clone();

        self.ledger.append(entry.clone()).await?;

        session.finish_order();
        self.sessions.store(target, session).await?;

        self.messenger.send(target, messages::receipt(&entry)).await?;
        self.messenger.send(actor, messages::approval_done()).await
    }

    async fn admin_panel(&self, user: UserId) -> Result<()> {
        self.ensure_admin(user)?;
        self.messenger.send(user, messages::admin_panel()).await
    }

    async fn list_orders(&self, user: UserId) -> Result<()> {
        self.ensure_admin(user)?;
        let entries = self.ledger.recent(RECENT_ORDERS).await?;
        if entries.is_empty() {
            return self.messenger.send(user, messages::no_orders()).await;
        }
        for entry in &entries {
            self.messenger.send(user, messages::ledger_entry(entry)).await?;
        }
        Ok(())
    }

    async fn product_settings(&self, user: UserId) -> Result<()> {
        self.ensure_admin(user)?;
        let products = self.catalog.list().await?;
        self.messenger
            .send(user, messages::product_settings(&products))
            .await
    }

    async fn add_product(&self, user: UserId, args: &[String]) -> Result<()> {
        self.ensure_admin(user)?;
        let [id, name, price] = args else {
            return Err(ShopError::InvalidInput(
                "usage: /add_product <id> <name> <price>".to_string(),
            ));
        };
        let price: i64 = price
            .parse()
            .map_err(|_| ShopError::InvalidInput(format!("'{price}' is not a valid price")))?;

        let product = Product::new(id.clone(), name.clone(), price)?;
        self.catalog.insert(product).await?;
        self.messenger.send(user, messages::product_added(name)).await
    }

    async fn remove_product_cmd(&self, user: UserId, args: &[String]) -> Result<()> {
        self.ensure_admin(user)?;
        let [id] = args else {
            return Err(ShopError::InvalidInput(
                "usage: /remove_product <id>".to_string(),
            ));
        };
        self.catalog.remove(id).await?;
        self.messenger.send(user, messages::product_removed(id)).await
    }

    async fn delete_product(&self, user: UserId, id: &str) -> Result<()> {
        self.ensure_admin(user)?;
        self.catalog.remove(id).await?;
        self.messenger.send(user, messages::product_removed(id)).await?;
        self.product_settings(user).await
    }
}
