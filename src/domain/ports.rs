use crate::domain::event::OutboundMessage;
use crate::domain::order::{Order, UserId};
use crate::domain::product::Product;
use crate::domain::session::Session;
use crate::error::Result;
use async_trait::async_trait;

/// The product catalog. `list` must preserve insertion order; an upsert of
/// an existing id keeps its original position.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn insert(&self, product: Product) -> Result<()>;
    /// Removes and returns the product, or `NotFound`.
    async fn remove(&self, id: &str) -> Result<Product>;
    async fn get(&self, id: &str) -> Result<Option<Product>>;
    async fn list(&self) -> Result<Vec<Product>>;
}

/// Per-user session storage. Read-modify-write goes through whole-session
/// clones; the dispatcher serializes events, so no per-session locking is
/// needed beyond the store's own.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_or_create(&self, user: UserId) -> Result<Session>;
    async fn store(&self, user: UserId, session: Session) -> Result<()>;
}

/// The append-only record of finalized orders. Entries are never mutated
/// or removed.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    async fn append(&self, entry: Order) -> Result<()>;
    /// The last `n` entries in append order, oldest first within the slice.
    async fn recent(&self, n: usize) -> Result<Vec<Order>>;
}

/// Outbound message sink, the seam to the chat transport.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, to: UserId, message: OutboundMessage) -> Result<()>;
}

pub type CatalogBox = Box<dyn Catalog>;
pub type SessionStoreBox = Box<dyn SessionStore>;
pub type OrderLedgerBox = Box<dyn OrderLedger>;
pub type MessengerBox = Box<dyn Messenger>;
