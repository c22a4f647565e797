use crate::domain::event::OutboundMessage;
use crate::domain::order::{Order, UserId};
use crate::domain::ports::{Catalog, Messenger, OrderLedger, SessionStore};
use crate::domain::product::Product;
use crate::domain::session::Session;
use crate::error::{Result, ShopError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct CatalogInner {
    products: HashMap<String, Product>,
    // Insertion order of ids, for stable menu rendering. An upsert keeps
    // the original position.
    order: Vec<String>,
}

/// In-memory product catalog with insertion-ordered listing.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<CatalogInner>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the catalog, preserving the given order.
    pub async fn with_products(products: Vec<Product>) -> Result<Self> {
        let catalog = Self::new();
        for product in products {
            catalog.insert(product).await?;
        }
        Ok(catalog)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn insert(&self, product: Product) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.products.insert(product.id.clone(), product.clone()).is_none() {
            inner.order.push(product.id);
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<Product> {
        let mut inner = self.inner.write().await;
        match inner.products.remove(id) {
            Some(product) => {
                inner.order.retain(|existing| existing != id);
                Ok(product)
            }
            None => Err(ShopError::NotFound(format!("product '{id}'"))),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.products.get(id).cloned())
            .collect())
    }
}

/// In-memory session store. Sessions are created lazily on first access
/// and live for the process lifetime.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<UserId, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, user: UserId) -> Result<Session> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.entry(user).or_default().clone())
    }

    async fn store(&self, user: UserId, session: Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(user, session);
        Ok(())
    }
}

/// In-memory ledger for tests and embedders that do not need persistence.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    entries: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderLedger for InMemoryLedger {
    async fn append(&self, entry: Order) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }

    async fn recent(&self, n: usize) -> Result<Vec<Order>> {
        let entries = self.entries.read().await;
        let start = entries.len().saturating_sub(n);
        Ok(entries[start..].to_vec())
    }
}

/// Messenger that records outbound traffic for inspection instead of
/// sending it anywhere.
#[derive(Default, Clone)]
pub struct InMemoryMessenger {
    sent: Arc<RwLock<Vec<(UserId, OutboundMessage)>>>,
}

impl InMemoryMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<(UserId, OutboundMessage)> {
        self.sent.read().await.clone()
    }

    /// All message texts addressed to the given user, in send order.
    pub async fn texts_for(&self, user: UserId) -> Vec<String> {
        self.sent
            .read()
            .await
            .iter()
            .filter(|(to, _)| *to == user)
            .map(|(_, message)| message.text.clone())
            .collect()
    }
}

#[async_trait]
impl Messenger for InMemoryMessenger {
    async fn send(&self, to: UserId, message: OutboundMessage) -> Result<()> {
        let mut sent = self.sent.write().await;
        sent.push((to, message));
        Ok(())
    }
}
