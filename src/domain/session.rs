use crate::domain::cart::Cart;
use crate::domain::order::Order;
use serde::{Deserialize, Serialize};

/// The per-user step indicator gating which inputs are currently meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Idle,
    AwaitingAddress,
    AwaitingPaymentConfirmation,
}

/// Per-user ephemeral state. Created lazily on first interaction and kept
/// for the process lifetime; nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub cart: Cart,
    pub state: WorkflowState,
    pub delivery_address: Option<String>,
    pub current_order: Option<Order>,
}

impl Session {
    /// Resets the order-in-flight after approval: cart, draft, and workflow
    /// state go back to their defaults. The delivery address is kept so a
    /// repeat order can reuse it.
    pub fn finish_order(&mut self) {
        self.cart.clear();
        self.current_order = None;
        self.state = WorkflowState::Idle;
    }
}
