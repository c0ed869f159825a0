//! Storage interfaces and the in-memory implementation.

pub mod invoice;
pub mod order;
pub mod payment_token;
pub mod session;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tokio::sync::Mutex;

pub use self::{
    invoice::InvoiceInterface, order::OrderInterface, payment_token::PaymentTokenInterface,
    session::RedirectSessionInterface,
};
use crate::types::storage;

/// Everything the reconciler needs from persistence, as one object-safe
/// supertrait so it can travel behind `Box<dyn StorageInterface>`.
pub trait StorageInterface:
    Send
    + Sync
    + dyn_clone::DynClone
    + OrderInterface
    + InvoiceInterface
    + PaymentTokenInterface
    + RedirectSessionInterface
    + 'static
{
}

dyn_clone::clone_trait_object!(StorageInterface);

/// In-memory store backing tests and local runs.
#[derive(Clone, Default)]
pub struct MockDb {
    pub(crate) orders: Arc<Mutex<Vec<storage::Order>>>,
    pub(crate) invoices: Arc<Mutex<Vec<storage::Invoice>>>,
    pub(crate) payment_tokens: Arc<Mutex<Vec<storage::PaymentToken>>>,
    pub(crate) redirect_sessions: Arc<Mutex<Vec<(String, String)>>>,
    order_save_calls: Arc<AtomicUsize>,
}

impl MockDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an order, test setup only.
    pub async fn insert_order(&self, order: storage::Order) {
        self.orders.lock().await.push(order);
    }

    pub async fn orders(&self) -> Vec<storage::Order> {
        self.orders.lock().await.clone()
    }

    pub async fn invoices(&self) -> Vec<storage::Invoice> {
        self.invoices.lock().await.clone()
    }

    pub async fn payment_tokens(&self) -> Vec<storage::PaymentToken> {
        self.payment_tokens.lock().await.clone()
    }

    /// Number of direct order writes observed via
    /// [`OrderInterface::update_order`].
    pub fn order_save_count(&self) -> usize {
        self.order_save_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn record_order_save(&self) {
        self.order_save_calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl StorageInterface for MockDb {}
