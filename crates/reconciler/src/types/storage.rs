//! Merchant-side records the reconciler reads and mutates.
//!
//! These model the externally-owned order store. Orders are created by the
//! checkout upstream; this subsystem only updates them.

use std::collections::HashMap;

use common_enums::{OrderStatus, TransactionType};

/// Merchant purchase record.
#[derive(Clone, Debug)]
pub struct Order {
    /// Human-facing order number, also the correlation key embedded in
    /// provider response custom fields.
    pub increment_id: String,
    pub status: OrderStatus,
    /// Grand total in minor currency units.
    pub grand_total: i64,
    pub currency: String,
    pub customer_id: Option<String>,
    pub payment: Payment,
    pub status_history: Vec<StatusHistoryEntry>,
}

impl Order {
    /// Move the order into a new state.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub fn cancel(&mut self) {
        self.status = OrderStatus::Cancelled;
    }
}

/// Payment attached to an order. Owned exclusively by its order.
#[derive(Clone, Debug, Default)]
pub struct Payment {
    pub method_code: String,
    pub transaction_id: Option<String>,
    pub last_transaction_id: Option<String>,
    pub parent_transaction_id: Option<String>,
    /// Known key/value flags written by the checkout (vault opt-in and the
    /// like), validated at the boundary.
    pub additional_info: HashMap<String, String>,
    /// Escape-hatch bucket for unrecognized provider response data.
    pub raw_details: HashMap<String, String>,
    pub transactions: Vec<TransactionRecord>,
    /// Vault token linked to this payment, created on demand.
    pub vault_token: Option<PaymentToken>,
}

impl Payment {
    /// Whether the shopper opted into stored-card vaulting at checkout.
    pub fn vault_requested(&self) -> bool {
        self.additional_info
            .get(crate::consts::VAULT_ENABLER_KEY)
            .map(|value| value == "true")
            .unwrap_or(false)
    }
}

/// One provider transaction recorded against a payment.
#[derive(Clone, Debug)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub kind: TransactionType,
    pub is_closed: bool,
}

/// Free-form comment appended to the order history.
#[derive(Clone, Debug)]
pub struct StatusHistoryEntry {
    pub comment: String,
    pub is_customer_notified: bool,
}

/// Invoice captured against an order.
#[derive(Clone, Debug)]
pub struct Invoice {
    pub invoice_id: String,
    pub order_increment_id: String,
    /// Invoiced amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    pub transaction_id: Option<String>,
    pub is_paid: bool,
}

/// Stored-card token persisted after a successful vaulting transaction.
#[derive(Clone, Debug)]
pub struct PaymentToken {
    pub gateway_token: String,
    pub token_type: String,
    /// JSON blob with brand code, masked PAN suffix and expiration date.
    pub details: String,
    /// `YYYY-MM-DD 00:00:00`, UTC.
    pub expires_at: String,
    pub is_active: bool,
    pub is_visible: bool,
    pub customer_id: Option<String>,
    pub method_code: String,
    /// Stable one-way hash identifying the token publicly.
    pub public_hash: String,
}
