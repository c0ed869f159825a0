//! Customer notification seam for paid invoices.

use reconciler_env::logger;

use crate::{core::errors::CustomResult, types::storage};

#[derive(Debug, thiserror::Error)]
#[error("failed to send invoice notification email")]
pub struct EmailError;

/// Sends the "invoice paid" mail after a capture. Failures are logged by the
/// caller and never fail the reconciliation.
#[async_trait::async_trait]
pub trait InvoiceNotifier: Send + Sync {
    async fn send_invoice_paid(
        &self,
        invoice: &storage::Invoice,
        order: &storage::Order,
    ) -> CustomResult<(), EmailError>;
}

/// Default notifier: records the send in the logs only. A real mailer slots
/// in behind the same trait.
#[derive(Clone, Debug, Default)]
pub struct LoggingInvoiceNotifier;

#[async_trait::async_trait]
impl InvoiceNotifier for LoggingInvoiceNotifier {
    async fn send_invoice_paid(
        &self,
        invoice: &storage::Invoice,
        order: &storage::Order,
    ) -> CustomResult<(), EmailError> {
        logger::info!(
            invoice_id = %invoice.invoice_id,
            increment_id = %order.increment_id,
            "invoice paid notification"
        );
        Ok(())
    }
}
