use error_stack::report;

use super::MockDb;
use crate::{
    core::errors::{CustomResult, StorageError},
    types::storage,
};

#[async_trait::async_trait]
pub trait InvoiceInterface {
    /// Persist a freshly captured invoice together with its order, as one
    /// transactional write.
    async fn save_invoice_with_order(
        &self,
        invoice: storage::Invoice,
        order: storage::Order,
    ) -> CustomResult<(storage::Invoice, storage::Order), StorageError>;
}

#[async_trait::async_trait]
impl InvoiceInterface for MockDb {
    async fn save_invoice_with_order(
        &self,
        invoice: storage::Invoice,
        order: storage::Order,
    ) -> CustomResult<(storage::Invoice, storage::Order), StorageError> {
        let mut orders = self.orders.lock().await;
        let stored = orders
            .iter_mut()
            .find(|candidate| candidate.increment_id == order.increment_id)
            .ok_or_else(|| {
                report!(StorageError::ValueNotFound(format!(
                    "no order found for increment_id = {}",
                    order.increment_id
                )))
            })?;
        *stored = order.clone();
        self.invoices.lock().await.push(invoice.clone());
        Ok((invoice, order))
    }
}
