use error_stack::report;

use super::MockDb;
use crate::{
    core::errors::{CustomResult, StorageError},
    types::storage,
};

#[async_trait::async_trait]
pub trait OrderInterface {
    async fn find_order_by_increment_id(
        &self,
        increment_id: &str,
    ) -> CustomResult<storage::Order, StorageError>;

    /// Persist the whole order record, payment and history included.
    async fn update_order(
        &self,
        order: storage::Order,
    ) -> CustomResult<storage::Order, StorageError>;
}

#[async_trait::async_trait]
impl OrderInterface for MockDb {
    async fn find_order_by_increment_id(
        &self,
        increment_id: &str,
    ) -> CustomResult<storage::Order, StorageError> {
        self.orders
            .lock()
            .await
            .iter()
            .find(|order| order.increment_id == increment_id)
            .cloned()
            .ok_or_else(|| {
                report!(StorageError::ValueNotFound(format!(
                    "no order found for increment_id = {increment_id}"
                )))
            })
    }

    async fn update_order(
        &self,
        order: storage::Order,
    ) -> CustomResult<storage::Order, StorageError> {
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
        self.record_order_save();
        Ok(order)
    }
}
