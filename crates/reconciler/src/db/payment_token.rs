use error_stack::report;

use super::MockDb;
use crate::{
    core::errors::{CustomResult, StorageError},
    types::storage,
};

#[async_trait::async_trait]
pub trait PaymentTokenInterface {
    /// Insert a vault token. Fails with [`StorageError::DuplicateValue`] when
    /// a token with the same customer, gateway token and method already
    /// exists.
    async fn insert_payment_token(
        &self,
        token: storage::PaymentToken,
    ) -> CustomResult<storage::PaymentToken, StorageError>;

    /// Remove tokens matching the customer and gateway token pair, returning
    /// how many were dropped.
    async fn delete_payment_token_by_customer_id_gateway_token(
        &self,
        customer_id: Option<&str>,
        gateway_token: &str,
    ) -> CustomResult<usize, StorageError>;
}

#[async_trait::async_trait]
impl PaymentTokenInterface for MockDb {
    async fn insert_payment_token(
        &self,
        token: storage::PaymentToken,
    ) -> CustomResult<storage::PaymentToken, StorageError> {
        let mut tokens = self.payment_tokens.lock().await;
        let conflict = tokens.iter().any(|existing| {
            existing.customer_id == token.customer_id
                && existing.gateway_token == token.gateway_token
                && existing.method_code == token.method_code
        });
        if conflict {
            return Err(report!(StorageError::DuplicateValue {
                entity: "payment_token",
                key: Some(token.gateway_token),
            }));
        }
        tokens.push(token.clone());
        Ok(token)
    }

    async fn delete_payment_token_by_customer_id_gateway_token(
        &self,
        customer_id: Option<&str>,
        gateway_token: &str,
    ) -> CustomResult<usize, StorageError> {
        let mut tokens = self.payment_tokens.lock().await;
        let before = tokens.len();
        tokens.retain(|token| {
            !(token.customer_id.as_deref() == customer_id && token.gateway_token == gateway_token)
        });
        Ok(before - tokens.len())
    }
}
