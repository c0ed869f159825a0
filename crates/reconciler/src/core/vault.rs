//! Stored-card token persistence.

use common_enums::CardBrand;
use error_stack::ResultExt;
use masking::PeekInterface;
use reconciler_env::logger;
use sha2::{Digest, Sha256};

use crate::{
    consts,
    core::errors::{CustomResult, ReconcileError},
    db::StorageInterface,
    provider::CardInfo,
    types::storage,
    utils,
};

/// What the vaulting step did, surfaced for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VaultOutcome {
    Saved,
    /// The token already existed; the stale copy was removed so the next
    /// attempt starts clean.
    RecoveredConflict,
    Skipped,
}

#[derive(serde::Serialize)]
struct TokenDetails<'a> {
    /// Field order is load-bearing: the public hash covers the serialized
    /// blob byte for byte.
    #[serde(rename = "type")]
    brand_code: &'a str,
    #[serde(rename = "maskedCC")]
    masked_cc: &'a str,
    #[serde(rename = "expirationDate")]
    expiration_date: &'a str,
}

/// Persist a card token for the order's customer, if the response carried
/// one. Token failures never fail the surrounding reconciliation; conflicts
/// are recovered, other storage errors bubble up.
pub async fn save_card_token(
    store: &dyn StorageInterface,
    order: &mut storage::Order,
    card: Option<&CardInfo>,
) -> CustomResult<VaultOutcome, ReconcileError> {
    let Some(card) = card else {
        logger::warn!(
            increment_id = %order.increment_id,
            "vault requested but response carried no card token"
        );
        return Ok(VaultOutcome::Skipped);
    };

    let masked = card
        .masked_pan
        .as_ref()
        .map(|pan| utils::pan_suffix(pan.peek()))
        .unwrap_or_default();
    let expiration_date = expiration_display(card.expiration_month, card.expiration_year);
    // An absent brand is treated like an unmapped one.
    let brand_code = card
        .brand
        .as_deref()
        .map(CardBrand::from_provider)
        .unwrap_or(CardBrand::Other)
        .code();
    let details = serde_json::to_string(&TokenDetails {
        brand_code,
        masked_cc: &masked,
        expiration_date: &expiration_date,
    })
    .change_context(ReconcileError::StorageFailure)
    .attach_printable("failed to serialize vault token details")?;

    let public_hash = generate_public_hash(
        &card.token_id,
        order.customer_id.as_deref(),
        &order.payment.method_code,
        consts::TOKEN_TYPE_CARD,
        &details,
    );

    let token = storage::PaymentToken {
        gateway_token: card.token_id.clone(),
        token_type: consts::TOKEN_TYPE_CARD.to_string(),
        details,
        expires_at: expiration_timestamp(card.expiration_month, card.expiration_year),
        is_active: true,
        is_visible: true,
        customer_id: order.customer_id.clone(),
        method_code: order.payment.method_code.clone(),
        public_hash,
    };

    match store.insert_payment_token(token.clone()).await {
        Ok(saved) => {
            order.payment.vault_token = Some(saved);
            Ok(VaultOutcome::Saved)
        }
        Err(error) if error.current_context().is_db_unique_violation() => {
            let dropped = store
                .delete_payment_token_by_customer_id_gateway_token(
                    order.customer_id.as_deref(),
                    &token.gateway_token,
                )
                .await
                .change_context(ReconcileError::StorageFailure)?;
            logger::warn!(
                gateway_token = %token.gateway_token,
                dropped,
                "duplicate vault token dropped"
            );
            Ok(VaultOutcome::RecoveredConflict)
        }
        Err(error) => Err(error.change_context(ReconcileError::StorageFailure)),
    }
}

/// Stable identifier for a stored token, exposed to the storefront.
pub fn generate_public_hash(
    gateway_token: &str,
    customer_id: Option<&str>,
    method_code: &str,
    token_type: &str,
    details: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(gateway_token.as_bytes());
    hasher.update(customer_id.unwrap_or("").as_bytes());
    hasher.update(method_code.as_bytes());
    hasher.update(token_type.as_bytes());
    hasher.update(details.as_bytes());
    hex::encode(hasher.finalize())
}

/// `MM-YYYY` display form kept in token details. Missing parts are masked.
fn expiration_display(month: Option<u8>, year: Option<u16>) -> String {
    let month = month
        .map(|month| format!("{month:02}"))
        .unwrap_or_else(|| "xx".to_string());
    let year = year
        .map(|year| format!("{year:04}"))
        .unwrap_or_else(|| "xxxx".to_string());
    format!("{month}-{year}")
}

/// Expiry timestamp stored on the token: first day of the expiry month, or
/// the current UTC date when the card did not carry a usable expiry.
fn expiration_timestamp(month: Option<u8>, year: Option<u16>) -> String {
    match (month, year) {
        (Some(month @ 1..=12), Some(year)) => {
            format!("{year:04}-{month:02}-01 00:00:00")
        }
        _ => {
            let today = time::OffsetDateTime::now_utc().date();
            format!(
                "{:04}-{:02}-{:02} 00:00:00",
                today.year(),
                u8::from(today.month()),
                today.day()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_hash_matches_known_vector() {
        let details = r#"{"type":"","maskedCC":"1003","expirationDate":"xx-xxxx"}"#;
        let hash = generate_public_hash(
            "4304509873471003",
            None,
            "wirecard_elasticengine_creditcard",
            "card",
            details,
        );
        assert_eq!(
            hash,
            "15a67aff3600beba5750e482b914dab52bb0ecf0f74275d15e121f2c881f862d"
        );
    }

    #[test]
    fn public_hash_is_deterministic() {
        let a = generate_public_hash("tok", Some("cust"), "method", "card", "{}");
        let b = generate_public_hash("tok", Some("cust"), "method", "card", "{}");
        assert_eq!(a, b);
        let c = generate_public_hash("tok", None, "method", "card", "{}");
        assert_ne!(a, c);
    }

    #[test]
    fn expiration_display_masks_missing_parts() {
        assert_eq!(expiration_display(Some(1), Some(2023)), "01-2023");
        assert_eq!(expiration_display(None, None), "xx-xxxx");
        assert_eq!(expiration_display(Some(9), None), "09-xxxx");
    }

    #[test]
    fn expiration_timestamp_snaps_to_first_of_month() {
        assert_eq!(
            expiration_timestamp(Some(3), Some(2027)),
            "2027-03-01 00:00:00"
        );
    }

    #[test]
    fn expiration_timestamp_falls_back_for_bad_month() {
        let fallback = expiration_timestamp(Some(13), Some(2027));
        assert!(fallback.ends_with(" 00:00:00"));
        assert_ne!(fallback, "2027-13-01 00:00:00");
    }
}
