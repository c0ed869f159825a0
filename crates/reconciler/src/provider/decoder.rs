//! Wire-format decoding of provider notification documents.
//!
//! The provider posts a JSON document with a single `payment` object and
//! kebab-case keys. Synchronous client callbacks carry the same document
//! base64-encoded inside a form parameter.

use std::collections::HashMap;

use base64::Engine;
use error_stack::{report, ResultExt};
use masking::Secret;
use reconciler_env::logger;

use super::{
    CardInfo, FailureResponse, FormInteraction, ProviderDecoder, ProviderResponse, StatusEntry,
    SuccessResponse, UnknownResponse,
};
use crate::core::errors::{CustomResult, DecodeError};

const TRANSACTION_STATE_SUCCESS: &str = "success";
const TRANSACTION_STATE_FAILED: &str = "failed";

#[derive(Debug, serde::Deserialize)]
struct NotificationDocument {
    payment: PaymentDocument,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PaymentDocument {
    transaction_state: Option<String>,
    transaction_id: Option<String>,
    transaction_type: Option<String>,
    parent_transaction_id: Option<String>,
    custom_fields: Option<CustomFieldsDocument>,
    card_token: Option<CardTokenDocument>,
    card: Option<CardDocument>,
    statuses: Option<StatusesDocument>,
    form_interaction: Option<FormInteractionDocument>,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CustomFieldsDocument {
    #[serde(default)]
    custom_field: Vec<CustomFieldDocument>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CustomFieldDocument {
    field_name: String,
    field_value: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CardTokenDocument {
    token_id: String,
    masked_account_number: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CardDocument {
    expiration_month: Option<u8>,
    expiration_year: Option<u16>,
    card_type: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StatusesDocument {
    #[serde(default)]
    status: Vec<StatusDocument>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StatusDocument {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FormInteractionDocument {
    url: String,
    method: String,
    #[serde(default)]
    fields: Vec<FormFieldDocument>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FormFieldDocument {
    name: String,
    value: String,
}

/// Decoder for the provider's JSON notification format.
#[derive(Clone, Debug, Default)]
pub struct JsonProviderDecoder;

impl ProviderDecoder for JsonProviderDecoder {
    fn decode_notification(&self, body: &[u8]) -> CustomResult<ProviderResponse, DecodeError> {
        let document: NotificationDocument = serde_json::from_slice(body)
            .change_context(DecodeError::MalformedResponse)
            .attach_printable("notification body is not a valid provider document")?;
        classify(document.payment)
    }

    fn decode_client_payload(&self, payload: &str) -> CustomResult<ProviderResponse, DecodeError> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .change_context(DecodeError::MalformedResponse)
            .attach_printable("client payload is not valid base64")?;
        self.decode_notification(&decoded)
    }
}

fn classify(payment: PaymentDocument) -> CustomResult<ProviderResponse, DecodeError> {
    let transaction_state = payment
        .transaction_state
        .clone()
        .ok_or_else(|| report!(DecodeError::InvalidArgument {
            field: "transaction-state",
        }))?;

    let custom_fields = collect_custom_fields(&payment);

    match transaction_state.as_str() {
        TRANSACTION_STATE_SUCCESS => {
            if let Some(form) = payment.form_interaction {
                return Ok(ProviderResponse::Interaction(FormInteraction {
                    form_url: form.url,
                    form_method: form.method,
                    form_fields: form
                        .fields
                        .into_iter()
                        .map(|field| (field.name, field.value))
                        .collect(),
                    custom_fields,
                }));
            }
            let transaction_id = payment.transaction_id.clone().ok_or_else(|| {
                report!(DecodeError::InvalidArgument {
                    field: "transaction-id",
                })
            })?;
            let transaction_type = payment.transaction_type.clone().ok_or_else(|| {
                report!(DecodeError::InvalidArgument {
                    field: "transaction-type",
                })
            })?;
            let card = collect_card(&payment);
            let data = collect_data(&payment);
            Ok(ProviderResponse::Success(Box::new(SuccessResponse {
                transaction_id,
                transaction_type,
                parent_transaction_id: payment.parent_transaction_id,
                card,
                custom_fields,
                data,
            })))
        }
        TRANSACTION_STATE_FAILED => Ok(ProviderResponse::Failure(FailureResponse {
            custom_fields,
            statuses: payment
                .statuses
                .map(|statuses| {
                    statuses
                        .status
                        .into_iter()
                        .map(|status| StatusEntry {
                            code: status.code.unwrap_or_default(),
                            description: status.description.unwrap_or_default(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })),
        other => {
            logger::warn!(transaction_state = other, "unclassified transaction state");
            Ok(ProviderResponse::Unknown(UnknownResponse {
                transaction_state,
                custom_fields,
            }))
        }
    }
}

fn collect_custom_fields(payment: &PaymentDocument) -> HashMap<String, String> {
    payment
        .custom_fields
        .as_ref()
        .map(|fields| {
            fields
                .custom_field
                .iter()
                .map(|field| (field.field_name.clone(), field.field_value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn collect_card(payment: &PaymentDocument) -> Option<CardInfo> {
    let token = payment.card_token.as_ref()?;
    let card = payment.card.as_ref();
    Some(CardInfo {
        token_id: token.token_id.clone(),
        masked_pan: token.masked_account_number.clone().map(Secret::new),
        expiration_month: card.and_then(|card| card.expiration_month),
        expiration_year: card.and_then(|card| card.expiration_year),
        brand: card.and_then(|card| card.card_type.clone()),
    })
}

/// Scalars the typed document did not claim, stringified for raw bookkeeping.
fn collect_data(payment: &PaymentDocument) -> HashMap<String, String> {
    payment
        .extra
        .iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                serde_json::Value::String(text) => text.clone(),
                serde_json::Value::Number(number) => number.to_string(),
                serde_json::Value::Bool(flag) => flag.to_string(),
                _ => return None,
            };
            Some((key.clone(), rendered))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> JsonProviderDecoder {
        JsonProviderDecoder
    }

    fn success_body() -> Vec<u8> {
        serde_json::json!({
            "payment": {
                "transaction-state": "success",
                "transaction-id": "trx-1",
                "transaction-type": "debit",
                "requested-amount": "12.34",
                "custom-fields": {
                    "custom-field": [
                        {"field-name": "orderId", "field-value": "000000042"}
                    ]
                },
                "card-token": {
                    "token-id": "4304509873471003",
                    "masked-account-number": "5151***5485"
                },
                "card": {
                    "expiration-month": 1,
                    "expiration-year": 2023,
                    "card-type": "visa"
                }
            }
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn decodes_success_document() {
        let response = decoder().decode_notification(&success_body()).unwrap();
        assert_eq!(response.order_id(), Some("000000042"));
        let ProviderResponse::Success(success) = response else {
            panic!("expected success");
        };
        assert_eq!(success.transaction_id, "trx-1");
        assert_eq!(success.transaction_type, "debit");
        let card = success.card.expect("card info");
        assert_eq!(card.token_id, "4304509873471003");
        assert_eq!(card.brand.as_deref(), Some("visa"));
        assert_eq!(success.data.get("requested-amount").map(String::as_str), Some("12.34"));
    }

    #[test]
    fn decodes_failure_with_statuses() {
        let body = serde_json::json!({
            "payment": {
                "transaction-state": "failed",
                "statuses": {
                    "status": [
                        {"code": "500.1072", "description": "Session timed out", "severity": "error"}
                    ]
                }
            }
        })
        .to_string();
        let response = decoder().decode_notification(body.as_bytes()).unwrap();
        let ProviderResponse::Failure(failure) = response else {
            panic!("expected failure");
        };
        assert_eq!(failure.statuses.len(), 1);
        assert_eq!(failure.statuses[0].code, "500.1072");
    }

    #[test]
    fn success_requires_transaction_id() {
        let body = serde_json::json!({
            "payment": {
                "transaction-state": "success",
                "transaction-type": "debit"
            }
        })
        .to_string();
        let error = decoder()
            .decode_notification(body.as_bytes())
            .unwrap_err();
        assert!(matches!(
            error.current_context(),
            DecodeError::InvalidArgument {
                field: "transaction-id"
            }
        ));
    }

    #[test]
    fn missing_state_is_invalid_argument() {
        let body = serde_json::json!({"payment": {"transaction-id": "trx"}}).to_string();
        let error = decoder()
            .decode_notification(body.as_bytes())
            .unwrap_err();
        assert!(matches!(
            error.current_context(),
            DecodeError::InvalidArgument {
                field: "transaction-state"
            }
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        let error = decoder().decode_notification(b"not json").unwrap_err();
        assert!(matches!(
            error.current_context(),
            DecodeError::MalformedResponse
        ));
    }

    #[test]
    fn unknown_state_is_passed_through() {
        let body = serde_json::json!({
            "payment": {"transaction-state": "in-progress"}
        })
        .to_string();
        let response = decoder().decode_notification(body.as_bytes()).unwrap();
        let ProviderResponse::Unknown(unknown) = response else {
            panic!("expected unknown");
        };
        assert_eq!(unknown.transaction_state, "in-progress");
    }

    #[test]
    fn client_payload_round_trips_through_base64() {
        let payload = base64::engine::general_purpose::STANDARD.encode(success_body());
        let response = decoder().decode_client_payload(&payload).unwrap();
        assert!(matches!(response, ProviderResponse::Success(_)));
    }

    #[test]
    fn client_payload_rejects_bad_base64() {
        let error = decoder().decode_client_payload("%%%").unwrap_err();
        assert!(matches!(
            error.current_context(),
            DecodeError::MalformedResponse
        ));
    }

    #[test]
    fn form_interaction_wins_over_success_fields() {
        let body = serde_json::json!({
            "payment": {
                "transaction-state": "success",
                "form-interaction": {
                    "url": "https://acs.example/challenge",
                    "method": "POST",
                    "fields": [{"name": "PaReq", "value": "abc"}]
                }
            }
        })
        .to_string();
        let response = decoder().decode_notification(body.as_bytes()).unwrap();
        let ProviderResponse::Interaction(interaction) = response else {
            panic!("expected interaction");
        };
        assert_eq!(interaction.form_method, "POST");
        assert_eq!(interaction.form_fields, vec![("PaReq".to_string(), "abc".to_string())]);
    }
}
