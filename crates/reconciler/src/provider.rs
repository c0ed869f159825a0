//! Decoded provider responses and the decoding seam.

use std::collections::HashMap;

use masking::Secret;

use crate::{
    consts,
    core::errors::{CustomResult, DecodeError},
};

pub mod decoder;

pub use decoder::JsonProviderDecoder;

/// A provider response after classification.
#[derive(Clone, Debug)]
pub enum ProviderResponse {
    Success(Box<SuccessResponse>),
    Failure(FailureResponse),
    /// The provider requires a follow-up form submission from the shopper
    /// (3-D Secure and similar flows).
    Interaction(FormInteraction),
    /// Transaction state the classifier does not recognize.
    Unknown(UnknownResponse),
}

impl ProviderResponse {
    /// Correlation key back to the merchant order, when the provider echoed
    /// it in the custom fields.
    pub fn order_id(&self) -> Option<&str> {
        self.custom_field(consts::ORDER_ID_CUSTOM_FIELD)
    }

    pub fn custom_field(&self, name: &str) -> Option<&str> {
        let fields = match self {
            Self::Success(success) => &success.custom_fields,
            Self::Failure(failure) => &failure.custom_fields,
            Self::Interaction(interaction) => &interaction.custom_fields,
            Self::Unknown(unknown) => &unknown.custom_fields,
        };
        fields.get(name).map(String::as_str)
    }
}

/// Successful transaction outcome.
#[derive(Clone, Debug)]
pub struct SuccessResponse {
    pub transaction_id: String,
    /// Provider-side transaction type string, mapped downstream.
    pub transaction_type: String,
    pub parent_transaction_id: Option<String>,
    pub card: Option<CardInfo>,
    pub custom_fields: HashMap<String, String>,
    /// Remaining scalar response fields, kept verbatim for bookkeeping.
    pub data: HashMap<String, String>,
}

/// Card details attached to a successful response, present when the
/// transaction produced a reusable gateway token.
#[derive(Clone, Debug)]
pub struct CardInfo {
    pub token_id: String,
    pub masked_pan: Option<Secret<String>>,
    pub expiration_month: Option<u8>,
    pub expiration_year: Option<u16>,
    pub brand: Option<String>,
}

/// Failed transaction outcome with provider status entries.
#[derive(Clone, Debug)]
pub struct FailureResponse {
    pub custom_fields: HashMap<String, String>,
    pub statuses: Vec<StatusEntry>,
}

#[derive(Clone, Debug)]
pub struct StatusEntry {
    pub code: String,
    pub description: String,
}

/// Pending interaction the shopper must complete.
#[derive(Clone, Debug)]
pub struct FormInteraction {
    pub form_url: String,
    pub form_method: String,
    pub form_fields: Vec<(String, String)>,
    pub custom_fields: HashMap<String, String>,
}

#[derive(Clone, Debug)]
pub struct UnknownResponse {
    pub transaction_state: String,
    pub custom_fields: HashMap<String, String>,
}

/// Decoding seam between the wire format and [`ProviderResponse`].
pub trait ProviderDecoder: Send + Sync {
    /// Decode a raw server-to-server notification body.
    fn decode_notification(&self, body: &[u8]) -> CustomResult<ProviderResponse, DecodeError>;

    /// Decode the base64 payload embedded in a synchronous client callback.
    fn decode_client_payload(&self, payload: &str) -> CustomResult<ProviderResponse, DecodeError>;
}
