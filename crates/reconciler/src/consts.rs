//! Constants shared across the reconciler.

/// Custom-field key carrying the order correlation id in provider responses.
pub const ORDER_ID_CUSTOM_FIELD: &str = "orderId";

/// Payment additional-information key set by the checkout when the shopper
/// opted into stored-card vaulting.
pub const VAULT_ENABLER_KEY: &str = "vaultEnabler";

/// Header carrying the checkout session id on synchronous callbacks.
pub const X_SESSION_ID: &str = "X-Session-Id";

/// Keys of the JSON result returned to the callback caller.
pub const REDIRECT_URL_KEY: &str = "redirect-url";
pub const FORM_URL_KEY: &str = "form-url";
pub const FORM_METHOD_KEY: &str = "form-method";

/// Token type recorded on vaulted card tokens.
pub const TOKEN_TYPE_CARD: &str = "card";

/// Number of masked-PAN characters kept in vault token details.
pub const PAN_SUFFIX_LEN: usize = 4;
