use serde::{Deserialize, Serialize};

/// Lifecycle state of a merchant order.
///
/// Orders are created upstream in the `Pending` state; this subsystem only ever
/// moves them forward to `Processing`/`Complete` or sideways to `Cancelled`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Complete,
    Cancelled,
}

/// Local transaction type a provider transaction maps onto.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionType {
    Authorization,
    Capture,
    Debit,
    Purchase,
    Refund,
    Void,
}

impl TransactionType {
    /// Map a provider-side transaction type onto the local enum.
    ///
    /// The mapping is authoritative: a provider type with no entry here returns
    /// `None` and the caller must treat that as an error rather than pass the
    /// raw string downstream.
    pub fn from_provider(provider_type: &str) -> Option<Self> {
        match provider_type {
            "authorization" => Some(Self::Authorization),
            "capture-authorization" => Some(Self::Capture),
            "debit" => Some(Self::Debit),
            "purchase" => Some(Self::Purchase),
            "credit" | "refund-capture" | "refund-debit" | "refund-purchase" => Some(Self::Refund),
            "void-authorization" | "void-debit" | "void-purchase" => Some(Self::Void),
            _ => None,
        }
    }

    /// Whether a transaction of this type settles funds and therefore captures
    /// an invoice on the order.
    pub fn captures_invoice(self) -> bool {
        matches!(self, Self::Debit | Self::Purchase)
    }
}

/// Card brand as reported by the provider, with the two-letter code the order
/// management side stores in token details.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CardBrand {
    Amex,
    Aura,
    Diners,
    Discover,
    Elo,
    Hipercard,
    Jcb,
    Mastercard,
    Visa,
    Other,
}

impl CardBrand {
    /// Parse a provider brand string. Unknown brands collapse to `Other`.
    pub fn from_provider(brand: &str) -> Self {
        match brand {
            "amex" => Self::Amex,
            "aura" => Self::Aura,
            "diners" => Self::Diners,
            "discover" => Self::Discover,
            "elo" => Self::Elo,
            "hipercard" => Self::Hipercard,
            "jcb" => Self::Jcb,
            "mastercard" => Self::Mastercard,
            "visa" => Self::Visa,
            _ => Self::Other,
        }
    }

    /// Two-letter code stored in vault token details.
    pub fn code(self) -> &'static str {
        match self {
            Self::Amex => "AE",
            Self::Aura => "AU",
            Self::Diners => "DN",
            Self::Discover => "DI",
            Self::Elo => "ELO",
            Self::Hipercard => "HC",
            Self::Jcb => "JCB",
            Self::Mastercard => "MC",
            Self::Visa => "VI",
            Self::Other => "OT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_brand_mapping_table() {
        let expected = [
            ("amex", "AE"),
            ("aura", "AU"),
            ("diners", "DN"),
            ("discover", "DI"),
            ("elo", "ELO"),
            ("hipercard", "HC"),
            ("jcb", "JCB"),
            ("mastercard", "MC"),
            ("visa", "VI"),
        ];
        for (brand, code) in expected {
            assert_eq!(CardBrand::from_provider(brand).code(), code);
        }
    }

    #[test]
    fn unknown_card_brand_defaults_to_other() {
        assert_eq!(CardBrand::from_provider("xyz").code(), "OT");
        assert_eq!(CardBrand::from_provider("").code(), "OT");
    }

    #[test]
    fn provider_transaction_type_mapping() {
        assert_eq!(
            TransactionType::from_provider("authorization"),
            Some(TransactionType::Authorization)
        );
        assert_eq!(
            TransactionType::from_provider("capture-authorization"),
            Some(TransactionType::Capture)
        );
        assert_eq!(
            TransactionType::from_provider("debit"),
            Some(TransactionType::Debit)
        );
        assert_eq!(
            TransactionType::from_provider("refund-debit"),
            Some(TransactionType::Refund)
        );
        assert_eq!(TransactionType::from_provider("check-enrollment"), None);
    }

    #[test]
    fn only_debit_and_purchase_capture_invoices() {
        assert!(TransactionType::Debit.captures_invoice());
        assert!(TransactionType::Purchase.captures_invoice());
        assert!(!TransactionType::Authorization.captures_invoice());
        assert!(!TransactionType::Capture.captures_invoice());
        assert!(!TransactionType::Refund.captures_invoice());
        assert!(!TransactionType::Void.captures_invoice());
    }

    #[test]
    fn order_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Processing).ok(),
            Some("\"processing\"".to_string())
        );
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }
}
