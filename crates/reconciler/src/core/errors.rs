//! Error taxonomy for decoding and reconciliation.

use actix_web::{body::BoxBody, http::StatusCode, HttpResponse, ResponseError};
use common_enums::OrderStatus;
use reconciler_env::logger;

/// Alias for an `error_stack` backed result.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failures while turning raw provider bytes into a [`crate::provider::ProviderResponse`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("provider response could not be parsed")]
    MalformedResponse,
    #[error("provider response is missing required field: {field}")]
    InvalidArgument { field: &'static str },
}

/// Failures while applying a decoded response to the order record.
///
/// A missing correlation key or an unknown order are deliberately not
/// errors here. Notifications for foreign or stale orders are routine and
/// resolve to [`ReconcileOutcome::NoEffect`].
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("unsupported provider transaction type: {provider_type}")]
    UnsupportedTransactionType { provider_type: String },
    #[error("failed to capture invoice for the order")]
    InvoiceCaptureFailed,
    #[error("storage operation failed")]
    StorageFailure,
}

/// Failures from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("value not found: {0}")]
    ValueNotFound(String),
    #[error("duplicate entry for {entity} ({key:?})")]
    DuplicateValue {
        entity: &'static str,
        key: Option<String>,
    },
    #[error("error on mock db")]
    MockDbError,
}

impl StorageError {
    pub fn is_db_not_found(&self) -> bool {
        matches!(self, Self::ValueNotFound(_))
    }

    pub fn is_db_unique_violation(&self) -> bool {
        matches!(self, Self::DuplicateValue { .. })
    }
}

/// What a reconciliation run did to the order, reported to callers and logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Updated {
        increment_id: String,
        status: OrderStatus,
    },
    NoEffect,
}

/// Error surface of the HTTP layer.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ApiErrorResponse {
    #[error("the notification payload could not be decoded")]
    MalformedNotification,
    #[error("an internal error occurred while processing the notification")]
    InternalServerError,
}

#[derive(serde::Serialize)]
struct ApiErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

impl ResponseError for ApiErrorResponse {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedNotification => StatusCode::BAD_REQUEST,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        logger::error!(error = ?self, "api error response");
        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            status: "ERROR",
            message: &self.to_string(),
        })
    }
}
