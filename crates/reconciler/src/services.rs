pub mod api;
pub mod email;

pub use api::{http_response_json, http_response_ok};
pub use email::{EmailError, InvoiceNotifier, LoggingInvoiceNotifier};
