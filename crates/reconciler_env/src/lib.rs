#![forbid(unsafe_code)]

//!
//! Environment of the payment notification reconciler: logger and its setup.
//!

pub mod logger;

#[doc(inline)]
pub use logger::setup;
pub use tracing;
pub use tracing::instrument;
