#![forbid(unsafe_code)]
#![warn(missing_docs)]

//!
//! Personal Identifiable Information protection. Wrapper types and traits for
//! secret management which help ensure secrets aren't accidentally logged or
//! otherwise exposed.
//!

mod strategy;
pub use strategy::{Strategy, WithType};

mod abs;
pub use abs::{ExposeInterface, PeekInterface};

mod secret;
pub use secret::Secret;

mod serde;
