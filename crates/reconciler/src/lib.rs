#![forbid(unsafe_code)]

//! Payment gateway notification reconciler.
//!
//! Receives provider callbacks and server-to-server notifications, decodes
//! them into a [`provider::ProviderResponse`], classifies the result and
//! applies it to the merchant order record: status transition, transaction
//! bookkeeping, invoice capture and stored-card token persistence.

pub mod configs;
pub mod consts;
pub mod core;
pub mod db;
pub mod provider;
pub mod routes;
pub mod services;
pub mod types;
pub mod utils;

pub use reconciler_env::logger;
