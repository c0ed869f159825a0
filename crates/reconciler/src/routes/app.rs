//! Application state and route scopes.

use std::sync::Arc;

use actix_web::{web, Scope};

use super::{callback, health, notify};
use crate::{
    configs::Settings,
    db::{MockDb, StorageInterface},
    provider::{JsonProviderDecoder, ProviderDecoder},
    services::{InvoiceNotifier, LoggingInvoiceNotifier},
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub conf: Arc<Settings>,
    pub store: Box<dyn StorageInterface>,
    pub decoder: Arc<dyn ProviderDecoder>,
    pub notifier: Arc<dyn InvoiceNotifier>,
}

impl AppState {
    /// State backed by the in-memory store and the default JSON decoder.
    pub fn new(conf: Settings) -> Self {
        Self::with_storage(conf, Box::new(MockDb::new()))
    }

    pub fn with_storage(conf: Settings, store: Box<dyn StorageInterface>) -> Self {
        Self {
            conf: Arc::new(conf),
            store,
            decoder: Arc::new(JsonProviderDecoder),
            notifier: Arc::new(LoggingInvoiceNotifier),
        }
    }
}

/// Shopper-facing payment return surface.
pub struct Frontend;

impl Frontend {
    pub fn server(state: AppState) -> Scope {
        web::scope("/frontend")
            .app_data(web::Data::new(state))
            .service(web::resource("/callback").route(web::post().to(callback::frontend_callback)))
            .service(web::resource("/notify").route(web::post().to(notify::frontend_notify)))
    }
}

pub struct Health;

impl Health {
    pub fn server(state: AppState) -> Scope {
        web::scope("/health")
            .app_data(web::Data::new(state))
            .service(web::resource("").route(web::get().to(health::health)))
    }
}
