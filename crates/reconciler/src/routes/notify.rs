use actix_web::{web, HttpResponse};
use reconciler_env::instrument;

use super::app::AppState;
use crate::{core::dispatch, services};

/// `POST /frontend/notify`
///
/// Server-to-server notification endpoint. The provider retries on anything
/// other than a success status, so only undecodable payloads are rejected.
#[instrument(skip_all)]
pub async fn frontend_notify(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> HttpResponse {
    match dispatch::handle_notification(&state, &body).await {
        Ok(_) => services::http_response_ok(),
        Err(error) => services::api::log_and_return_error_response(error.current_context().clone()),
    }
}
