use actix_web::{web, HttpRequest, HttpResponse};
use reconciler_env::instrument;

use super::app::AppState;
use crate::{consts, core::dispatch, services, types::api::CallbackParams};

/// `POST /frontend/callback`
///
/// Hit by the shopper's browser when the provider hands control back. Always
/// answers with an OK envelope; see [`dispatch::handle_callback`].
#[instrument(skip_all)]
pub async fn frontend_callback(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<CallbackParams>,
) -> HttpResponse {
    let session_id = req
        .headers()
        .get(consts::X_SESSION_ID)
        .and_then(|value| value.to_str().ok());

    let response =
        dispatch::handle_callback(&state, session_id, form.js_response.as_deref()).await;
    services::http_response_json(response)
}
