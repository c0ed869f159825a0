//! Entry points behind the two inbound HTTP surfaces.

use error_stack::ResultExt;
use reconciler_env::{instrument, logger};

use crate::{
    core::{
        errors::{ApiErrorResponse, CustomResult, DecodeError, ReconcileOutcome},
        notification,
    },
    provider::ProviderResponse,
    routes::app::AppState,
    types::api::CallbackResponse,
};

/// Synchronous callback from the shopper's browser after payment.
///
/// This surface never reports failure to the caller: whatever goes wrong is
/// logged and the shopper gets an empty OK envelope, leaving the
/// asynchronous notification path to settle the order.
#[instrument(skip_all)]
pub async fn handle_callback(
    state: &AppState,
    session_id: Option<&str>,
    js_response: Option<&str>,
) -> CallbackResponse {
    if let Some(payload) = js_response {
        return match reconcile_client_payload(state, payload).await {
            Ok(response) => response,
            Err(error) => {
                logger::error!(?error, "callback reconciliation failed");
                CallbackResponse::empty()
            }
        };
    }

    if let Some(session_id) = session_id {
        match state.store.pop_session_redirect_url(session_id).await {
            Ok(Some(url)) => return CallbackResponse::redirect(url),
            Ok(None) => {}
            Err(error) => {
                logger::error!(?error, "failed to look up session redirect");
            }
        }
    }

    CallbackResponse::redirect(format!(
        "{}/frontend/redirect",
        state.conf.gateway.base_url.trim_end_matches('/')
    ))
}

async fn reconcile_client_payload(
    state: &AppState,
    payload: &str,
) -> CustomResult<CallbackResponse, ApiErrorResponse> {
    let response = state
        .decoder
        .decode_client_payload(payload)
        .change_context(ApiErrorResponse::MalformedNotification)?;

    // A pending interaction short-circuits: the shopper must be sent to the
    // follow-up form before any order state can settle.
    if let ProviderResponse::Interaction(interaction) = &response {
        let form_url = html_escape::decode_html_entities(&interaction.form_url).into_owned();
        let fields = interaction
            .form_fields
            .iter()
            .map(|(name, value)| {
                (
                    name.clone(),
                    html_escape::decode_html_entities(value).into_owned(),
                )
            })
            .collect();
        return Ok(CallbackResponse::form(
            form_url,
            interaction.form_method.clone(),
            fields,
        ));
    }

    let outcome = notification::process(&*state.store, &*state.notifier, response)
        .await
        .change_context(ApiErrorResponse::InternalServerError)?;
    logger::info!(?outcome, "callback reconciled");
    Ok(CallbackResponse::empty())
}

/// Asynchronous server-to-server notification from the provider.
///
/// Undecodable payloads are rejected so the provider retries; everything the
/// reconciler classifies, including no-effect outcomes, acknowledges with
/// success to stop redelivery.
#[instrument(skip_all)]
pub async fn handle_notification(
    state: &AppState,
    body: &[u8],
) -> CustomResult<ReconcileOutcome, ApiErrorResponse> {
    let response = state.decoder.decode_notification(body).map_err(|error| {
        // Required-field failures mean the document parsed; keep the payload
        // in the logs so the mismatch can be diagnosed.
        if matches!(error.current_context(), DecodeError::InvalidArgument { .. }) {
            logger::error!(
                payload = %String::from_utf8_lossy(body),
                "notification payload is missing required fields"
            );
        }
        error.change_context(ApiErrorResponse::MalformedNotification)
    })?;

    let outcome = notification::process(&*state.store, &*state.notifier, response)
        .await
        .change_context(ApiErrorResponse::InternalServerError)?;
    logger::info!(?outcome, "notification reconciled");
    Ok(outcome)
}
