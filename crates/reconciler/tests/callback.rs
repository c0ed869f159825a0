//! Synchronous callback dispatch behavior.

use base64::Engine;
use common_enums::OrderStatus;
use reconciler::{
    configs::Settings,
    core::dispatch,
    db::{MockDb, RedirectSessionInterface},
    routes::AppState,
    types::storage,
};

fn state_with(db: MockDb) -> (AppState, MockDb) {
    let state = AppState::with_storage(Settings::default(), Box::new(db.clone()));
    (state, db)
}

fn pending_order(increment_id: &str) -> storage::Order {
    storage::Order {
        increment_id: increment_id.to_string(),
        status: OrderStatus::Pending,
        grand_total: 5000,
        currency: "EUR".to_string(),
        customer_id: None,
        payment: storage::Payment::default(),
        status_history: Vec::new(),
    }
}

fn encode(document: serde_json::Value) -> String {
    base64::engine::general_purpose::STANDARD.encode(document.to_string())
}

#[tokio::test]
async fn callback_without_payload_redirects_to_default() {
    let (state, _db) = state_with(MockDb::new());

    let response = dispatch::handle_callback(&state, None, None).await;

    assert_eq!(
        response.data().get("redirect-url").map(String::as_str),
        Some("http://localhost:8080/frontend/redirect")
    );
}

#[tokio::test]
async fn callback_uses_session_redirect_once() {
    let db = MockDb::new();
    db.store_session_redirect_url("sess-1", "https://shop.example/thank-you")
        .await
        .unwrap();
    let (state, _db) = state_with(db);

    let first = dispatch::handle_callback(&state, Some("sess-1"), None).await;
    assert_eq!(
        first.data().get("redirect-url").map(String::as_str),
        Some("https://shop.example/thank-you")
    );

    // Replayed callbacks fall back to the default target.
    let second = dispatch::handle_callback(&state, Some("sess-1"), None).await;
    assert_eq!(
        second.data().get("redirect-url").map(String::as_str),
        Some("http://localhost:8080/frontend/redirect")
    );
}

#[tokio::test]
async fn callback_with_payload_reconciles_the_order() {
    let db = MockDb::new();
    db.insert_order(pending_order("100000020")).await;
    let (state, db) = state_with(db);

    let payload = encode(serde_json::json!({
        "payment": {
            "transaction-state": "success",
            "transaction-id": "trx-9",
            "transaction-type": "authorization",
            "custom-fields": {
                "custom-field": [
                    {"field-name": "orderId", "field-value": "100000020"}
                ]
            }
        }
    }));

    let response = dispatch::handle_callback(&state, None, Some(&payload)).await;

    assert!(response.data().is_empty());
    assert_eq!(db.orders().await.remove(0).status, OrderStatus::Processing);
}

#[tokio::test]
async fn callback_surfaces_pending_form_interaction() {
    let (state, db) = state_with(MockDb::new());

    let payload = encode(serde_json::json!({
        "payment": {
            "transaction-state": "success",
            "form-interaction": {
                "url": "https://acs.example/challenge?a=1&amp;b=2",
                "method": "POST",
                "fields": [
                    {"name": "PaReq", "value": "abc&amp;def"}
                ]
            }
        }
    }));

    let response = dispatch::handle_callback(&state, None, Some(&payload)).await;

    let data = response.data();
    // HTML entities from the embedded document are decoded before the form
    // is handed back to the frontend.
    assert_eq!(
        data.get("form-url").map(String::as_str),
        Some("https://acs.example/challenge?a=1&b=2")
    );
    assert_eq!(data.get("form-method").map(String::as_str), Some("POST"));
    assert_eq!(data.get("PaReq").map(String::as_str), Some("abc&def"));
    assert_eq!(db.order_save_count(), 0);
}

#[tokio::test]
async fn callback_with_garbage_payload_degrades_to_empty_ok() {
    let db = MockDb::new();
    db.insert_order(pending_order("100000021")).await;
    let (state, db) = state_with(db);

    let response = dispatch::handle_callback(&state, None, Some("not-base64!")).await;

    assert!(response.data().is_empty());
    assert_eq!(db.orders().await.remove(0).status, OrderStatus::Pending);
    assert_eq!(db.order_save_count(), 0);
}

#[tokio::test]
async fn notification_rejects_undecodable_body() {
    let (state, _db) = state_with(MockDb::new());

    let error = dispatch::handle_notification(&state, b"not json")
        .await
        .unwrap_err();
    let rendered = error.to_string();
    assert!(rendered.contains("decoded"));
}

#[tokio::test]
async fn notification_missing_required_fields_is_rejected() {
    let (state, db) = state_with(MockDb::new());

    // Parses as a provider document but lacks the transaction state.
    let body = serde_json::json!({
        "payment": {"transaction-id": "trx-1"}
    })
    .to_string();

    let error = dispatch::handle_notification(&state, body.as_bytes())
        .await
        .unwrap_err();
    assert!(error.to_string().contains("decoded"));
    assert_eq!(db.order_save_count(), 0);
}

#[tokio::test]
async fn notification_acknowledges_unknown_orders() {
    let (state, db) = state_with(MockDb::new());

    let body = serde_json::json!({
        "payment": {
            "transaction-state": "failed",
            "custom-fields": {
                "custom-field": [
                    {"field-name": "orderId", "field-value": "does-not-exist"}
                ]
            }
        }
    })
    .to_string();

    let outcome = dispatch::handle_notification(&state, body.as_bytes())
        .await
        .unwrap();
    assert_eq!(
        outcome,
        reconciler::core::errors::ReconcileOutcome::NoEffect
    );
    assert_eq!(db.order_save_count(), 0);
}
