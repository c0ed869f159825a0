//! Applying a classified provider response to the merchant order.

use common_enums::{OrderStatus, TransactionType};
use error_stack::{report, ResultExt};
use reconciler_env::{instrument, logger};

use crate::{
    core::{
        errors::{CustomResult, ReconcileError, ReconcileOutcome},
        vault,
    },
    db::StorageInterface,
    provider::{FailureResponse, ProviderResponse, SuccessResponse},
    services::InvoiceNotifier,
    types::storage,
    utils,
};

/// Apply a decoded provider response to the order it references.
///
/// Responses with no order correlation key, or referencing an order this
/// store does not know, are routine noise and resolve to
/// [`ReconcileOutcome::NoEffect`]. The order record is written back exactly
/// once per run, after all in-memory mutation is done.
#[instrument(skip_all, fields(order_id))]
pub async fn process(
    store: &dyn StorageInterface,
    notifier: &dyn InvoiceNotifier,
    response: ProviderResponse,
) -> CustomResult<ReconcileOutcome, ReconcileError> {
    let Some(increment_id) = response.order_id().map(str::to_string) else {
        logger::error!("provider response carried no order correlation key");
        return Ok(ReconcileOutcome::NoEffect);
    };
    tracing::Span::current().record("order_id", increment_id.as_str());

    let order = match store.find_order_by_increment_id(&increment_id).await {
        Ok(order) => order,
        Err(error) if error.current_context().is_db_not_found() => {
            logger::warn!(%increment_id, "notification references an unknown order");
            return Ok(ReconcileOutcome::NoEffect);
        }
        Err(error) => return Err(error.change_context(ReconcileError::StorageFailure)),
    };

    match response {
        ProviderResponse::Success(success) => {
            handle_success(store, notifier, order, *success).await
        }
        ProviderResponse::Failure(failure) => handle_failure(store, order, failure).await,
        ProviderResponse::Interaction(_) => {
            logger::warn!(%increment_id, "pending interaction received on notification path");
            Ok(ReconcileOutcome::NoEffect)
        }
        ProviderResponse::Unknown(unknown) => {
            logger::warn!(
                %increment_id,
                transaction_state = %unknown.transaction_state,
                "ignoring unclassified provider response"
            );
            Ok(ReconcileOutcome::NoEffect)
        }
    }
}

#[instrument(skip_all)]
async fn handle_success(
    store: &dyn StorageInterface,
    notifier: &dyn InvoiceNotifier,
    mut order: storage::Order,
    success: SuccessResponse,
) -> CustomResult<ReconcileOutcome, ReconcileError> {
    // Completed orders keep their state; everything else moves to processing.
    if order.status != OrderStatus::Complete {
        order.set_status(OrderStatus::Processing);
    }

    let kind = TransactionType::from_provider(&success.transaction_type).ok_or_else(|| {
        report!(ReconcileError::UnsupportedTransactionType {
            provider_type: success.transaction_type.clone(),
        })
    })?;

    let payment = &mut order.payment;
    payment.last_transaction_id = Some(success.transaction_id.clone());
    payment.transaction_id = Some(success.transaction_id.clone());
    // A follow-up without a parent id must not erase the recorded one.
    if let Some(parent) = &success.parent_transaction_id {
        payment.parent_transaction_id = Some(parent.clone());
    }
    for (key, value) in &success.data {
        payment.raw_details.insert(key.clone(), value.clone());
    }
    payment.transactions.push(storage::TransactionRecord {
        transaction_id: success.transaction_id.clone(),
        kind,
        // Authorizations stay open so the later capture can reference them.
        is_closed: kind != TransactionType::Authorization,
    });

    if kind.captures_invoice() {
        capture_invoice(store, notifier, &mut order, &success).await?;
    }

    if order.payment.vault_requested() {
        let outcome = vault::save_card_token(store, &mut order, success.card.as_ref()).await?;
        logger::debug!(vault_outcome = ?outcome, "card token persistence finished");
    }

    let order = store
        .update_order(order)
        .await
        .change_context(ReconcileError::StorageFailure)?;

    Ok(ReconcileOutcome::Updated {
        increment_id: order.increment_id,
        status: order.status,
    })
}

#[instrument(skip_all)]
async fn handle_failure(
    store: &dyn StorageInterface,
    mut order: storage::Order,
    failure: FailureResponse,
) -> CustomResult<ReconcileOutcome, ReconcileError> {
    for status in &failure.statuses {
        logger::error!(
            "Error occurred: {} ({})",
            status.description,
            status.code
        );
    }

    order.cancel();
    let order = store
        .update_order(order)
        .await
        .change_context(ReconcileError::StorageFailure)?;

    Ok(ReconcileOutcome::Updated {
        increment_id: order.increment_id,
        status: order.status,
    })
}

/// Create and pay the invoice for a settling transaction, then record it in
/// the order history. The mail send is best effort.
async fn capture_invoice(
    store: &dyn StorageInterface,
    notifier: &dyn InvoiceNotifier,
    order: &mut storage::Order,
    success: &SuccessResponse,
) -> CustomResult<(), ReconcileError> {
    let invoice = storage::Invoice {
        invoice_id: format!("inv-{}-{}", order.increment_id, success.transaction_id),
        order_increment_id: order.increment_id.clone(),
        amount: order.grand_total,
        currency: order.currency.clone(),
        transaction_id: Some(success.transaction_id.clone()),
        is_paid: true,
    };

    if let Err(error) = notifier.send_invoice_paid(&invoice, order).await {
        logger::error!(?error, "invoice notification could not be sent");
    }

    let (_, updated) = store
        .save_invoice_with_order(invoice, order.clone())
        .await
        .change_context(ReconcileError::InvoiceCaptureFailed)?;
    *order = updated;

    order.status_history.push(storage::StatusHistoryEntry {
        comment: format!(
            "Captured amount of {} {} by provider. Transaction ID: \"{}\"",
            utils::format_minor_units(order.grand_total),
            order.currency,
            success.transaction_id
        ),
        is_customer_notified: true,
    });

    Ok(())
}
