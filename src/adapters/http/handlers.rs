//! HTTP handlers for the payment endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::websocket::PaymentHub;
use crate::application::{CreateInvoiceInput, PaymentService, HISTORY_PAGE_SIZE};
use crate::domain::payment::PaymentStatus;

use super::dto::{CreateInvoiceRequest, CreateInvoiceResponse, WebhookPayload};
use super::error::ApiError;
use super::middleware::VerifiedPubkey;

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<PaymentService>,
    pub hub: Arc<PaymentHub>,
}

/// GET /api/health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// POST /api/payments/invoice - create an invoice payable to the caller.
pub async fn create_invoice(
    State(state): State<AppState>,
    VerifiedPubkey(pubkey): VerifiedPubkey,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .payments
        .create_invoice(CreateInvoiceInput {
            receiver_pubkey: pubkey,
            sender_pubkey: None,
            amount: request.amount,
            memo: request.memo,
        })
        .await?;

    let response = CreateInvoiceResponse {
        payment_id: result.payment_id,
        invoice: result.invoice,
        payment_hash: result.payment_hash,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/payments/{id}
pub async fn get_payment(
    State(state): State<AppState>,
    VerifiedPubkey(_pubkey): VerifiedPubkey,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.payments.get_payment(&id).await?;
    Ok(Json(payment))
}

/// GET /api/payments/history - the caller's payments, newest first.
pub async fn payment_history(
    State(state): State<AppState>,
    VerifiedPubkey(pubkey): VerifiedPubkey,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state
        .payments
        .list_payments(&pubkey, HISTORY_PAGE_SIZE, 0)
        .await?;
    Ok(Json(payments))
}

/// POST /api/payments/webhook - settlement callback from the processor.
///
/// Unauthenticated by design: the hash is re-verified against the
/// processor before anything is trusted. Watchers are only notified once
/// the processor confirms settlement and the status write has committed;
/// an early delivery notifies nobody.
pub async fn payment_webhook(
    State(state): State<AppState>,
    Json(payload): Json<WebhookPayload>,
) -> Result<StatusCode, ApiError> {
    let outcome = state
        .payments
        .handle_webhook(&payload.payment_hash)
        .await
        .map_err(ApiError::webhook)?;

    if outcome.is_settled() {
        state
            .hub
            .notify(&payload.payment_hash, PaymentStatus::Paid)
            .await;
    }

    Ok(StatusCode::OK)
}
