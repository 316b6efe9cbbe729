//! Payment lifecycle management.
//!
//! `PaymentService` owns the pending -> paid lifecycle: it creates
//! invoices through the processor, persists them, and advances their
//! status when a settlement webhook is confirmed. Webhooks may arrive
//! zero, one, or many times; the transition is applied at most once and
//! duplicate deliveries are acknowledged without clobbering `settled_at`.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::payment::{Payment, PaymentError, PaymentStatus};
use crate::ports::{InvoiceIssuer, InvoiceRequest, PaymentStore};

/// Page size used by the payment history endpoint.
pub const HISTORY_PAGE_SIZE: u32 = 50;

/// Input for invoice creation.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    pub receiver_pubkey: String,
    pub sender_pubkey: Option<String>,
    pub amount: i64,
    pub memo: String,
}

/// Result of invoice creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoiceResult {
    pub payment_id: String,
    pub invoice: String,
    pub payment_hash: String,
}

/// What a webhook delivery amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The processor still reports the invoice unpaid; nothing changed.
    Unsettled,
    /// The payment transitioned pending -> paid on this delivery.
    Settled,
    /// The payment was already paid; duplicate delivery acknowledged.
    AlreadySettled,
}

impl WebhookOutcome {
    /// Whether the processor confirmed settlement on this delivery.
    pub fn is_settled(&self) -> bool {
        matches!(self, WebhookOutcome::Settled | WebhookOutcome::AlreadySettled)
    }
}

/// Orchestrates the payment lifecycle over the store and issuer ports.
pub struct PaymentService {
    store: Arc<dyn PaymentStore>,
    issuer: Arc<dyn InvoiceIssuer>,
    webhook_url: String,
}

impl PaymentService {
    /// Create a service whose invoices call back to
    /// `{public_base_url}/api/payments/webhook`.
    pub fn new(
        store: Arc<dyn PaymentStore>,
        issuer: Arc<dyn InvoiceIssuer>,
        public_base_url: &str,
    ) -> Self {
        Self {
            store,
            issuer,
            webhook_url: format!("{}/api/payments/webhook", public_base_url.trim_end_matches('/')),
        }
    }

    /// Create an invoice with the processor and persist it as pending.
    ///
    /// A non-positive amount is rejected before the processor is called.
    /// If persistence fails after the processor already issued the
    /// invoice, the caller sees the storage error and the processor-side
    /// invoice is orphaned; that is logged, not hidden.
    pub async fn create_invoice(
        &self,
        input: CreateInvoiceInput,
    ) -> Result<CreateInvoiceResult, PaymentError> {
        if input.amount <= 0 {
            return Err(PaymentError::validation("amount must be positive"));
        }

        let issued = self
            .issuer
            .create_invoice(&InvoiceRequest {
                amount: input.amount,
                memo: input.memo.clone(),
                webhook_url: Some(self.webhook_url.clone()),
            })
            .await?;

        let payment = Payment {
            id: format!("pay_{}", Uuid::new_v4().simple()),
            invoice: issued.payment_request.clone(),
            amount: input.amount,
            memo: input.memo,
            sender_pubkey: input.sender_pubkey,
            receiver_pubkey: input.receiver_pubkey,
            payment_hash: issued.payment_hash.clone(),
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            settled_at: None,
        };

        if let Err(e) = self.store.create_payment(&payment).await {
            tracing::error!(
                payment_hash = %payment.payment_hash,
                error = %e,
                "invoice issued but persistence failed; processor-side invoice is orphaned"
            );
            return Err(e);
        }

        tracing::debug!(payment_id = %payment.id, amount = payment.amount, "invoice created");

        Ok(CreateInvoiceResult {
            payment_id: payment.id,
            invoice: issued.payment_request,
            payment_hash: issued.payment_hash,
        })
    }

    /// Process a settlement webhook for a payment hash.
    ///
    /// The webhook itself is unauthenticated, so the hash is re-checked
    /// against the processor. An unpaid report is a silent no-op: early
    /// and duplicate deliveries are expected, not errors.
    pub async fn handle_webhook(&self, payment_hash: &str) -> Result<WebhookOutcome, PaymentError> {
        let status = self.issuer.check_payment(payment_hash).await?;
        if !status.paid {
            tracing::debug!(%payment_hash, "webhook for unpaid invoice ignored");
            return Ok(WebhookOutcome::Unsettled);
        }

        let payment = self
            .store
            .get_payment_by_hash(payment_hash)
            .await?
            .ok_or_else(|| {
                PaymentError::not_found(format!("unknown payment hash {payment_hash}"))
            })?;

        let transitioned = self.store.mark_paid(&payment.id, Utc::now()).await?;
        if transitioned {
            tracing::info!(payment_id = %payment.id, %payment_hash, "payment settled");
            Ok(WebhookOutcome::Settled)
        } else {
            tracing::debug!(payment_id = %payment.id, %payment_hash, "duplicate settlement webhook");
            Ok(WebhookOutcome::AlreadySettled)
        }
    }

    /// Fetch a payment by local id.
    pub async fn get_payment(&self, id: &str) -> Result<Payment, PaymentError> {
        self.store
            .get_payment(id)
            .await?
            .ok_or_else(|| PaymentError::not_found(format!("payment {id}")))
    }

    /// Fetch a payment by processor hash.
    pub async fn get_payment_by_hash(&self, payment_hash: &str) -> Result<Payment, PaymentError> {
        self.store
            .get_payment_by_hash(payment_hash)
            .await?
            .ok_or_else(|| PaymentError::not_found(format!("payment hash {payment_hash}")))
    }

    /// Payments where the identity is sender or receiver, newest first.
    pub async fn list_payments(
        &self,
        pubkey: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Payment>, PaymentError> {
        self.store.list_payments_for(pubkey, limit, offset).await
    }
}
