//! HTTP client for the LNbits API, implementing the `InvoiceIssuer` port.
//!
//! Endpoints used:
//! - `POST /api/v1/payments` to create an invoice (expects 201)
//! - `GET /api/v1/payments/{hash}` to check settlement (expects 200)
//!
//! Authentication is the `X-Api-Key` header with the invoice key. The key
//! is held as a `SecretString` so it never shows up in debug output.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::config::LnbitsConfig;
use crate::domain::payment::PaymentError;
use crate::ports::{InvoiceIssuer, InvoiceRequest, IssuedInvoice, SettlementStatus};

/// LNbits API client.
pub struct LnbitsClient {
    base_url: String,
    invoice_key: SecretString,
    http_client: reqwest::Client,
}

impl LnbitsClient {
    /// Create a client from the LNbits configuration section.
    pub fn new(config: &LnbitsConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            invoice_key: SecretString::new(config.invoice_key.clone()),
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl InvoiceIssuer for LnbitsClient {
    async fn create_invoice(&self, request: &InvoiceRequest) -> Result<IssuedInvoice, PaymentError> {
        let mut body = json!({
            "out": false,
            "amount": request.amount,
            "memo": request.memo,
            "unit": "sat",
        });
        if let Some(webhook) = &request.webhook_url {
            body["webhook"] = json!(webhook);
        }

        let response = self
            .http_client
            .post(self.url("/api/v1/payments"))
            .header("X-Api-Key", self.invoice_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::upstream(format!("create invoice: {e}")))?;

        if response.status() != reqwest::StatusCode::CREATED {
            return Err(PaymentError::upstream(format!(
                "create invoice returned status {}",
                response.status().as_u16()
            )));
        }

        response
            .json::<IssuedInvoice>()
            .await
            .map_err(|e| PaymentError::upstream(format!("decode invoice response: {e}")))
    }

    async fn check_payment(&self, payment_hash: &str) -> Result<SettlementStatus, PaymentError> {
        let response = self
            .http_client
            .get(self.url(&format!("/api/v1/payments/{payment_hash}")))
            .header("X-Api-Key", self.invoice_key.expose_secret())
            .send()
            .await
            .map_err(|e| PaymentError::upstream(format!("check payment: {e}")))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(PaymentError::upstream(format!(
                "check payment returned status {}",
                response.status().as_u16()
            )));
        }

        response
            .json::<SettlementStatus>()
            .await
            .map_err(|e| PaymentError::upstream(format!("decode payment status: {e}")))
    }
}
