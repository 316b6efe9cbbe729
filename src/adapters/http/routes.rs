//! Axum router wiring the HTTP surface together.
//!
//! # Routes
//!
//! ## Public
//! - `GET /api/health`
//! - `POST /api/payments/webhook` (verified against the processor, not
//!   against the sender)
//! - `GET /ws?payment_hash=...` (websocket upgrade)
//!
//! ## Authenticated (NIP-98)
//! - `POST /api/payments/invoice`
//! - `GET /api/payments/history`
//! - `GET /api/payments/:id`

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::ws_handler;

use super::handlers::{
    create_invoice, get_payment, health, payment_history, payment_webhook, AppState,
};
use super::middleware::require_nostr_auth;

/// Build the complete application router.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let authenticated = Router::new()
        .route("/payments/invoice", post(create_invoice))
        .route("/payments/history", get(payment_history))
        .route("/payments/:id", get(get_payment))
        .route_layer(middleware::from_fn(require_nostr_auth));

    let public = Router::new()
        .route("/health", get(health))
        .route("/payments/webhook", post(payment_webhook));

    Router::new()
        .nest("/api", public.merge(authenticated))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer from the configured origin list; an empty list allows any
/// origin, matching a development deployment behind no proxy.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::PaymentHub;
    use crate::application::PaymentService;
    use crate::domain::payment::{Payment, PaymentError};
    use crate::ports::{
        InvoiceIssuer, InvoiceRequest, IssuedInvoice, PaymentStore, SettlementStatus,
    };
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::Arc;

    struct NullStore;

    #[async_trait]
    impl PaymentStore for NullStore {
        async fn create_payment(&self, _payment: &Payment) -> Result<(), PaymentError> {
            Ok(())
        }

        async fn get_payment(&self, _id: &str) -> Result<Option<Payment>, PaymentError> {
            Ok(None)
        }

        async fn get_payment_by_hash(
            &self,
            _payment_hash: &str,
        ) -> Result<Option<Payment>, PaymentError> {
            Ok(None)
        }

        async fn mark_paid(
            &self,
            _id: &str,
            _settled_at: DateTime<Utc>,
        ) -> Result<bool, PaymentError> {
            Ok(false)
        }

        async fn list_payments_for(
            &self,
            _pubkey: &str,
            _limit: u32,
            _offset: u32,
        ) -> Result<Vec<Payment>, PaymentError> {
            Ok(vec![])
        }
    }

    struct NullIssuer;

    #[async_trait]
    impl InvoiceIssuer for NullIssuer {
        async fn create_invoice(
            &self,
            _request: &InvoiceRequest,
        ) -> Result<IssuedInvoice, PaymentError> {
            Err(PaymentError::upstream("unavailable"))
        }

        async fn check_payment(
            &self,
            _payment_hash: &str,
        ) -> Result<SettlementStatus, PaymentError> {
            Err(PaymentError::upstream("unavailable"))
        }
    }

    fn test_state() -> AppState {
        AppState {
            payments: Arc::new(PaymentService::new(
                Arc::new(NullStore),
                Arc::new(NullIssuer),
                "http://localhost:8080",
            )),
            hub: Arc::new(PaymentHub::default()),
        }
    }

    #[test]
    fn router_builds_with_empty_cors() {
        let _router = router(test_state(), cors_layer(&[]));
    }

    #[test]
    fn router_builds_with_origin_list() {
        let origins = vec!["https://pay.example.com".to_string()];
        let _router = router(test_state(), cors_layer(&origins));
    }
}
