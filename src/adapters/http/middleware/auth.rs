//! NIP-98 authentication middleware and extractor for axum.
//!
//! The middleware validates the `Authorization: Nostr <token>` header with
//! [`verify_credential`] and injects the signer's pubkey into the request
//! extensions; handlers read it back through the [`VerifiedPubkey`]
//! extractor. Every rejection is the same 401 body so callers cannot
//! probe which check failed; the concrete reason only reaches the logs.
//!
//! ```text
//! Request -> require_nostr_auth -> injects VerifiedPubkey into extensions
//!                                           |
//!                                  Handler -> VerifiedPubkey extractor
//! ```

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::auth::{verify_credential, AuthError};

use super::super::dto::ErrorResponse;

/// The authenticated caller's public key, as proven by their signed event.
#[derive(Debug, Clone)]
pub struct VerifiedPubkey(pub String);

/// Middleware gating a route behind NIP-98 authentication.
pub async fn require_nostr_auth(mut request: Request, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let verified = match header {
        Some(value) => verify_credential(value, &method),
        None => Err(AuthError::MalformedHeader),
    };

    match verified {
        Ok(pubkey) => {
            request.extensions_mut().insert(VerifiedPubkey(pubkey));
            next.run(request).await
        }
        Err(reason) => {
            tracing::debug!(%reason, method, "request authentication rejected");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("UNAUTHORIZED", "unauthorized")),
    )
        .into_response()
}

/// Rejection when a handler requires authentication that never happened.
#[derive(Debug, Clone)]
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        unauthorized()
    }
}

impl<S> axum::extract::FromRequestParts<S> for VerifiedPubkey
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<VerifiedPubkey>()
                .cloned()
                .ok_or(AuthenticationRequired)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request as HttpRequest;

    #[tokio::test]
    async fn extractor_reads_pubkey_from_extensions() {
        let mut request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        request
            .extensions_mut()
            .insert(VerifiedPubkey("ab".repeat(32)));

        let (mut parts, _body) = request.into_parts();
        let result = VerifiedPubkey::from_request_parts(&mut parts, &()).await;

        assert_eq!(result.unwrap().0, "ab".repeat(32));
    }

    #[tokio::test]
    async fn extractor_rejects_when_auth_never_ran() {
        let request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = VerifiedPubkey::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }

    #[test]
    fn rejection_is_a_uniform_401() {
        let response = AuthenticationRequired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
