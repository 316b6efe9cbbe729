//! Authorization credential verification policy.
//!
//! Checks run in a fixed order and the first failure wins. The HTTP layer
//! collapses every [`AuthError`] into a uniform 401 so callers cannot
//! probe which check rejected them; the precise reason is only logged.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use thiserror::Error;

use super::event::Event;

/// Event kind reserved for HTTP request authorization (NIP-98).
pub const HTTP_AUTH_KIND: u32 = 27235;

/// Accepted distance between the event timestamp and the wall clock,
/// in seconds, boundary inclusive. This window is the only replay
/// protection; no nonce ledger is kept.
pub const MAX_CLOCK_SKEW_SECS: i64 = 60;

const SCHEME_PREFIX: &str = "Nostr ";

/// Reasons a credential is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing or malformed authorization header")]
    MalformedHeader,

    #[error("authorization token is not valid base64")]
    BadEncoding,

    #[error("authorization token is not a valid event")]
    BadFormat,

    #[error("unexpected event kind")]
    WrongKind,

    #[error("signature verification failed")]
    BadSignature,

    #[error("event timestamp outside the accepted window")]
    StaleOrFuture,

    #[error("missing url tag")]
    MissingUrlTag,

    #[error("method tag missing or mismatched")]
    MethodMismatch,
}

/// Verify an `Authorization` header value against the inbound method.
///
/// On success returns the signer's public key, to be threaded through the
/// rest of the request as the caller's verified identity.
pub fn verify_credential(header: &str, method: &str) -> Result<String, AuthError> {
    verify_credential_at(header, method, Utc::now().timestamp())
}

/// [`verify_credential`] with an explicit wall-clock value.
pub fn verify_credential_at(header: &str, method: &str, now: i64) -> Result<String, AuthError> {
    let token = header
        .strip_prefix(SCHEME_PREFIX)
        .ok_or(AuthError::MalformedHeader)?;

    let raw = BASE64.decode(token).map_err(|_| AuthError::BadEncoding)?;

    let event: Event = serde_json::from_slice(&raw).map_err(|_| AuthError::BadFormat)?;

    if event.kind != HTTP_AUTH_KIND {
        return Err(AuthError::WrongKind);
    }

    if !event.verify_signature() {
        return Err(AuthError::BadSignature);
    }

    if (now - event.created_at).abs() > MAX_CLOCK_SKEW_SECS {
        return Err(AuthError::StaleOrFuture);
    }

    // Only the presence of a url tag is required; its value is not
    // compared against the request target.
    let url_tag = event.tag("u").ok_or(AuthError::MissingUrlTag)?;
    if url_tag.values().is_empty() {
        return Err(AuthError::MissingUrlTag);
    }

    let declared_method = event
        .tag("method")
        .and_then(|t| t.values().first())
        .ok_or(AuthError::MethodMismatch)?;
    if !declared_method.eq_ignore_ascii_case(method) {
        return Err(AuthError::MethodMismatch);
    }

    Ok(event.pubkey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::Tag;
    use base64::Engine as _;
    use k256::schnorr::SigningKey;
    use proptest::prelude::*;
    use rand::rngs::OsRng;

    const NOW: i64 = 1_700_000_000;
    const URL: &str = "https://pay.example.com/api/payments/invoice";

    /// Build and sign a credential, returning the event and its pubkey.
    fn signed_event(tags: Vec<Tag>, created_at: i64) -> (Event, String) {
        let signing_key = SigningKey::random(&mut OsRng);
        let pubkey = hex::encode(signing_key.verifying_key().to_bytes());
        let mut event = Event {
            id: String::new(),
            pubkey: pubkey.clone(),
            created_at,
            kind: HTTP_AUTH_KIND,
            tags,
            content: String::new(),
            sig: String::new(),
        };
        let digest = event.canonical_digest();
        let signature = signing_key.sign_raw(&digest, &[0u8; 32]).expect("sign");
        event.id = hex::encode(digest);
        event.sig = hex::encode(signature.to_bytes());
        (event, pubkey)
    }

    fn default_tags(method: &str) -> Vec<Tag> {
        vec![Tag::new(["u", URL]), Tag::new(["method", method])]
    }

    fn header_for(event: &Event) -> String {
        let json = serde_json::to_vec(event).unwrap();
        format!("Nostr {}", BASE64.encode(json))
    }

    #[test]
    fn valid_credential_yields_signer_pubkey() {
        let (event, pubkey) = signed_event(default_tags("POST"), NOW);
        let result = verify_credential_at(&header_for(&event), "POST", NOW);
        assert_eq!(result, Ok(pubkey));
    }

    #[test]
    fn wrong_scheme_is_rejected() {
        let (event, _) = signed_event(default_tags("GET"), NOW);
        let token = header_for(&event).replace("Nostr ", "Bearer ");
        assert_eq!(
            verify_credential_at(&token, "GET", NOW),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn invalid_base64_is_rejected() {
        assert_eq!(
            verify_credential_at("Nostr not+base64!!!", "GET", NOW),
            Err(AuthError::BadEncoding)
        );
    }

    #[test]
    fn undecodable_event_is_rejected() {
        let header = format!("Nostr {}", BASE64.encode(b"{\"kind\": \"oops\""));
        assert_eq!(
            verify_credential_at(&header, "GET", NOW),
            Err(AuthError::BadFormat)
        );
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let signing_key = SigningKey::random(&mut OsRng);
        let mut event = Event {
            id: String::new(),
            pubkey: hex::encode(signing_key.verifying_key().to_bytes()),
            created_at: NOW,
            kind: 1,
            tags: default_tags("GET"),
            content: String::new(),
            sig: String::new(),
        };
        let digest = event.canonical_digest();
        event.sig = hex::encode(signing_key.sign_raw(&digest, &[0u8; 32]).unwrap().to_bytes());

        assert_eq!(
            verify_credential_at(&header_for(&event), "GET", NOW),
            Err(AuthError::WrongKind)
        );
    }

    #[test]
    fn corrupted_signature_is_rejected() {
        let (mut event, _) = signed_event(default_tags("GET"), NOW);
        let mut sig = hex::decode(&event.sig).unwrap();
        sig[0] ^= 0xff;
        event.sig = hex::encode(sig);

        assert_eq!(
            verify_credential_at(&header_for(&event), "GET", NOW),
            Err(AuthError::BadSignature)
        );
    }

    #[test]
    fn tampered_timestamp_fails_signature_check() {
        let (mut event, _) = signed_event(default_tags("GET"), NOW);
        event.created_at += 1;

        // The mutation is detected by the signature, not the clock window.
        assert_eq!(
            verify_credential_at(&header_for(&event), "GET", NOW),
            Err(AuthError::BadSignature)
        );
    }

    #[test]
    fn sixty_seconds_old_is_still_accepted() {
        let (event, _) = signed_event(default_tags("GET"), NOW - MAX_CLOCK_SKEW_SECS);
        assert!(verify_credential_at(&header_for(&event), "GET", NOW).is_ok());
    }

    #[test]
    fn sixty_seconds_ahead_is_still_accepted() {
        let (event, _) = signed_event(default_tags("GET"), NOW + MAX_CLOCK_SKEW_SECS);
        assert!(verify_credential_at(&header_for(&event), "GET", NOW).is_ok());
    }

    #[test]
    fn sixty_one_seconds_old_is_rejected() {
        let (event, _) = signed_event(default_tags("GET"), NOW - 61);
        assert_eq!(
            verify_credential_at(&header_for(&event), "GET", NOW),
            Err(AuthError::StaleOrFuture)
        );
    }

    #[test]
    fn sixty_one_seconds_ahead_is_rejected() {
        let (event, _) = signed_event(default_tags("GET"), NOW + 61);
        assert_eq!(
            verify_credential_at(&header_for(&event), "GET", NOW),
            Err(AuthError::StaleOrFuture)
        );
    }

    #[test]
    fn missing_url_tag_is_rejected() {
        let (event, _) = signed_event(vec![Tag::new(["method", "GET"])], NOW);
        assert_eq!(
            verify_credential_at(&header_for(&event), "GET", NOW),
            Err(AuthError::MissingUrlTag)
        );
    }

    #[test]
    fn url_tag_without_value_is_rejected() {
        let (event, _) = signed_event(vec![Tag::new(["u"]), Tag::new(["method", "GET"])], NOW);
        assert_eq!(
            verify_credential_at(&header_for(&event), "GET", NOW),
            Err(AuthError::MissingUrlTag)
        );
    }

    #[test]
    fn url_tag_value_is_not_compared_to_request_url() {
        // Deliberately lenient: any non-empty url value authorizes any
        // request target, as long as the method matches.
        let tags = vec![
            Tag::new(["u", "https://somewhere-else.example/other"]),
            Tag::new(["method", "GET"]),
        ];
        let (event, _) = signed_event(tags, NOW);
        assert!(verify_credential_at(&header_for(&event), "GET", NOW).is_ok());
    }

    #[test]
    fn missing_method_tag_is_rejected() {
        let (event, _) = signed_event(vec![Tag::new(["u", URL])], NOW);
        assert_eq!(
            verify_credential_at(&header_for(&event), "GET", NOW),
            Err(AuthError::MethodMismatch)
        );
    }

    #[test]
    fn method_comparison_is_case_insensitive() {
        let tags = vec![Tag::new(["u", URL]), Tag::new(["method", "post"])];
        let (event, _) = signed_event(tags, NOW);
        assert!(verify_credential_at(&header_for(&event), "POST", NOW).is_ok());
    }

    #[test]
    fn mismatched_method_is_rejected_regardless_of_case() {
        let (event, _) = signed_event(default_tags("POST"), NOW);
        assert_eq!(
            verify_credential_at(&header_for(&event), "GET", NOW),
            Err(AuthError::MethodMismatch)
        );

        let tags = vec![Tag::new(["u", URL]), Tag::new(["method", "post"])];
        let (event, _) = signed_event(tags, NOW);
        assert_eq!(
            verify_credential_at(&header_for(&event), "get", NOW),
            Err(AuthError::MethodMismatch)
        );
    }

    proptest! {
        /// Flipping any single bit of the signature must reject the event.
        #[test]
        fn any_single_bit_flip_in_signature_rejects(bit in 0usize..512) {
            let (mut event, _) = signed_event(default_tags("GET"), NOW);
            let mut sig = hex::decode(&event.sig).unwrap();
            sig[bit / 8] ^= 1 << (bit % 8);
            event.sig = hex::encode(sig);

            prop_assert_eq!(
                verify_credential_at(&header_for(&event), "GET", NOW),
                Err(AuthError::BadSignature)
            );
        }
    }
}
