//! Request authentication with signed Nostr events (NIP-98).
//!
//! A caller proves control of a keypair by attaching a short-lived,
//! self-signed kind-27235 event to each request instead of holding a
//! session. Verification is a pure function of the header value, the
//! request method and the wall clock; no state survives between calls.

mod event;
mod verifier;

pub use event::{Event, Tag};
pub use verifier::{
    verify_credential, verify_credential_at, AuthError, HTTP_AUTH_KIND, MAX_CLOCK_SKEW_SECS,
};
