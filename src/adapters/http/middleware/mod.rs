//! HTTP middleware.

mod auth;

pub use auth::{require_nostr_auth, VerifiedPubkey};
