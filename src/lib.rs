//! nostr-pay - Lightning payments with Nostr request authentication
//!
//! Payers authenticate each request with a signed NIP-98 event instead of a
//! session, obtain a Lightning invoice from an LNbits backend, and watch the
//! payment settle in real time over a websocket.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
