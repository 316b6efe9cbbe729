//! LNbits payment processor adapter.

mod client;

pub use client::LnbitsClient;
