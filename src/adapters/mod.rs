//! Adapters: implementations of the ports plus the HTTP/websocket surface.

pub mod http;
pub mod lnbits;
pub mod sqlite;
pub mod websocket;
