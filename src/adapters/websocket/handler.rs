//! WebSocket upgrade handler for payment watchers.
//!
//! A client connects to `GET /ws?payment_hash=...`, is subscribed to that
//! hash, and receives a JSON frame for every status event until either
//! side closes. The subscription is removed unconditionally when the
//! connection loop exits, whichever way it exits.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::adapters::http::AppState;

use super::hub::{PaymentHub, WatcherId};

/// Query parameters of the watch endpoint. A missing `payment_hash`
/// rejects the request with 400 before any upgrade happens.
#[derive(Debug, Deserialize)]
pub struct WatchParams {
    payment_hash: String,
}

/// Handle `GET /ws` upgrade requests.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WatchParams>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| watch_payment(socket, params.payment_hash, state.hub))
}

/// Run an established watcher connection until it disconnects.
async fn watch_payment(socket: WebSocket, payment_hash: String, hub: Arc<PaymentHub>) {
    let (mut sender, mut receiver) = socket.split();

    let watcher = WatcherId::new();
    let mut updates = hub.subscribe(&payment_hash, watcher.clone()).await;
    tracing::debug!(%watcher, %payment_hash, "watcher connected");

    // Forward hub events to the peer until it goes away.
    let mut send_task = tokio::spawn(async move {
        while let Ok(update) = updates.recv().await {
            let frame =
                serde_json::to_string(&update).expect("PaymentUpdate serialization cannot fail");
            if let Err(e) = sender.send(Message::Text(frame)).await {
                tracing::debug!("watcher write failed, closing: {e}");
                break;
            }
        }
    });

    // Drain the peer; its frames carry no meaning, but a close or a read
    // error ends the connection.
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("watcher read error: {e}");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => {
            send_task.abort();
            // Wait for the forwarder to drop its receiver so the hub sees
            // an accurate count when pruning.
            let _ = (&mut send_task).await;
        }
    }

    // Cleanup runs on every exit path: close, read error, or write error.
    hub.unsubscribe(&watcher).await;
    tracing::debug!(%watcher, %payment_hash, "watcher disconnected");
}
