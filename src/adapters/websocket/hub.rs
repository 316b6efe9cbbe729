//! Subscription registry mapping payment hashes to live watchers.
//!
//! One broadcast channel per watched payment hash. Fan-out takes the read
//! lock only, so notifications for different hashes proceed concurrently;
//! subscribe/unsubscribe take the write lock and exclude in-flight reads
//! from seeing a half-updated registry.
//!
//! The hub is an ordinary value constructed at startup and shared via
//! `Arc`, never a global.

use std::collections::HashMap;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::payment::PaymentStatus;

use super::messages::PaymentUpdate;

/// Unique identifier for a watcher connection, generated server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatcherId(Uuid);

impl WatcherId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WatcherId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WatcherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry of live payment watchers.
pub struct PaymentHub {
    /// payment_hash -> broadcast sender for its watchers.
    subscriptions: RwLock<HashMap<String, broadcast::Sender<PaymentUpdate>>>,

    /// watcher -> payment_hash for O(1) cleanup on disconnect.
    watchers: RwLock<HashMap<WatcherId, String>>,

    /// Buffer size of each hash's broadcast channel.
    channel_capacity: usize,
}

impl PaymentHub {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            watchers: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Create with default capacity (32 events per hash).
    ///
    /// A payment sees at most a handful of status events over its life,
    /// so the buffer only needs to absorb short reader stalls.
    pub fn with_default_capacity() -> Self {
        Self::new(32)
    }

    /// Register a watcher for a payment hash, creating the hash's entry
    /// if absent. Returns the receiver carrying that hash's updates.
    pub async fn subscribe(
        &self,
        payment_hash: &str,
        watcher: WatcherId,
    ) -> broadcast::Receiver<PaymentUpdate> {
        let mut subscriptions = self.subscriptions.write().await;

        let sender = subscriptions
            .entry(payment_hash.to_string())
            .or_insert_with(|| {
                let (tx, _) = broadcast::channel(self.channel_capacity);
                tx
            });

        self.watchers
            .write()
            .await
            .insert(watcher, payment_hash.to_string());

        sender.subscribe()
    }

    /// Remove a watcher. When the last watcher of a hash departs, the
    /// hash's entry itself is removed so the registry never accumulates
    /// empty sets.
    ///
    /// The caller must have dropped (or be about to drop) its receiver;
    /// pruning keys off the live receiver count.
    pub async fn unsubscribe(&self, watcher: &WatcherId) {
        let mut watchers = self.watchers.write().await;

        if let Some(payment_hash) = watchers.remove(watcher) {
            let mut subscriptions = self.subscriptions.write().await;
            if let Some(sender) = subscriptions.get(&payment_hash) {
                if sender.receiver_count() == 0 {
                    subscriptions.remove(&payment_hash);
                }
            }
        }
    }

    /// Push a status event to every watcher of a payment hash.
    ///
    /// A hash nobody watches is a no-op. Send errors mean all receivers
    /// vanished between the lookup and the send; they are ignored, and a
    /// slow or dead connection can never fail the caller.
    pub async fn notify(&self, payment_hash: &str, status: PaymentStatus) {
        let subscriptions = self.subscriptions.read().await;

        if let Some(sender) = subscriptions.get(payment_hash) {
            let delivered = sender.send(PaymentUpdate {
                payment_hash: payment_hash.to_string(),
                status,
            });
            if let Ok(count) = delivered {
                tracing::debug!(%payment_hash, watchers = count, "payment update fanned out");
            }
        }
    }

    /// Number of live watchers for a hash (0 if nobody watches it).
    pub async fn watcher_count(&self, payment_hash: &str) -> usize {
        self.subscriptions
            .read()
            .await
            .get(payment_hash)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Payment hashes currently being watched.
    pub async fn watched_hashes(&self) -> Vec<String> {
        self.subscriptions.read().await.keys().cloned().collect()
    }
}

impl Default for PaymentHub {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
