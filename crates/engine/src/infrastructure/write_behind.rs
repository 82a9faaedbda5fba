//! Write-behind persistence queue.
//!
//! Every store mutation serializes a snapshot of its collection and enqueues
//! it here; a drainer task bound to the collection key awaits the saves
//! strictly in enqueue order (FIFO per key). Enqueueing never blocks and
//! never fails the mutation - in-memory state stays authoritative, and a
//! failed save only costs durability until the next snapshot lands.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::ports::CollectionStore;

/// Queue handle owned by one repository/store, bound to one collection key.
pub struct WriteBehind {
    key: &'static str,
    tx: Option<mpsc::UnboundedSender<String>>,
    drainer: Option<JoinHandle<()>>,
}

impl WriteBehind {
    /// Spawn the drainer task for `key`. Must be called on a Tokio runtime.
    pub fn spawn(key: &'static str, store: Arc<dyn CollectionStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let drainer = tokio::spawn(async move {
            while let Some(payload) = rx.recv().await {
                if let Err(e) = store.save(key, &payload).await {
                    tracing::error!(key, error = %e, "write-behind save failed");
                }
            }
            tracing::debug!(key, "write-behind drainer finished");
        });

        Self {
            key,
            tx: Some(tx),
            drainer: Some(drainer),
        }
    }

    /// Queue a serialized snapshot. Fire-and-forget.
    pub fn enqueue(&self, payload: String) {
        let Some(tx) = &self.tx else {
            tracing::error!(key = self.key, "write-behind queue already closed");
            return;
        };
        if tx.send(payload).is_err() {
            tracing::error!(key = self.key, "write-behind drainer gone, snapshot dropped");
        }
    }

    /// Drain pending snapshots and stop the drainer.
    ///
    /// Called at process teardown so the last mutations reach disk.
    pub async fn close(&mut self) {
        self.tx.take();
        if let Some(drainer) = self.drainer.take() {
            if let Err(e) = drainer.await {
                tracing::error!(key = self.key, error = %e, "write-behind drainer panicked");
            }
        }
    }
}
