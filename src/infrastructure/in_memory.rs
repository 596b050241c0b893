use crate::domain::notification::Notification;
use crate::domain::ports::Notifier;
use crate::domain::storefront::Storefront;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// A shopper's storefront shared between concurrent callers.
///
/// Uses `Arc<Mutex<Storefront>>`: a payment holds the lock from its first
/// check to its last mutation, so two payments against the same balance are
/// serialized rather than both passing the funds check.
#[derive(Debug, Default, Clone)]
pub struct SharedStorefront {
    inner: Arc<Mutex<Storefront>>,
}

impl SharedStorefront {
    pub fn new(store: Storefront) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the storefront for a read-modify-write sequence.
    pub async fn lock(&self) -> MutexGuard<'_, Storefront> {
        self.inner.lock().await
    }

    /// A point-in-time copy, for display.
    pub async fn snapshot(&self) -> Storefront {
        self.inner.lock().await.clone()
    }
}

/// A notifier that keeps every notice in memory instead of delivering it.
///
/// Cloning shares the same outbox, so a test can hand one clone to the
/// orchestrator and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct OutboxNotifier {
    sent: Arc<RwLock<Vec<Notification>>>,
}

impl OutboxNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.sent.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sent.read().await.is_empty()
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        self.sent.write().await.push(notification.clone());
        Ok(())
    }
}
