use super::notification::Notification;
use crate::error::Result;
use async_trait::async_trait;

/// Best-effort delivery of order notices.
///
/// A failed delivery never undoes the payment it reports on; the orchestrator
/// turns it into a warning on the outcome.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

pub type NotifierBox = Box<dyn Notifier>;
