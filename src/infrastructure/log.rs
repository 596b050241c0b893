use crate::domain::notification::Notification;
use crate::domain::ports::Notifier;
use crate::error::Result;
use async_trait::async_trait;

/// Emits each notice as a `tracing` event. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        tracing::info!(
            to = %notification.recipient.email,
            subject = %notification.subject(),
            "Notification sent"
        );
        tracing::debug!("{}", notification.render());
        Ok(())
    }
}
