use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::ports::Notifier;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes each notice as a plain-text `.eml` message into a directory.
///
/// Stands in for a mail transport: the directory plays the role of the
/// outgoing mail queue. The directory is created on first use.
#[derive(Debug, Clone)]
pub struct FileNotifier {
    dir: PathBuf,
    sender: String,
}

impl FileNotifier {
    /// # Arguments
    ///
    /// * `dir` - Directory the messages are written to.
    /// * `sender` - Value of the `From` header.
    pub fn new<P: AsRef<Path>>(dir: P, sender: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            sender: sender.into(),
        }
    }

    /// `order-0001-confirmation.eml`, `order-0001-payment.eml`, ...
    pub fn file_name(notification: &Notification) -> String {
        let suffix = match notification.kind {
            NotificationKind::OrderConfirmation => "confirmation",
            NotificationKind::PaymentCompletion => "payment",
        };
        format!("order-{:04}-{suffix}.eml", notification.reference.0)
    }

    fn message(&self, notification: &Notification) -> String {
        format!(
            "From: {}\nTo: {}\nSubject: {}\n\n{}\n",
            self.sender,
            notification.recipient.email,
            notification.subject(),
            notification.render()
        )
    }
}

#[async_trait]
impl Notifier for FileNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(Self::file_name(notification));
        tokio::fs::write(&path, self.message(notification)).await?;
        tracing::debug!(path = %path.display(), "Notification written");
        Ok(())
    }
}
