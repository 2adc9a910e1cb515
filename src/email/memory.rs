//! In-memory mailer for tests
//!
//! Records every accepted message instead of delivering it.

use crate::error::Result;
use crate::message::Message;
use crate::traits::mailer::Mailer;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A mailer that keeps sent messages in memory
///
/// Clones share the same log, so a test can hand one clone to the code under
/// test and inspect the other.
///
/// # Example
///
/// ```rust,ignore
/// use tideway_mail::{MemoryMailer, MessageBuilder};
///
/// let mailer = MemoryMailer::new();
/// let mut builder = MessageBuilder::new();
/// builder.set_recipient(["to@example.com"]);
/// builder.send(&mailer).await?;
///
/// assert_eq!(mailer.len().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<RwLock<Vec<Message>>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first
    pub async fn sent(&self) -> Vec<Message> {
        self.sent.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.sent.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sent.read().await.is_empty()
    }

    /// Forget all recorded messages
    pub async fn clear(&self) {
        self.sent.write().await.clear();
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: &Message) -> Result<()> {
        message.validate()?;
        self.sent.write().await.push(message.clone());
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageBuilder;

    fn message_to(address: &str) -> Message {
        let mut builder = MessageBuilder::new();
        builder.set_recipient([address]);
        builder.build()
    }

    #[tokio::test]
    async fn test_records_in_order() {
        let mailer = MemoryMailer::new();
        mailer.send(&message_to("a@test.com")).await.unwrap();
        mailer.send(&message_to("b@test.com")).await.unwrap();

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 2);
        assert!(sent[0].to.contains("a@test.com"));
        assert!(sent[1].to.contains("b@test.com"));
    }

    #[tokio::test]
    async fn test_rejected_message_is_not_recorded() {
        let mailer = MemoryMailer::new();
        assert!(mailer.send(&Message::default()).await.is_err());
        assert!(mailer.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_log() {
        let mailer = MemoryMailer::new();
        let handle = mailer.clone();
        handle.send(&message_to("a@test.com")).await.unwrap();

        assert_eq!(mailer.len().await, 1);
        mailer.clear().await;
        assert!(handle.is_empty().await);
    }
}
