//! Mailer trait for sending messages
//!
//! This trait abstracts delivery backends, allowing users to swap between
//! SMTP, an in-memory recorder for tests, or console output for development.

use crate::error::Result;
use crate::message::Message;
use async_trait::async_trait;

/// Mailer trait for sending messages
///
/// Implement this trait to create custom delivery backends. Implementations
/// are expected to call [`Message::validate`] before doing any work.
///
/// # Example
///
/// ```rust,ignore
/// use tideway_mail::traits::mailer::Mailer;
/// use tideway_mail::{Message, Result};
/// use async_trait::async_trait;
///
/// struct MyMailer;
///
/// #[async_trait]
/// impl Mailer for MyMailer {
///     async fn send(&self, message: &Message) -> Result<()> {
///         message.validate()?;
///         // Deliver via your preferred service
///         Ok(())
///     }
///
///     fn is_healthy(&self) -> bool {
///         true
///     }
/// }
/// ```
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a message
    ///
    /// Returns `Ok(())` if the message was accepted for delivery.
    /// Returns an error if validation, rendering or delivery failed.
    async fn send(&self, message: &Message) -> Result<()>;

    /// Check if the mailer backend is healthy/connected
    fn is_healthy(&self) -> bool;
}
