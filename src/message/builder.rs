//! Fluent builder for [`Message`]

use std::fmt::Display;
use std::path::PathBuf;

use super::{Attachment, Message, Subject};
use crate::error::Result;
use crate::traits::mailer::Mailer;

/// Builder for an outgoing [`Message`]
///
/// `set_*` methods replace their field, `add_*` methods append. Every method
/// returns `&mut Self` so calls can be chained on one instance. Nothing is
/// sent until [`send`](Self::send) consumes the builder.
///
/// # Example
///
/// ```rust,ignore
/// use tideway_mail::{MemoryMailer, MessageBuilder};
///
/// let mailer = MemoryMailer::new();
///
/// let mut builder = MessageBuilder::new();
/// builder
///     .set_subject("Hello {}", &[&"World"])
///     .set_recipient(["user@example.com"])
///     .set_bcc(["audit@example.com"]);
///
/// builder.send(&mailer).await?;
/// ```
#[derive(Debug, Clone, Default)]
#[must_use = "builder does nothing until you call build() or send()"]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subject template and the arguments substituted into it
    ///
    /// The template is not checked here; a mismatch between placeholders and
    /// arguments is reported when the message is sent.
    pub fn set_subject(&mut self, subject: impl Into<String>, args: &[&dyn Display]) -> &mut Self {
        self.message.subject = Some(Subject::new(subject, args));
        self
    }

    /// Replace the CC recipients. An empty iterator clears them.
    pub fn set_cc<I, S>(&mut self, recipients: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message.cc = recipients.into_iter().collect();
        self
    }

    /// Replace the BCC recipients. An empty iterator clears them.
    pub fn set_bcc<I, S>(&mut self, recipients: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message.bcc = recipients.into_iter().collect();
        self
    }

    /// Replace the primary ("To") recipients. An empty iterator clears them.
    pub fn set_recipient<I, S>(&mut self, recipients: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message.to = recipients.into_iter().collect();
        self
    }

    /// Append an attachment
    ///
    /// Fails with [`MailError::InvalidAttachment`](crate::MailError::InvalidAttachment)
    /// if `path` is missing, is not a regular file, or cannot be opened. The
    /// builder is left untouched on failure.
    pub fn add_attachment(&mut self, path: impl Into<PathBuf>, name: Option<&str>) -> Result<&mut Self> {
        let attachment = Attachment::open(path, name.map(str::to_string))?;
        self.message.attachments.push(attachment);
        Ok(self)
    }

    pub fn set_from(&mut self, address: impl Into<String>) -> &mut Self {
        self.message.from = Some(address.into());
        self
    }

    pub fn set_reply_to(&mut self, address: impl Into<String>) -> &mut Self {
        self.message.reply_to = Some(address.into());
        self
    }

    /// Set the charset used for text bodies
    pub fn set_charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.message.charset = Some(charset.into());
        self
    }

    /// Append a custom header
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.message.headers.push((name.into(), value.into()));
        self
    }

    /// Set the plain text body
    pub fn set_text(&mut self, body: impl Into<String>) -> &mut Self {
        self.message.text = Some(body.into());
        self
    }

    /// Set the HTML body
    pub fn set_html(&mut self, body: impl Into<String>) -> &mut Self {
        self.message.html = Some(body.into());
        self
    }

    /// The message assembled so far
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn build(self) -> Message {
        self.message
    }

    /// Hand the assembled message to `mailer`
    pub async fn send<M>(self, mailer: &M) -> Result<()>
    where
        M: Mailer + ?Sized,
    {
        let message = self.build();
        tracing::debug!(
            recipients = message.recipient_count(),
            attachments = message.attachments.len(),
            "Sending message"
        );

        let result = mailer.send(&message).await;
        if let Err(ref e) = result {
            if e.is_caller_error() {
                tracing::debug!(error = %e, "Message rejected");
            } else {
                tracing::warn!(error = %e, "Mail backend failed to send message");
            }
        }
        result
    }
}
