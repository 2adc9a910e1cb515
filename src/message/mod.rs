//! Outgoing message model and its fluent builder
//!
//! # Example
//!
//! ```rust,ignore
//! use tideway_mail::{ConsoleMailer, MessageBuilder};
//!
//! let mailer = ConsoleMailer::new();
//!
//! let mut builder = MessageBuilder::new();
//! builder
//!     .set_from("noreply@example.com")
//!     .set_subject("Your {} report", &[&"weekly"])
//!     .set_recipient(["alice@example.com", "bob@example.com"])
//!     .set_cc(["team@example.com"])
//!     .add_attachment("report.pdf", Some("Weekly report.pdf"))?
//!     .set_text("Report attached.");
//!
//! builder.send(&mailer).await?;
//! ```

mod attachment;
mod builder;
mod recipients;
mod subject;

pub use attachment::Attachment;
pub use builder::MessageBuilder;
pub use recipients::RecipientSet;
pub use subject::{FormatError, Subject};

use crate::error::{MailError, Result};

/// An email message assembled by [`MessageBuilder`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Sender address; mailers may substitute a configured default
    pub from: Option<String>,
    /// Subject template and arguments, rendered at send time
    pub subject: Option<Subject>,
    /// Primary recipients
    pub to: RecipientSet,
    /// Carbon-copy recipients
    pub cc: RecipientSet,
    /// Blind carbon-copy recipients
    pub bcc: RecipientSet,
    /// Reply-to address
    pub reply_to: Option<String>,
    /// Charset for text bodies (UTF-8 when unset)
    pub charset: Option<String>,
    /// Extra headers in insertion order
    pub headers: Vec<(String, String)>,
    /// Plain text body
    pub text: Option<String>,
    /// HTML body
    pub html: Option<String>,
    /// Attachments in the order they were added
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Render the subject, or an empty string when none was set
    pub fn rendered_subject(&self) -> std::result::Result<String, FormatError> {
        match self.subject {
            Some(ref subject) => subject.render(),
            None => Ok(String::new()),
        }
    }

    /// Total number of addressees across To, CC and BCC
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }

    /// Check the message can be handed to a mailer
    ///
    /// Requires at least one recipient and a subject that renders.
    pub fn validate(&self) -> Result<()> {
        if self.recipient_count() == 0 {
            return Err(MailError::MissingField("recipient"));
        }
        self.rendered_subject()?;
        Ok(())
    }
}
