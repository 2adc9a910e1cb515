//! Console mailer for development
//!
//! Prints messages to stdout instead of sending them, useful for local development.
//!
//! # Security Warning
//!
//! This mailer outputs message content to stdout which may be captured by
//! logging systems in containerized environments. **Do not use in production**
//! as bodies may contain sensitive information (tokens, PII, etc.).

use crate::error::Result;
use crate::message::Message;
use crate::traits::mailer::Mailer;
use async_trait::async_trait;

/// A mailer that prints messages to stdout instead of sending them
///
/// By default, body content is redacted. Use `with_full_output(true)`
/// to see full content in development.
///
/// # Example
///
/// ```rust,ignore
/// use tideway_mail::{ConsoleMailer, MessageBuilder};
///
/// // Default: redacts body content
/// let mailer = ConsoleMailer::new();
///
/// // Development only: show full content
/// let mailer = ConsoleMailer::new().with_full_output(true);
///
/// let mut builder = MessageBuilder::new();
/// builder.set_recipient(["to@example.com"]).set_subject("Test", &[]).set_text("Hello!");
/// builder.send(&mailer).await?; // Prints to stdout
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleMailer {
    /// Prefix for each output line
    prefix: String,
    /// Whether to show full bodies (default: false)
    show_full_content: bool,
}

impl ConsoleMailer {
    /// Create a new console mailer
    ///
    /// By default, body content is redacted.
    /// Use `with_full_output(true)` to see full content.
    pub fn new() -> Self {
        Self {
            prefix: "[EMAIL]".to_string(),
            show_full_content: false,
        }
    }

    /// Create a console mailer with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            show_full_content: false,
        }
    }

    /// Enable or disable full body output
    ///
    /// Default: `false` (body content is redacted)
    pub fn with_full_output(mut self, enabled: bool) -> Self {
        if enabled {
            tracing::warn!(
                "ConsoleMailer: full output enabled - message content will be visible in logs. \
                 Do not use in production!"
            );
        }
        self.show_full_content = enabled;
        self
    }

    /// Lines that `send` prints for `message`
    fn render_lines(&self, message: &Message, subject: &str) -> Vec<String> {
        let p = &self.prefix;
        let mut lines = Vec::new();

        lines.push(format!("{} ════════════════════════════════════════", p));
        match message.from {
            Some(ref from) => lines.push(format!("{} From:    {}", p, from)),
            None => lines.push(format!("{} From:    [default]", p)),
        }
        lines.push(format!("{} To:      {} recipient(s)", p, message.to.len()));
        if !message.cc.is_empty() {
            lines.push(format!("{} CC:      {} recipient(s)", p, message.cc.len()));
        }
        if !message.bcc.is_empty() {
            lines.push(format!("{} BCC:     {} recipient(s)", p, message.bcc.len()));
        }
        if message.reply_to.is_some() {
            lines.push(format!("{} Reply-To: [set]", p));
        }
        lines.push(format!("{} Subject: {}", p, subject));
        for attachment in &message.attachments {
            lines.push(format!("{} Attach:  {}", p, attachment.display_name()));
        }
        lines.push(format!("{} ────────────────────────────────────────", p));

        if self.show_full_content {
            if let Some(ref text) = message.text {
                lines.push(format!("{} [TEXT]", p));
                lines.extend(text.lines().map(|line| format!("{} {}", p, line)));
            }
            if let Some(ref html) = message.html {
                lines.push(format!("{} [HTML]", p));
                lines.extend(html.lines().map(|line| format!("{} {}", p, line)));
            }
        } else {
            if let Some(ref text) = message.text {
                lines.push(format!("{} [TEXT] {} bytes [REDACTED]", p, text.len()));
            }
            if let Some(ref html) = message.html {
                lines.push(format!("{} [HTML] {} bytes [REDACTED]", p, html.len()));
            }
        }

        lines.push(format!("{} ════════════════════════════════════════", p));
        lines
    }
}

impl Default for ConsoleMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: &Message) -> Result<()> {
        message.validate()?;
        let subject = message.rendered_subject()?;

        for line in self.render_lines(message, &subject) {
            println!("{}", line);
        }

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

    fn sample() -> Message {
        let mut builder = MessageBuilder::new();
        builder
            .set_from("from@test.com")
            .set_recipient(["to@test.com"])
            .set_cc(["cc1@test.com", "cc2@test.com"])
            .set_subject("Invoice {}", &[&42])
            .set_text("secret token 1234");
        builder.build()
    }

    #[tokio::test]
    async fn test_console_mailer_sends_without_error() {
        let mailer = ConsoleMailer::new();
        assert!(mailer.send(&sample()).await.is_ok());
    }

    #[tokio::test]
    async fn test_console_mailer_validates_message() {
        let mailer = ConsoleMailer::new();
        let message = Message::default();

        let result = mailer.send(&message).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_redacted_output_hides_body() {
        let mailer = ConsoleMailer::new();
        let message = sample();
        let lines = mailer.render_lines(&message, "Invoice 42");

        assert!(lines.iter().any(|l| l == "[EMAIL] Subject: Invoice 42"));
        assert!(lines.iter().any(|l| l == "[EMAIL] CC:      2 recipient(s)"));
        assert!(lines.iter().any(|l| l.contains("[REDACTED]")));
        assert!(!lines.iter().any(|l| l.contains("secret token")));
    }

    #[test]
    fn test_full_output_shows_body() {
        let mailer = ConsoleMailer::with_prefix("[DEV]").with_full_output(true);
        let lines = mailer.render_lines(&sample(), "Invoice 42");

        assert!(lines.iter().any(|l| l == "[DEV] secret token 1234"));
    }

    #[test]
    fn test_console_mailer_is_healthy() {
        let mailer = ConsoleMailer::new();
        assert!(mailer.is_healthy());
    }
}
