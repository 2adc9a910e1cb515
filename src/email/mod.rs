//! Delivery backends
//!
//! This module provides message delivery with multiple backend options:
//! - `ConsoleMailer` - Prints messages to stdout (for development)
//! - `MemoryMailer` - Records messages in memory (for tests)
//! - `SmtpMailer` - Sends messages via SMTP using lettre
//!
//! # Example
//!
//! ```rust,ignore
//! use tideway_mail::email::{SmtpConfig, SmtpMailer};
//! use tideway_mail::MessageBuilder;
//!
//! let config = SmtpConfig::new("smtp.example.com")
//!     .credentials("user", "password")
//!     .from("noreply@example.com");
//! let mailer = SmtpMailer::new(config)?;
//!
//! let mut builder = MessageBuilder::new();
//! builder
//!     .set_recipient(["user@example.com"])
//!     .set_subject("Welcome!", &[])
//!     .set_text("Thanks for signing up!");
//!
//! builder.send(&mailer).await?;
//! ```

mod console;
mod memory;
#[cfg(feature = "smtp")]
mod smtp;

pub use console::ConsoleMailer;
pub use memory::MemoryMailer;
#[cfg(feature = "smtp")]
pub use smtp::{SmtpConfig, SmtpMailer};
