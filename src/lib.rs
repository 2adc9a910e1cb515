//! tideway-mail - Fluent email message builder with pluggable mailers
//!
//! Compose a message with chained setters, then hand it to any [`Mailer`]
//! backend: SMTP via lettre, the console for development, or an in-memory
//! recorder for tests.
//!
//! # Features
//!
//! - **Builder**: `set_*` replaces a field, `add_*` appends
//! - **Subjects**: `{}` placeholders rendered lazily at send time
//! - **Attachments**: checked for readability when added, read when sent
//! - **Backends**: `ConsoleMailer`, `MemoryMailer`, `SmtpMailer`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tideway_mail::{ConfigBuilder, MessageBuilder, mailer_from_config};
//!
//! #[tokio::main]
//! async fn main() -> tideway_mail::Result<()> {
//!     tideway_mail::init_tracing();
//!
//!     let config = ConfigBuilder::new().from_env().build()?;
//!     let mailer = mailer_from_config(&config)?;
//!
//!     let mut builder = MessageBuilder::new();
//!     builder
//!         .set_from("noreply@example.com")
//!         .set_subject("Hello {}", &[&"World"])
//!         .set_recipient(["user@example.com"])
//!         .set_text("Hi!");
//!
//!     builder.send(mailer.as_ref()).await
//! }
//! ```

mod config;
pub mod email;
mod error;
pub mod message;
pub mod traits;
pub mod utils;

// Re-exports for public API
pub use config::{Config, ConfigBuilder, LoggingConfig, MailerBackend, MailerConfig, mailer_from_config};
pub use email::{ConsoleMailer, MemoryMailer};
#[cfg(feature = "smtp")]
pub use email::{SmtpConfig, SmtpMailer};
pub use error::{MailError, Result};
pub use message::{Attachment, FormatError, Message, MessageBuilder, RecipientSet, Subject};
pub use traits::mailer::Mailer;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging with sensible defaults
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "tideway_mail=debug")
/// - `TIDEWAY_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json_logs = utils::get_env_flag("LOG_JSON").unwrap_or(false);

    install_subscriber(env_filter, json_logs);
}

/// Initialize tracing with a custom configuration
pub fn init_tracing_with_config(config: &Config) {
    let env_filter = EnvFilter::new(&config.logging.level);
    install_subscriber(env_filter, config.logging.json);
}

fn install_subscriber(env_filter: EnvFilter, json: bool) {
    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
