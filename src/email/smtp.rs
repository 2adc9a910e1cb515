//! SMTP mailer using lettre
//!
//! Converts a [`Message`] into a MIME message and sends it via an SMTP server.

use crate::error::{MailError, Result};
use crate::message::{Attachment, Message};
use crate::traits::mailer::Mailer;
use crate::utils::{get_env_flag, get_env_with_prefix};
use async_trait::async_trait;
use lettre::{
    message::{
        header::{ContentTransferEncoding, ContentType, HeaderName, HeaderValue},
        Attachment as MimeAttachment, Body as MimeBody, Mailbox, MultiPart, SinglePart,
    },
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message as MimeMessage, Tokio1Executor,
};
use serde::{Deserialize, Serialize};

/// SMTP configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port (default: 587 for STARTTLS)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Username for authentication
    #[serde(default)]
    pub username: Option<String>,
    /// Password for authentication
    #[serde(default)]
    pub password: Option<String>,
    /// Default "from" address
    #[serde(default)]
    pub default_from: Option<String>,
    /// Use STARTTLS (default: true)
    #[serde(default = "default_starttls")]
    pub starttls: bool,
}

fn default_port() -> u16 {
    587
}

fn default_starttls() -> bool {
    true
}

impl SmtpConfig {
    /// Create a new SMTP configuration with the server hostname
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            username: None,
            password: None,
            default_from: None,
            starttls: default_starttls(),
        }
    }

    /// Set the port (default: 587)
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set authentication credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the default "from" address
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.default_from = Some(address.into());
        self
    }

    /// Disable STARTTLS (use implicit TLS)
    pub fn no_starttls(mut self) -> Self {
        self.starttls = false;
        self
    }

    /// Create config from environment variables
    ///
    /// Each variable is looked up with the `TIDEWAY_` prefix first:
    /// - `SMTP_HOST` (required)
    /// - `SMTP_PORT` (optional, default: 587)
    /// - `SMTP_USERNAME` (optional)
    /// - `SMTP_PASSWORD` (optional)
    /// - `SMTP_FROM` (optional)
    /// - `SMTP_STARTTLS` (optional, default: true)
    pub fn from_env() -> Result<Self> {
        let host = get_env_with_prefix("SMTP_HOST")
            .ok_or_else(|| MailError::config("SMTP_HOST environment variable not set"))?;

        let port = parse_port(get_env_with_prefix("SMTP_PORT"))?;

        let starttls = get_env_flag("SMTP_STARTTLS").unwrap_or(true);

        Ok(Self {
            host,
            port,
            username: get_env_with_prefix("SMTP_USERNAME"),
            password: get_env_with_prefix("SMTP_PASSWORD"),
            default_from: get_env_with_prefix("SMTP_FROM"),
            starttls,
        })
    }
}

fn parse_port(value: Option<String>) -> Result<u16> {
    match value {
        Some(raw) => match raw.trim().parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(MailError::config(format!(
                "Invalid SMTP_PORT '{}': expected 1-65535",
                raw
            ))),
        },
        None => Ok(default_port()),
    }
}

/// SMTP mailer using lettre
///
/// # Example
///
/// ```rust,ignore
/// use tideway_mail::{MessageBuilder, SmtpConfig, SmtpMailer};
///
/// let config = SmtpConfig::new("smtp.gmail.com")
///     .port(587)
///     .credentials("user@gmail.com", "app-password")
///     .from("noreply@myapp.com");
///
/// let mailer = SmtpMailer::new(config)?;
///
/// let mut builder = MessageBuilder::new();
/// builder
///     .set_recipient(["user@example.com"])
///     .set_subject("Welcome, {}!", &[&"Ada"])
///     .set_html("<h1>Welcome to our app!</h1>");
/// builder.send(&mailer).await?;
/// ```
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new SMTP mailer with the given configuration
    pub fn new(config: SmtpConfig) -> Result<Self> {
        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailError::transport(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError::transport(format!("Failed to create SMTP transport: {}", e)))?
        };

        builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            let credentials = Credentials::new(username.clone(), password.clone());
            builder = builder.credentials(credentials);
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Create a new SMTP mailer from environment variables
    pub fn from_env() -> Result<Self> {
        let config = SmtpConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }

    /// Open a connection to the server and check it answers
    pub async fn check_connection(&self) -> Result<bool> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| MailError::transport(format!("SMTP connection check failed: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &Message) -> Result<()> {
        message.validate()?;

        let mime = build_mime_message(message, self.config.default_from.as_deref()).await?;

        self.transport
            .send(mime)
            .await
            .map_err(|e| MailError::transport(format!("Failed to send email: {}", e)))?;

        tracing::debug!(
            host = %self.config.host,
            recipients = message.recipient_count(),
            "Message delivered to SMTP server"
        );

        Ok(())
    }

    fn is_healthy(&self) -> bool {
        // Connection state is not cached; use check_connection() for a live check
        true
    }
}

// Implement Debug manually since AsyncSmtpTransport doesn't impl Debug
impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .finish()
    }
}

/// Headers that come from dedicated message fields and may not be set raw
const RESERVED_HEADERS: &[&str] = &[
    "from",
    "to",
    "cc",
    "bcc",
    "reply-to",
    "subject",
    "date",
    "mime-version",
    "content-type",
    "content-transfer-encoding",
];

enum Body {
    Single(SinglePart),
    Multi(MultiPart),
}

/// Assemble the MIME message, reading attachment files from disk
pub(crate) async fn build_mime_message(message: &Message, default_from: Option<&str>) -> Result<MimeMessage> {
    let from = message
        .from
        .as_deref()
        .or(default_from)
        .ok_or(MailError::MissingField("from"))?;

    let mut builder = MimeMessage::builder()
        .from(parse_mailbox("from", from)?)
        .subject(message.rendered_subject()?);

    for to in &message.to {
        builder = builder.to(parse_mailbox("to", to)?);
    }
    for cc in &message.cc {
        builder = builder.cc(parse_mailbox("cc", cc)?);
    }
    for bcc in &message.bcc {
        builder = builder.bcc(parse_mailbox("bcc", bcc)?);
    }
    if let Some(ref reply_to) = message.reply_to {
        builder = builder.reply_to(parse_mailbox("reply_to", reply_to)?);
    }

    for (name, value) in &message.headers {
        if RESERVED_HEADERS.contains(&name.trim().to_ascii_lowercase().as_str()) {
            return Err(MailError::build(format!(
                "Header '{}' is set from message fields and cannot be added as a custom header",
                name
            )));
        }
        let header_name = HeaderName::new_from_ascii(name.clone())
            .map_err(|_| MailError::build(format!("Invalid header name '{}'", name)))?;
        builder = builder.raw_header(HeaderValue::new(header_name, value.clone()));
    }

    let body = build_body(message)?;

    let result = if message.attachments.is_empty() {
        match body {
            Body::Single(part) => builder.singlepart(part),
            Body::Multi(part) => builder.multipart(part),
        }
    } else {
        let mut mixed = match body {
            Body::Single(part) => MultiPart::mixed().singlepart(part),
            Body::Multi(part) => MultiPart::mixed().multipart(part),
        };
        for attachment in &message.attachments {
            mixed = mixed.singlepart(attachment_part(attachment).await?);
        }
        builder.multipart(mixed)
    };

    result.map_err(|e| MailError::build(e.to_string()))
}

fn build_body(message: &Message) -> Result<Body> {
    let charset = message.charset.as_deref();

    let body = match (&message.text, &message.html) {
        (Some(text), Some(html)) => Body::Multi(
            MultiPart::alternative()
                .singlepart(text_part("text/plain", charset, text)?)
                .singlepart(text_part("text/html", charset, html)?),
        ),
        (Some(text), None) => Body::Single(text_part("text/plain", charset, text)?),
        (None, Some(html)) => Body::Single(text_part("text/html", charset, html)?),
        (None, None) => Body::Single(text_part("text/plain", charset, "")?),
    };

    Ok(body)
}

fn text_part(mime: &str, charset: Option<&str>, body: &str) -> Result<SinglePart> {
    let content_type = match charset {
        Some(charset) => ContentType::parse(&format!("{}; charset={}", mime, charset))
            .map_err(|e| MailError::build(format!("Invalid charset '{}': {}", charset, e)))?,
        None if mime == "text/html" => ContentType::TEXT_HTML,
        None => ContentType::TEXT_PLAIN,
    };

    let part = SinglePart::builder().header(content_type);
    match charset {
        Some(charset) if needs_transcoding(charset) => {
            let bytes = encode_body(charset, body)?;
            let body = MimeBody::new_with_encoding(bytes, ContentTransferEncoding::QuotedPrintable)
                .map_err(|_| MailError::build(format!("Failed to encode body as {}", charset)))?;
            Ok(part.body(body))
        }
        Some(charset) if charset.eq_ignore_ascii_case("us-ascii") && !body.is_ascii() => Err(
            MailError::build("Body contains non-ASCII characters but charset is us-ascii"),
        ),
        _ => Ok(part.body(body.to_string())),
    }
}

fn needs_transcoding(charset: &str) -> bool {
    !["utf-8", "utf8", "us-ascii"]
        .iter()
        .any(|c| charset.eq_ignore_ascii_case(c))
}

/// Encode `body` in `charset`, failing if any character has no mapping
fn encode_body(charset: &str, body: &str) -> Result<Vec<u8>> {
    let encoding = encoding_rs::Encoding::for_label(charset.trim().as_bytes())
        .ok_or_else(|| MailError::build(format!("Unknown charset '{}'", charset)))?;

    let (bytes, used, unmappable) = encoding.encode(body);
    // encode() falls back to UTF-8 for encodings it cannot produce (UTF-16, replacement)
    if used != encoding {
        return Err(MailError::build(format!("Cannot encode bodies as '{}'", charset)));
    }
    if unmappable {
        return Err(MailError::build(format!(
            "Body contains characters that '{}' cannot represent",
            charset
        )));
    }

    Ok(bytes.into_owned())
}

async fn attachment_part(attachment: &Attachment) -> Result<SinglePart> {
    let content = attachment.read().await?;
    let mime = mime_guess::from_path(&attachment.path).first_or_octet_stream();
    let content_type = ContentType::parse(mime.as_ref())
        .map_err(|e| MailError::build(format!("Invalid attachment content type '{}': {}", mime, e)))?;

    Ok(MimeAttachment::new(attachment.display_name()).body(content, content_type))
}

fn parse_mailbox(field: &'static str, address: &str) -> Result<Mailbox> {
    address
        .parse()
        .map_err(|e| MailError::invalid_address(field, address, e))
}
