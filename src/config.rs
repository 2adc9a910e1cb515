use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "smtp")]
use crate::email::{SmtpConfig, SmtpMailer};
use crate::email::{ConsoleMailer, MemoryMailer};
use crate::error::{MailError, Result};
use crate::traits::mailer::Mailer;
use crate::utils::{get_env_flag, get_env_with_prefix};

/// Main configuration for tideway-mail
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub mailer: MailerConfig,
    #[cfg(feature = "smtp")]
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Parse a configuration from JSON; missing sections take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json")]
    pub json: bool,
}

/// Which delivery backend to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MailerBackend {
    #[default]
    Console,
    Smtp,
    Memory,
}

impl std::str::FromStr for MailerBackend {
    type Err = MailError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "smtp" => Ok(Self::Smtp),
            "memory" => Ok(Self::Memory),
            other => Err(MailError::config(format!(
                "Unknown mail backend: {}. Must be one of: console, smtp, memory",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MailerConfig {
    #[serde(default)]
    pub backend: MailerBackend,
    /// Sender used when a message has no "from" of its own
    #[serde(default)]
    pub default_from: Option<String>,
    /// Print full bodies from the console backend
    #[serde(default)]
    pub console_full_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json() -> bool {
    false
}

/// Builder for Config with environment variable support
#[must_use = "builder does nothing until you call build()"]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.config.logging.json = enabled;
        self
    }

    pub fn with_backend(mut self, backend: MailerBackend) -> Self {
        self.config.mailer.backend = backend;
        self
    }

    pub fn with_default_from(mut self, address: impl Into<String>) -> Self {
        self.config.mailer.default_from = Some(address.into());
        self
    }

    pub fn with_console_full_output(mut self, enabled: bool) -> Self {
        self.config.mailer.console_full_output = enabled;
        self
    }

    #[cfg(feature = "smtp")]
    pub fn with_smtp(mut self, smtp: SmtpConfig) -> Self {
        self.config.smtp = Some(smtp);
        self
    }

    /// Load configuration from environment variables with TIDEWAY_ prefix
    pub fn from_env(mut self) -> Self {
        if let Some(level) = get_env_with_prefix("LOG_LEVEL") {
            self.config.logging.level = level;
        }
        if let Some(json) = get_env_flag("LOG_JSON") {
            self.config.logging.json = json;
        }
        if let Some(backend) = get_env_with_prefix("MAIL_BACKEND") {
            match backend.parse() {
                Ok(backend) => self.config.mailer.backend = backend,
                Err(e) => tracing::warn!(error = %e, "Ignoring MAIL_BACKEND"),
            }
        }
        if let Some(from) = get_env_with_prefix("MAIL_FROM") {
            self.config.mailer.default_from = Some(from);
        }
        if let Some(full) = get_env_flag("MAIL_CONSOLE_FULL_OUTPUT") {
            self.config.mailer.console_full_output = full;
        }

        // Load SMTP config only when a host is configured
        #[cfg(feature = "smtp")]
        {
            if get_env_with_prefix("SMTP_HOST").is_some() {
                match SmtpConfig::from_env() {
                    Ok(smtp) => self.config.smtp = Some(smtp),
                    Err(e) => tracing::warn!(error = %e, "Ignoring SMTP settings"),
                }
            }
        }

        self
    }

    /// Build the configuration, validating all settings
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration is invalid:
    /// - Invalid log level
    /// - SMTP backend selected without SMTP settings
    /// - SMTP port of 0
    pub fn build(self) -> Result<Config> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.config.logging.level.to_lowercase().as_str()) {
            return Err(MailError::config(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.config.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        #[cfg(feature = "smtp")]
        {
            if self.config.mailer.backend == MailerBackend::Smtp && self.config.smtp.is_none() {
                return Err(MailError::config(
                    "SMTP backend selected but no SMTP settings provided (set SMTP_HOST)",
                ));
            }
            if let Some(ref smtp) = self.config.smtp {
                if smtp.port == 0 {
                    return Err(MailError::config("SMTP port must be greater than 0"));
                }
            }
        }

        #[cfg(not(feature = "smtp"))]
        {
            if self.config.mailer.backend == MailerBackend::Smtp {
                return Err(MailError::config(
                    "SMTP backend selected but the 'smtp' feature is disabled",
                ));
            }
        }

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the mailer selected by `config`
///
/// The mailer-level `default_from` fills in the SMTP default sender when the
/// SMTP settings do not carry one.
pub fn mailer_from_config(config: &Config) -> Result<Arc<dyn Mailer>> {
    let mailer: Arc<dyn Mailer> = match config.mailer.backend {
        MailerBackend::Console => {
            Arc::new(ConsoleMailer::new().with_full_output(config.mailer.console_full_output))
        }
        MailerBackend::Memory => Arc::new(MemoryMailer::new()),
        #[cfg(feature = "smtp")]
        MailerBackend::Smtp => {
            let mut smtp = config
                .smtp
                .clone()
                .ok_or_else(|| MailError::config("SMTP backend selected but no SMTP settings provided"))?;
            if smtp.default_from.is_none() {
                smtp.default_from = config.mailer.default_from.clone();
            }
            Arc::new(SmtpMailer::new(smtp)?)
        }
        #[cfg(not(feature = "smtp"))]
        MailerBackend::Smtp => {
            return Err(MailError::config(
                "SMTP backend selected but the 'smtp' feature is disabled",
            ));
        }
    };

    tracing::info!(backend = ?config.mailer.backend, "Mailer configured");
    Ok(mailer)
}
