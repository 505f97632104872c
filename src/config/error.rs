//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::webhook::CredentialsError;

/// Everything that can go wrong before a request is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Raised by `init` when the template cannot be written.
    #[error("Cannot write config file '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value with no default was given neither on the command line nor in the file.
    #[error("Missing {field}. {hint}")]
    MissingRequired {
        /// One of the [`field`] constants
        field: &'static str,
        /// How to supply the value
        hint: &'static str,
    },

    /// The API base URL is not an absolute http(s) URL.
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid {field}: {reason}")]
    InvalidDuration {
        field: &'static str,
        reason: String,
    },

    /// A webhook URL does not carry an id and token.
    ///
    /// The URL itself is not echoed: it contains the token.
    #[error("Invalid webhook URL: {0}")]
    InvalidWebhook(#[source] CredentialsError),

    /// The user agent or bot token contains bytes not allowed in a header.
    #[error("Value for '{name}' is not a valid header value: {reason}")]
    InvalidHeaderValue { name: &'static str, reason: String },
}

/// Field names reported by [`ConfigError::MissingRequired`].
pub mod field {
    /// The owner bot token.
    pub const BOT_TOKEN: &str = "bot_token";
    /// The webhook reference (`--webhook-url` or `--id`).
    pub const WEBHOOK: &str = "webhook";
    /// The message body of an execute call.
    pub const CONTENT: &str = "content";
}

impl ConfigError {
    /// Shorthand for [`ConfigError::MissingRequired`].
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
