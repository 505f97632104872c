//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::webhook::{ClientConfig, OwnerToken};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Client configuration (API base URL)
    pub client: ClientConfig,

    /// Per-request timeout
    pub timeout: Duration,

    /// `User-Agent` header value
    pub user_agent: String,

    /// Bot token for owner-authenticated commands, if configured
    pub bot_token: Option<OwnerToken>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ api_base: {}, timeout: {}s, user_agent: {}, bot_token: {} }}",
            self.client.api_base(),
            self.timeout.as_secs(),
            self.user_agent,
            if self.bot_token.is_some() { "set" } else { "unset" },
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and `HOOKWIRE_BOT_TOKEN`) take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API base URL is invalid
    /// - The timeout is zero
    /// - The user agent or bot token cannot be sent as a header value
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let client = ClientConfig::new(Self::resolve_api_base(cli, toml)?);
        let timeout = Self::resolve_timeout(cli, toml)?;
        let user_agent = Self::resolve_user_agent(cli, toml)?;
        let bot_token = Self::resolve_bot_token(cli, toml)?;

        Ok(Self {
            client,
            timeout,
            user_agent,
            bot_token,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_api_base(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .api_base
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.base_url.as_deref()))
            .unwrap_or(defaults::API_BASE);

        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason,
        };

        let url = Url::parse(url_str).map_err(|e| invalid(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not have a query or fragment".to_string()));
        }

        Ok(url)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.api.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_user_agent(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let user_agent = cli
            .user_agent
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.user_agent.as_deref()))
            .unwrap_or(defaults::USER_AGENT);

        check_header_value("User-Agent", user_agent)?;
        Ok(user_agent.to_string())
    }

    fn resolve_bot_token(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<OwnerToken>, ConfigError> {
        // Blank values (e.g. an exported but empty env var) count as unset
        let token = cli
            .bot_token
            .as_deref()
            .or_else(|| toml.and_then(|t| t.auth.bot_token.as_deref()))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        token
            .map(|t| {
                check_header_value("Authorization", t)?;
                Ok(OwnerToken::new(t))
            })
            .transpose()
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn check_header_value(name: &'static str, value: &str) -> Result<(), ConfigError> {
    HeaderValue::from_str(value)
        .map(drop)
        .map_err(|e| ConfigError::InvalidHeaderValue {
            name,
            reason: e.to_string(),
        })
}
