//! The optional TOML configuration file.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Contents of the configuration file.
///
/// Every key is optional; unknown keys are rejected so typos surface.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API connection section
    #[serde(default)]
    pub api: ApiSection,

    /// Credentials section
    #[serde(default)]
    pub auth: AuthSection,
}

/// API connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API base URL
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// `User-Agent` header value
    pub user_agent: Option<String>,
}

/// Credentials section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// Bot token for owner-authenticated calls, including the `Bot ` prefix
    pub bot_token: Option<String>,
}

impl TomlConfig {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] or [`ConfigError::TomlParse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses file contents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TomlParse`] for invalid TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// The commented template written by `hookwire init`.
#[must_use]
pub fn default_config_template() -> String {
    r#"# hookwire configuration file

[api]
# API base URL (default: https://discord.com/api/v9)
# base_url = "https://discord.com/api/v9"

# Request timeout in seconds (default: 30)
timeout = 30

# User-Agent header (default: DiscordBot (hookwire, <version>))
# user_agent = "DiscordBot (https://example.com, 1.0)"

[auth]
# Bot token for commands addressing a webhook by --id.
# Prefer the HOOKWIRE_BOT_TOKEN environment variable over storing it here.
# bot_token = "Bot your-token-here"
"#
    .to_string()
}
