//! Webhook URL parsing.

use std::str::FromStr;

use thiserror::Error;
use url::Url;

use super::WebhookToken;
use crate::id::Snowflake;

/// Error returned when a webhook URL does not carry usable credentials.
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Webhook URL must contain '/webhooks/{{id}}/{{token}}'")]
    MissingSegment,

    #[error("Invalid webhook id '{0}'")]
    InvalidId(String),

    /// The token segment does not decode to UTF-8. Not echoed: it is a secret.
    #[error("Webhook token is not valid percent-encoded UTF-8")]
    InvalidToken,
}

/// The id and token that a webhook URL carries.
///
/// ```
/// use hookwire::webhook::WebhookCredentials;
///
/// let creds: WebhookCredentials = "https://discord.com/api/webhooks/123/abc-DEF"
///     .parse()
///     .unwrap();
/// assert_eq!(creds.id.get(), 123);
/// assert_eq!(creds.token.as_str(), "abc-DEF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookCredentials {
    /// Webhook id
    pub id: Snowflake,
    /// Webhook token, percent-decoded
    pub token: WebhookToken,
}

impl WebhookCredentials {
    /// Extracts the credentials from the `/webhooks/{id}/{token}` segments.
    ///
    /// Any prefix (`/api`, `/api/v9`) and trailing segments are ignored.
    /// The token is percent-decoded; the client encodes it again when it
    /// builds a request URL.
    ///
    /// # Errors
    ///
    /// Returns an error if either segment is missing or the id is not numeric.
    pub fn from_url(url: &Url) -> Result<Self, CredentialsError> {
        let mut segments = url
            .path_segments()
            .ok_or(CredentialsError::MissingSegment)?
            .skip_while(|s| *s != "webhooks")
            .skip(1);

        let id = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or(CredentialsError::MissingSegment)?;
        let token = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or(CredentialsError::MissingSegment)?;

        let id = id
            .parse()
            .map_err(|_| CredentialsError::InvalidId(id.to_string()))?;

        let token = urlencoding::decode(token).map_err(|_| CredentialsError::InvalidToken)?;

        Ok(Self {
            id,
            token: WebhookToken::new(token),
        })
    }
}

impl FromStr for WebhookCredentials {
    type Err = CredentialsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_url(&Url::parse(s)?)
    }
}
