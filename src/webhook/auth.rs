//! Authentication modes for webhook endpoints.

use std::fmt;

use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderValue};

use super::EncodingError;

/// A credential that authorizes calls against `/webhooks/{id}`.
///
/// Each implementation contributes either a URL fragment or a header,
/// never both: owner-authenticated calls send `Authorization`, while
/// token-authenticated calls embed the webhook token in the path.
pub trait WebhookAuth: Send + Sync {
    /// Path segment appended after `/webhooks/{id}`, if any.
    fn path_token(&self) -> Option<&str>;

    /// Adds the headers this credential needs to `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::HeaderValue`] if the credential cannot be
    /// expressed as a header value.
    fn authorize(&self, headers: &mut HeaderMap) -> Result<(), EncodingError>;
}

/// The application's long-lived credential, sent as `Authorization`.
///
/// The value is sent verbatim, so include the scheme (`Bot ...`).
#[derive(Clone, PartialEq, Eq)]
pub struct OwnerToken(String);

impl OwnerToken {
    /// Wraps a bot token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OwnerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OwnerToken(<redacted>)")
    }
}

impl WebhookAuth for OwnerToken {
    fn path_token(&self) -> Option<&str> {
        None
    }

    fn authorize(&self, headers: &mut HeaderMap) -> Result<(), EncodingError> {
        let mut value =
            HeaderValue::from_str(&self.0).map_err(|e| EncodingError::HeaderValue {
                name: "authorization",
                reason: e.to_string(),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// A webhook or interaction token, embedded in the URL path.
///
/// The token in the path is the proof of authorization, so no header is
/// sent.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookToken(String);

impl WebhookToken {
    /// Wraps a webhook or interaction token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WebhookToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookToken(<redacted>)")
    }
}

impl WebhookAuth for WebhookToken {
    fn path_token(&self) -> Option<&str> {
        Some(&self.0)
    }

    fn authorize(&self, _headers: &mut HeaderMap) -> Result<(), EncodingError> {
        Ok(())
    }
}
