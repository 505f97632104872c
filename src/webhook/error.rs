//! Error types for webhook operations.

use std::fmt;

use thiserror::Error;

use crate::dispatch::{DispatchError, RequestError};

/// The logical operation a request belonged to.
///
/// Attached to every [`ApiError`] for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetWebhook,
    TokenGetWebhook,
    TokenExecuteWebhook,
    UpdateWebhook,
    TokenUpdateWebhook,
    DeleteWebhook,
    TokenDeleteWebhook,
    TokenGetMessage,
    TokenEditMessage,
    TokenDeleteMessage,
    EditWebhookMessage,
    DeleteWebhookMessage,
    CreateInteractionResponse,
    EditOriginalInteractionResponse,
    DeleteOriginalInteractionResponse,
}

impl Operation {
    /// Returns the operation name as used by the client method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetWebhook => "webhook",
            Self::TokenGetWebhook => "token_webhook",
            Self::TokenExecuteWebhook => "token_execute_webhook",
            Self::UpdateWebhook => "update_webhook",
            Self::TokenUpdateWebhook => "token_update_webhook",
            Self::DeleteWebhook => "delete_webhook",
            Self::TokenDeleteWebhook => "token_delete_webhook",
            Self::TokenGetMessage => "token_get_message",
            Self::TokenEditMessage => "token_edit_message",
            Self::TokenDeleteMessage => "token_delete_message",
            Self::EditWebhookMessage => "edit_webhook_message",
            Self::DeleteWebhookMessage => "delete_webhook_message",
            Self::CreateInteractionResponse => "create_interaction_response",
            Self::EditOriginalInteractionResponse => "edit_original_interaction_response",
            Self::DeleteOriginalInteractionResponse => "delete_original_interaction_response",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request could not be encoded. Raised before anything is dispatched.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The body could not be serialized to JSON.
    #[error("Failed to serialize body: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint URL could not be built from the base URL and path.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// A path segment (usually a token) is empty, `.` or `..`.
    ///
    /// The segment is not echoed: it may be a token.
    #[error("Path segment must not be empty, '.' or '..'")]
    PathSegment,

    /// A header value contains characters HTTP does not allow.
    #[error("Invalid value for header '{name}': {reason}")]
    HeaderValue {
        /// Header name
        name: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Error returned by [`WebhookClient`](super::WebhookClient) operations.
///
/// The underlying failure is passed through unchanged; the only thing
/// added is which operation failed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The dispatcher failed (transport failure or remote rejection).
    #[error("{operation} failed: {source}")]
    Dispatch {
        /// Operation that failed
        operation: Operation,
        /// Dispatcher error
        #[source]
        source: DispatchError,
    },

    /// The request could not be encoded; nothing was sent.
    #[error("{operation} failed: {source}")]
    Encoding {
        /// Operation that failed
        operation: Operation,
        /// Encoding error
        #[source]
        source: EncodingError,
    },
}

impl ApiError {
    /// Returns the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Dispatch { operation, .. } | Self::Encoding { operation, .. } => *operation,
        }
    }

    /// Returns the remote rejection, if the API answered with a non-2xx status.
    #[must_use]
    pub const fn request_error(&self) -> Option<&RequestError> {
        match self {
            Self::Dispatch { source, .. } => source.request_error(),
            Self::Encoding { .. } => None,
        }
    }

    /// Returns the HTTP status of a remote rejection.
    #[must_use]
    pub fn status(&self) -> Option<http::StatusCode> {
        self.request_error().map(|e| e.status)
    }
}
