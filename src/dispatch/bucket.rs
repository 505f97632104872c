//! Rate-limit bucket keys.

use std::fmt;

/// Groups endpoints that share a rate-limit counter on the remote platform.
///
/// The dispatcher serializes concurrent requests carrying the same key.
/// A key depends only on the endpoint, never on call history or arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    /// `/webhooks/{id}` and most of its token-scoped routes.
    WebhooksWid,
    /// Token-scoped message edits and deletes.
    WebhooksWidMessages,
    /// Token-scoped message reads.
    WebhooksWidMessagesMid,
    /// Message deletes issued through `delete_webhook_message`.
    WebhooksId,
    /// `/interactions/{id}/{token}/callback`.
    InteractionsIidTokenCallback,
}

impl BucketKey {
    /// Returns the stable textual form of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebhooksWid => "webhooks_wid",
            Self::WebhooksWidMessages => "webhooks_wid_messages",
            Self::WebhooksWidMessagesMid => "webhooks_wid_messages_mid",
            Self::WebhooksId => "webhooks_id",
            Self::InteractionsIidTokenCallback => "interactions_iid_token_callback",
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
