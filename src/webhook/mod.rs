//! Webhook resource client.
//!
//! This module provides:
//! - The client exposing one operation per endpoint ([`WebhookClient`], [`ClientConfig`])
//! - Authentication modes ([`WebhookAuth`], [`OwnerToken`], [`WebhookToken`])
//! - Request documents ([`ExecutePayload`], [`MessageEdit`], [`InteractionResponse`], ...)
//! - Webhook URL parsing ([`WebhookCredentials`])
//! - Errors tagged with the failing [`Operation`] ([`ApiError`], [`EncodingError`])

mod auth;
mod client;
mod credentials;
mod embed;
mod error;
mod payload;

#[cfg(test)]
mod client_tests;

pub use auth::{OwnerToken, WebhookAuth, WebhookToken};
pub use client::{AUDIT_LOG_REASON, ClientConfig, WebhookClient};
pub use credentials::{CredentialsError, WebhookCredentials};
pub use embed::{
    AllowedMentions, Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia, EmbedProvider,
    MentionType,
};
pub use error::{ApiError, EncodingError, Operation};
pub use payload::{
    ExecutePayload, InteractionResponse, InteractionResponseData, InteractionResponseType,
    MessageEdit, WebhookUpdate,
};
