//! Request documents for webhook and interaction endpoints.
//!
//! Encodings differ per document:
//! - [`ExecutePayload`], [`InteractionResponseData`] and [`WebhookUpdate`]
//!   leave unset fields out of the encoded object.
//! - [`MessageEdit`] always sends `content`, `embeds` and `allowed_mentions`,
//!   with explicit `null` for unset fields. The remote API reads `null` as
//!   "clear this field".
//! - [`InteractionResponse`] sends `"data": null` when every data field is
//!   unset.

use serde::{Deserialize, Serialize};

use super::embed::{AllowedMentions, Embed};
use crate::id::Snowflake;

/// Message sent by executing a webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutePayload {
    /// Message text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Overrides the webhook's default username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Overrides the webhook's default avatar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Read the message aloud
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    /// Up to ten embeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    /// Mentions that notify
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    /// Message flags bitfield
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl ExecutePayload {
    /// Creates a payload with only `content` set.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Overrides the webhook username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Overrides the webhook avatar.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Sets text-to-speech.
    #[must_use]
    pub const fn with_tts(mut self, tts: bool) -> Self {
        self.tts = Some(tts);
        self
    }

    /// Appends an embed.
    #[must_use]
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.get_or_insert_with(Vec::new).push(embed);
        self
    }

    /// Sets which mentions notify.
    #[must_use]
    pub fn with_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    /// Sets the message flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: u64) -> Self {
        self.flags = Some(flags);
        self
    }
}

/// Edit applied to an existing webhook message.
///
/// All three keys are always encoded; `None` becomes `null` and clears the
/// field on the remote side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEdit {
    /// New message text
    pub content: Option<String>,
    /// Replacement embeds
    pub embeds: Option<Vec<Embed>>,
    /// Mentions that notify
    pub allowed_mentions: Option<AllowedMentions>,
}

impl MessageEdit {
    /// Creates an edit replacing the message content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Sets the embeds.
    #[must_use]
    pub fn with_embeds(mut self, embeds: Vec<Embed>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    /// Sets which mentions notify.
    #[must_use]
    pub fn with_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }
}

/// Interaction callback type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionResponseType(pub u8);

impl InteractionResponseType {
    /// Acknowledges a ping.
    pub const PONG: Self = Self(1);
    /// Responds with a message.
    pub const CHANNEL_MESSAGE_WITH_SOURCE: Self = Self(4);
    /// Acknowledges now, edits the original response later.
    pub const DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE: Self = Self(5);
    /// Acknowledges a component interaction without a visible response.
    pub const DEFERRED_UPDATE_MESSAGE: Self = Self(6);
    /// Edits the message a component was attached to.
    pub const UPDATE_MESSAGE: Self = Self(7);
}

/// Message data for an interaction response. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResponseData {
    /// Read the message aloud
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    /// Message text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Embeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    /// Mentions that notify
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    /// Message flags bitfield (64 makes the response ephemeral)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl InteractionResponseData {
    /// Creates data with only `content` set.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Sets text-to-speech.
    #[must_use]
    pub const fn with_tts(mut self, tts: bool) -> Self {
        self.tts = Some(tts);
        self
    }

    /// Sets the embeds.
    #[must_use]
    pub fn with_embeds(mut self, embeds: Vec<Embed>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    /// Sets which mentions notify.
    #[must_use]
    pub fn with_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    /// Sets the message flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: u64) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tts.is_none()
            && self.content.is_none()
            && self.embeds.is_none()
            && self.allowed_mentions.is_none()
            && self.flags.is_none()
    }
}

/// The `{type, data}` envelope posted to an interaction callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResponse {
    /// Callback type
    #[serde(rename = "type")]
    pub kind: InteractionResponseType,
    /// `None` encodes as `"data": null`
    pub data: Option<InteractionResponseData>,
}

impl InteractionResponse {
    /// Builds the envelope, dropping `data` entirely when it has no fields.
    #[must_use]
    pub fn new(kind: InteractionResponseType, data: InteractionResponseData) -> Self {
        Self {
            kind,
            data: (!data.is_empty()).then_some(data),
        }
    }
}

/// Convenience document for modifying a webhook. Unset fields are omitted.
///
/// The update operations accept any serializable document, so callers
/// needing explicit `null`s can pass their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookUpdate {
    /// New default name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar image as a data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Moves the webhook; owner-authenticated calls only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
}
