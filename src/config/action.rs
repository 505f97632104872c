//! Resolution of API subcommands into validated actions.
//!
//! Webhook references are checked here, before any request is made, so a
//! malformed `--webhook-url` or a missing bot token is reported as a
//! configuration error.

use std::path::PathBuf;

use crate::id::{MessageId, Snowflake};
use crate::webhook::{
    AllowedMentions, ExecutePayload, MessageEdit, OwnerToken, WebhookCredentials, WebhookUpdate,
};

use super::cli::{ApiCommand, ExecuteArgs, MessageArgs, ModifyArgs, TargetArgs};
use super::error::{ConfigError, field};

/// A webhook addressed either by its URL credentials or by id with the bot token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookTarget {
    /// Token-authenticated: the token travels in the URL path
    Token(WebhookCredentials),
    /// Owner-authenticated: the bot token travels in `Authorization`
    Owner {
        /// Webhook id
        id: Snowflake,
        /// Bot token
        token: OwnerToken,
    },
}

impl WebhookTarget {
    /// Resolves `--webhook-url` / `--id` into a target.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL carries no credentials, or if `--id` is
    /// used without a bot token.
    pub fn resolve(args: &TargetArgs, bot_token: Option<&OwnerToken>) -> Result<Self, ConfigError> {
        if let Some(ref url) = args.webhook_url {
            return parse_webhook_url(url).map(Self::Token);
        }

        let id = args.id.ok_or_else(|| {
            ConfigError::missing(field::WEBHOOK, "Use --webhook-url or --id")
        })?;
        let token = bot_token.cloned().ok_or_else(|| {
            ConfigError::missing(
                field::BOT_TOKEN,
                "Use --bot-token, set HOOKWIRE_BOT_TOKEN, or set auth.bot_token in config file",
            )
        })?;

        Ok(Self::Owner {
            id: Snowflake::new(id),
            token,
        })
    }
}

/// A fully resolved API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Get(WebhookTarget),
    Execute {
        credentials: WebhookCredentials,
        wait: bool,
        payload: ExecutePayload,
        /// File to upload; read when the action runs
        file: Option<PathBuf>,
    },
    Modify {
        target: WebhookTarget,
        update: WebhookUpdate,
        reason: Option<String>,
    },
    Delete {
        target: WebhookTarget,
        reason: Option<String>,
    },
    GetMessage {
        credentials: WebhookCredentials,
        message_id: MessageId,
    },
    EditMessage {
        credentials: WebhookCredentials,
        message_id: MessageId,
        edit: MessageEdit,
    },
    DeleteMessage {
        credentials: WebhookCredentials,
        message_id: MessageId,
    },
}

impl Action {
    /// Resolves a parsed subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A webhook URL does not carry an id and token
    /// - `--id` is used without a bot token
    /// - `execute` has neither `--content` nor `--file`
    pub fn resolve(command: &ApiCommand, bot_token: Option<&OwnerToken>) -> Result<Self, ConfigError> {
        match command {
            ApiCommand::Get { target } => Ok(Self::Get(WebhookTarget::resolve(target, bot_token)?)),
            ApiCommand::Execute(args) => Self::execute(args),
            ApiCommand::Modify(args) => Self::modify(args, bot_token),
            ApiCommand::Delete { target, reason } => Ok(Self::Delete {
                target: WebhookTarget::resolve(target, bot_token)?,
                reason: reason.clone(),
            }),
            ApiCommand::GetMessage(args) => {
                let (credentials, message_id) = resolve_message(args)?;
                Ok(Self::GetMessage {
                    credentials,
                    message_id,
                })
            }
            ApiCommand::EditMessage {
                message,
                content,
                suppress_mentions,
            } => {
                let (credentials, message_id) = resolve_message(message)?;
                let mut edit = MessageEdit {
                    content: content.clone(),
                    ..MessageEdit::default()
                };
                if *suppress_mentions {
                    edit = edit.with_allowed_mentions(AllowedMentions::none());
                }
                Ok(Self::EditMessage {
                    credentials,
                    message_id,
                    edit,
                })
            }
            ApiCommand::DeleteMessage(args) => {
                let (credentials, message_id) = resolve_message(args)?;
                Ok(Self::DeleteMessage {
                    credentials,
                    message_id,
                })
            }
        }
    }

    fn execute(args: &ExecuteArgs) -> Result<Self, ConfigError> {
        if args.content.is_none() && args.file.is_none() {
            return Err(ConfigError::missing(
                field::CONTENT,
                "Use --content, --file, or both",
            ));
        }

        let credentials = parse_webhook_url(&args.webhook_url)?;

        let mut payload = ExecutePayload {
            content: args.content.clone(),
            username: args.username.clone(),
            avatar_url: args.avatar_url.clone(),
            ..ExecutePayload::default()
        };
        if args.tts {
            payload = payload.with_tts(true);
        }
        if args.suppress_mentions {
            payload = payload.with_allowed_mentions(AllowedMentions::none());
        }

        Ok(Self::Execute {
            credentials,
            wait: args.wait,
            payload,
            file: args.file.clone(),
        })
    }

    fn modify(args: &ModifyArgs, bot_token: Option<&OwnerToken>) -> Result<Self, ConfigError> {
        Ok(Self::Modify {
            target: WebhookTarget::resolve(&args.target, bot_token)?,
            update: WebhookUpdate {
                name: args.name.clone(),
                avatar: args.avatar.clone(),
                channel_id: args.channel_id.map(Snowflake::new),
            },
            reason: args.reason.clone(),
        })
    }
}

fn resolve_message(args: &MessageArgs) -> Result<(WebhookCredentials, MessageId), ConfigError> {
    Ok((parse_webhook_url(&args.webhook_url)?, args.message_id))
}

fn parse_webhook_url(raw: &str) -> Result<WebhookCredentials, ConfigError> {
    raw.parse().map_err(ConfigError::InvalidWebhook)
}
