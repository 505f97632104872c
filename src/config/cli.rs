//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::id::MessageId;

/// hookwire: webhook REST client
///
/// Reads, executes, modifies and deletes webhooks and the messages they
/// sent. Responses are printed as JSON.
#[derive(Debug, Parser)]
#[command(name = "hookwire")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL
    #[arg(long = "api-base", value_name = "URL", global = true)]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long = "user-agent", global = true)]
    pub user_agent: Option<String>,

    /// Bot token for commands using --id (include the "Bot " prefix)
    #[arg(
        long = "bot-token",
        env = "HOOKWIRE_BOT_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub bot_token: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for hookwire
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "hookwire.toml")]
        output: PathBuf,
    },

    #[command(flatten)]
    Api(ApiCommand),
}

/// Subcommands that call the remote API.
#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Show a webhook
    Get {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Post a message through a webhook
    Execute(ExecuteArgs),

    /// Rename, re-avatar or move a webhook
    Modify(ModifyArgs),

    /// Delete a webhook
    Delete {
        #[command(flatten)]
        target: TargetArgs,

        /// Audit log reason
        #[arg(long)]
        reason: Option<String>,
    },

    /// Show a message sent by a webhook
    GetMessage(MessageArgs),

    /// Edit a message sent by a webhook
    EditMessage {
        #[command(flatten)]
        message: MessageArgs,

        /// New message content (omit to clear it)
        #[arg(long)]
        content: Option<String>,

        /// Suppress all mentions in the edited content
        #[arg(long = "suppress-mentions")]
        suppress_mentions: bool,
    },

    /// Delete a message sent by a webhook
    DeleteMessage(MessageArgs),
}

/// How a command addresses a webhook: by URL (token) or by id (bot token).
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Webhook URL carrying the id and token
    #[arg(long = "webhook-url", value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Webhook id, authenticated with the bot token
    #[arg(long, value_name = "ID")]
    pub id: Option<u64>,
}

/// Arguments of the `execute` command.
#[derive(Debug, Clone, Args)]
pub struct ExecuteArgs {
    /// Webhook URL carrying the id and token
    #[arg(long = "webhook-url", value_name = "URL")]
    pub webhook_url: String,

    /// Message content
    #[arg(long)]
    pub content: Option<String>,

    /// Override the webhook's username
    #[arg(long)]
    pub username: Option<String>,

    /// Override the webhook's avatar
    #[arg(long = "avatar-url", value_name = "URL")]
    pub avatar_url: Option<String>,

    /// Send as text-to-speech
    #[arg(long)]
    pub tts: bool,

    /// File to upload with the message
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Wait for the message to be created and print it
    #[arg(long)]
    pub wait: bool,

    /// Suppress all mentions in the content
    #[arg(long = "suppress-mentions")]
    pub suppress_mentions: bool,
}

/// Arguments of the `modify` command.
#[derive(Debug, Clone, Args)]
pub struct ModifyArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// New default name
    #[arg(long)]
    pub name: Option<String>,

    /// New default avatar as a data URI
    #[arg(long, value_name = "DATA_URI")]
    pub avatar: Option<String>,

    /// Channel to move the webhook to (bot token only)
    #[arg(long = "channel-id", value_name = "ID")]
    pub channel_id: Option<u64>,

    /// Audit log reason
    #[arg(long)]
    pub reason: Option<String>,
}

/// Arguments addressing a single webhook message.
#[derive(Debug, Clone, Args)]
pub struct MessageArgs {
    /// Webhook URL carrying the id and token
    #[arg(long = "webhook-url", value_name = "URL")]
    pub webhook_url: String,

    /// Message id, or "@original" for an interaction's original response
    #[arg(long = "message-id", value_name = "ID")]
    pub message_id: MessageId,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning parse failures.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid or conflicting arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
