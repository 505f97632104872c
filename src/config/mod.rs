//! Configuration for the hookwire binary.
//!
//! Settings come from three layers; the first one that sets a value wins:
//!
//! 1. Command-line flags (`--bot-token` can also be read from `HOOKWIRE_BOT_TOKEN`)
//! 2. The TOML file given with `--config` ([`TomlConfig`])
//! 3. Built-in [`defaults`]
//!
//! [`ValidatedConfig`] holds the merged settings. Subcommands are turned
//! into an [`Action`] separately, once the bot token is known.
//!
//! # Webhook references
//!
//! Commands address a webhook either with `--webhook-url` (the id and token
//! are taken from the URL) or with `--id`, which authenticates with the bot
//! token. Message commands only accept `--webhook-url`.

mod action;
mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use action::{Action, WebhookTarget};
pub use cli::{ApiCommand, Cli, Command, ExecuteArgs, MessageArgs, ModifyArgs, TargetArgs};
pub use error::{ConfigError, field};
pub use toml::{ApiSection, AuthSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
