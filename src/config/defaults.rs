//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::webhook::ClientConfig;

/// Default API base URL.
pub const API_BASE: &str = ClientConfig::DEFAULT_API_BASE;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("DiscordBot (hookwire, ", env!("CARGO_PKG_VERSION"), ")");

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
