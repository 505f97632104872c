//! Process-level glue for the binary: exit codes, log setup and
//! configuration hints printed to stderr.

use hookwire::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Process exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// The command completed.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Bad arguments, unreadable config file or an invalid webhook reference.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// The request failed: transport error, timeout or a non-2xx answer.
    ///
    /// A function because `ExitCode::from` is not `const`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints a follow-up hint for configuration errors the user can fix directly.
pub fn print_config_hint(error: &ConfigError) {
    let hint = match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::BOT_TOKEN => {
            "Use --webhook-url to authenticate with the webhook token instead."
        }
        ConfigError::FileRead { .. } => "Run 'hookwire init' to generate a configuration template.",
        _ => return,
    };
    eprintln!("\n{hint}");
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the level chosen by `verbose`. Logs are written to
/// stderr so stdout only carries the API response.
pub fn setup_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
