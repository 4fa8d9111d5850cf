//! Shared plumbing for the two operator binaries (`a11y-autofix` and
//! `repo-clone`): argument definitions, command handlers, console
//! output, prompts, and error-to-exit-code mapping.

pub mod cli;
pub mod commands;
pub mod console;
pub mod error;
pub mod prompt;
pub mod sso;

use tracing_subscriber::EnvFilter;

/// Setup tracing based on `-v` count.
pub fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}
