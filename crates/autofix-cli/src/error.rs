//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` / api errors into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use autofix_config::ConfigError;
use autofix_core::{CoreError, PromptError};

/// Exit codes. 0 also covers an operator-declined confirmation, which
/// is a normal termination, not a failure.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(autofix::config),
        help("Check the env file passed via --env-file (default ./.env).")
    )]
    Config(#[from] ConfigError),

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(autofix::validation))]
    Validation { field: String, reason: String },

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("No sites found matching '{query}'")]
    #[diagnostic(
        code(autofix::no_sites),
        help("Try a shorter fragment of the site's URL, or pass --site-id directly.")
    )]
    NoSitesFound { query: String },

    #[error("No accessibility opportunities found for this site")]
    #[diagnostic(
        code(autofix::no_opportunities),
        help("The site may not have an accessibility audit yet; pass --opportunity-id to skip the lookup.")
    )]
    NoOpportunities,

    #[error("No suggestions with an aggregation key found")]
    #[diagnostic(
        code(autofix::no_suggestions),
        help("Only suggestions carrying an aggregation key can be remediated; re-run the audit or pick another opportunity.")
    )]
    NoSuggestions,

    #[error("Suggestion {id} not found among eligible suggestions")]
    #[diagnostic(
        code(autofix::suggestion_not_found),
        help("Run without --suggestion-id to list the eligible suggestions.")
    )]
    SuggestionNotFound { id: uuid::Uuid },

    #[error("No repositories found for program {program_id}")]
    #[diagnostic(code(autofix::no_repositories))]
    NoRepositories { program_id: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Access denied by the hosting API (HTTP {status})")]
    #[diagnostic(
        code(autofix::access_denied),
        help(
            "Your account lacks the Cloud Manager SRE role for this program.\n\
             Request it via the internal access channel:\n\
             https://adobe.enterprise.slack.com/archives/C0648EGB1FY"
        )
    )]
    AccessDenied { status: u16 },

    #[error("SSO authentication failed: {message}")]
    #[diagnostic(
        code(autofix::sso),
        help("Complete the login in the opened browser window, then retry.")
    )]
    SsoFailed { message: String },

    // ── Infrastructure ───────────────────────────────────────────────
    #[error("Archive upload failed: {message}")]
    #[diagnostic(
        code(autofix::upload),
        help(
            "Storage credentials may have expired.\n\
             Refresh SPACECAT_AWS_ACCESS_KEY_ID / SECRET / SESSION_TOKEN in the env file and retry."
        )
    )]
    Upload { message: String },

    #[error("Queue publish failed: {message}")]
    #[diagnostic(
        code(autofix::publish),
        help("Check SQS_SPACECAT_TO_MYSTIQUE_QUEUE_URL and your credentials, then retry.")
    )]
    Publish { message: String },

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(autofix::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected API failure: {message}")]
    #[diagnostic(code(autofix::api_unexpected))]
    Unexpected { message: String },

    #[error("Could not reach the remote service")]
    #[diagnostic(
        code(autofix::connection_failed),
        help("Check your network connection and the configured API base URL.")
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Local ────────────────────────────────────────────────────────
    #[error("Repository path {} {reason}", path.display())]
    #[diagnostic(
        code(autofix::repo_path),
        help("Point REPO_PATH at the local checkout produced by repo-clone.")
    )]
    RepoPath { path: std::path::PathBuf, reason: String },

    #[error("Clone failed: {detail}")]
    #[diagnostic(
        code(autofix::clone_failed),
        help(
            "If the failure was a 401/403, request the Cloud Manager SRE role via\n\
             https://adobe.enterprise.slack.com/archives/C0648EGB1FY"
        )
    )]
    CloneFailed { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(autofix::json))]
    Json(#[from] serde_json::Error),

    // ── Interaction ──────────────────────────────────────────────────
    #[error(transparent)]
    Prompt(PromptError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => exit_code::USAGE,
            Self::AccessDenied { .. } | Self::SsoFailed { .. } => exit_code::AUTH,
            Self::NoSitesFound { .. }
            | Self::NoOpportunities
            | Self::NoSuggestions
            | Self::SuggestionNotFound { .. }
            | Self::NoRepositories { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoMatchingSites { query } => Self::NoSitesFound { query },
            CoreError::NoOpportunities => Self::NoOpportunities,
            CoreError::NoSuggestions => Self::NoSuggestions,
            CoreError::SuggestionNotFound { id } => Self::SuggestionNotFound { id },
            CoreError::NoRepositories { program_id } => Self::NoRepositories { program_id },
            CoreError::RepoPath { path, reason } => Self::RepoPath { path, reason },
            CoreError::Io(e) => Self::Io(e),
            CoreError::Api(e) => e.into(),
            CoreError::Upload { message } => Self::Upload { message },
            CoreError::Publish { message } => Self::Publish { message },
            CoreError::Prompt(e) => Self::Prompt(e),
        }
    }
}

// ── api::Error → CliError mapping ────────────────────────────────────

impl From<autofix_api::Error> for CliError {
    fn from(err: autofix_api::Error) -> Self {
        match err {
            autofix_api::Error::AccessDenied { status } => Self::AccessDenied { status },
            autofix_api::Error::Authentication { message } => Self::SsoFailed { message },
            autofix_api::Error::Transport(e) => {
                if let Some(status) = e.status() {
                    Self::ApiError {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    Self::ConnectionFailed { source: e.into() }
                }
            }
            autofix_api::Error::Api { status, message } => Self::ApiError { status, message },
            other => Self::Unexpected {
                message: other.to_string(),
            },
        }
    }
}

impl From<PromptError> for CliError {
    fn from(err: PromptError) -> Self {
        Self::Prompt(err)
    }
}
