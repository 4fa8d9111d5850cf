use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::prompt::PromptError;

/// Failures of the workflow steps, mapped by `autofix-cli` into
/// user-facing diagnostics with remediation hints.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup ──────────────────────────────────────────────────────
    #[error("no sites found matching '{query}'")]
    NoMatchingSites { query: String },

    #[error("no accessibility opportunities found for this site")]
    NoOpportunities,

    #[error("no suggestions with an aggregation key found")]
    NoSuggestions,

    #[error("suggestion {id} not found among eligible suggestions")]
    SuggestionNotFound { id: Uuid },

    #[error("no repositories found for program {program_id}")]
    NoRepositories { program_id: String },

    // ── Local filesystem ────────────────────────────────────────────
    #[error("repository path {} {reason}", path.display())]
    RepoPath { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // ── Remote services ─────────────────────────────────────────────
    #[error(transparent)]
    Api(#[from] autofix_api::Error),

    #[error("upload failed: {message}")]
    Upload { message: String },

    #[error("queue publish failed: {message}")]
    Publish { message: String },

    // ── Interaction ─────────────────────────────────────────────────
    #[error(transparent)]
    Prompt(#[from] PromptError),
}
