use thiserror::Error;

/// Top-level error type for the `autofix-api` crate.
///
/// Covers every failure mode across both API surfaces: the Spacecat
/// audit API and the Cloud Manager repository-hosting API.
/// `autofix-cli` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// SSO authorization material could not be obtained.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The hosting API rejected the captured authorization (401/403).
    #[error("Access denied by the hosting API (HTTP {status})")]
    AccessDenied { status: u16 },

    /// Captured authorization material is not a valid HTTP header value.
    #[error("Invalid authorization header: {message}")]
    InvalidHeader { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success status from either API, with the response body.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A response was missing a field the workflow requires
    /// (e.g. the `clone` command for a repository).
    #[error("Response missing expected field '{field}'")]
    MissingField { field: &'static str },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the operator lacks access to
    /// the hosting API and should request elevated permissions.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}
