//! Clap derive structures for both operator binaries.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser};
use uuid::Uuid;

// ── Shared options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the env-style configuration file
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// ── a11y-autofix ─────────────────────────────────────────────────────

/// Send an accessibility fix request to the remediation worker.
#[derive(Debug, Parser)]
#[command(
    name = "a11y-autofix",
    version,
    about = "Find an accessibility suggestion, upload the site source, and enqueue a fix request",
    long_about = "Finds a customer site in the audit service, walks its accessibility\n\
        opportunities and suggestions, archives the local copy of the site's\n\
        source repository, uploads it to object storage, and publishes a\n\
        remediation request to the code-fix worker's queue.",
    group(ArgGroup::new("site").required(true).multiple(false))
)]
pub struct FixCli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Partial site name to search for (e.g. 'sunstargum')
    #[arg(long, group = "site")]
    pub name: Option<String>,

    /// Direct site id (bypasses the name search)
    #[arg(long, group = "site")]
    pub site_id: Option<Uuid>,

    /// Direct opportunity id (bypasses the opportunity lookup)
    #[arg(long)]
    pub opportunity_id: Option<Uuid>,

    /// Direct suggestion id (bypasses the suggestion selection)
    #[arg(long, requires = "opportunity_id")]
    pub suggestion_id: Option<Uuid>,

    /// Bundle every issue sharing the selected suggestion's grouping key
    #[arg(long)]
    pub send_all_issues: bool,
}

// ── repo-clone ───────────────────────────────────────────────────────

/// Clone a customer repository from the hosting service via SSO.
#[derive(Debug, Parser)]
#[command(
    name = "repo-clone",
    version,
    about = "Authenticate via browser SSO and clone a customer repository",
    long_about = "Opens a browser for SSO against the repository-hosting service,\n\
        captures the resulting authorization, lists the program's\n\
        repositories, and clones the selected one into the configured\n\
        central directory."
)]
pub struct CloneCli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Program id (overrides PROGRAM_ID from the env file)
    #[arg(long)]
    pub program_id: Option<String>,
}
