//! The repository-clone workflow: browser SSO → repository listing →
//! selection → clone command → clone.
//!
//! Linear, no branching back. A 401/403 at any API step is fatal with
//! an access-request hint; the clone itself runs bounded.

use std::path::Path;
use std::time::Duration;

use url::Url;

use autofix_api::hosting::client::DEFAULT_API_BASE;
use autofix_api::transport::TransportConfig;
use autofix_api::{AuthorizationSource, HostingClient};
use autofix_config::{CloneConfig, Settings};
use autofix_core::repos;

use crate::cli::CloneCli;
use crate::console;
use crate::error::CliError;
use crate::prompt::TermPrompter;
use crate::sso::BrowserSsoCapture;

/// Bounded wait for the operator to finish SSO in the browser.
const SSO_TIMEOUT: Duration = Duration::from_secs(300);

/// Bounded wait for the clone subprocess.
const CLONE_TIMEOUT: Duration = Duration::from_secs(300);

pub async fn run(cli: CloneCli) -> Result<(), CliError> {
    console::section("Customer Repository Clone");

    let settings = Settings::load(&cli.global.env_file)?;
    let config = CloneConfig::from_settings(&settings)?;

    let program_id = cli
        .program_id
        .or(config.program_id)
        .ok_or_else(|| CliError::Validation {
            field: "program-id".into(),
            reason: "pass --program-id or set PROGRAM_ID in the env file".into(),
        })?;
    console::info(&format!("Using program id: {program_id}"));

    if !config.central_repo_dir.is_dir() {
        console::info(&format!(
            "Creating central repo directory {}",
            config.central_repo_dir.display()
        ));
        std::fs::create_dir_all(&config.central_repo_dir)?;
    }

    console::section("Step 1: Browser authentication");
    console::info("Opening browser for SSO authentication…");
    console::info("Complete the login in the browser window.");

    let hosting_base: Url = DEFAULT_API_BASE
        .parse()
        .map_err(|e| CliError::Validation {
            field: "hosting API base".into(),
            reason: format!("{e}"),
        })?;
    let sso = BrowserSsoCapture::new(&hosting_base, SSO_TIMEOUT).map_err(CliError::from)?;
    let headers = sso.authorization_headers().await?;
    console::success("Captured authentication headers");

    console::section("Step 2: Fetching repositories");
    let client = HostingClient::with_headers(hosting_base, headers, &TransportConfig::default())?;
    let bar = console::spinner("Fetching repositories…");
    let repositories = client.list_repositories(&program_id).await;
    bar.finish_and_clear();
    let repositories = repositories?;
    console::success(&format!(
        "Total repositories found: {}",
        repositories.len()
    ));

    console::section("Step 3: Selecting repository");
    let selected = repos::select_repository(&repositories, &program_id, &TermPrompter)?;
    console::success(&format!("Selected repository: {}", selected.repo));
    console::info(&format!("Repository id: {}", selected.id));
    if let Some(repository_url) = &selected.repository_url {
        console::info(&format!("Repository URL: {repository_url}"));
    }

    console::section("Step 4: Getting clone command");
    let command = client.clone_command(&program_id, &selected.id).await?;
    console::success("Clone command retrieved");

    console::section("Step 5: Cloning repository");
    clone_repository(&command, &config.central_repo_dir).await?;

    console::section("Complete");
    console::success(&format!(
        "Repository '{}' cloned to {}",
        selected.repo,
        config.central_repo_dir.display()
    ));
    console::info("Copy the checkout path into REPO_PATH before running a11y-autofix.");
    Ok(())
}

/// Run the clone command the hosting service handed us, bounded.
async fn clone_repository(command: &str, target_dir: &Path) -> Result<(), CliError> {
    let words = shell_words::split(command).map_err(|e| CliError::CloneFailed {
        detail: format!("unparseable clone command: {e}"),
    })?;
    let [program, args @ ..] = words.as_slice() else {
        return Err(CliError::CloneFailed {
            detail: "empty clone command".into(),
        });
    };

    console::info(&format!("Target directory: {}", target_dir.display()));
    console::info(&format!("Command: {command}"));

    let output = tokio::time::timeout(
        CLONE_TIMEOUT,
        tokio::process::Command::new(program)
            .args(args)
            .current_dir(target_dir)
            .output(),
    )
    .await
    .map_err(|_| CliError::CloneFailed {
        detail: format!("clone timed out after {}s", CLONE_TIMEOUT.as_secs()),
    })??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CliError::CloneFailed {
            detail: format!(
                "exit code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            ),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        eprintln!("{}", stdout.trim());
    }
    console::success("Repository cloned successfully");
    Ok(())
}
