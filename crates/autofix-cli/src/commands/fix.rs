//! The fix-request workflow: resolve site → opportunities → suggestions
//! → selection → archive → upload → message → confirm → publish.
//!
//! Strictly sequential; every remote call blocks before the next step.
//! A declined confirmation is a normal exit, not an error.

use bytesize::ByteSize;
use chrono::Utc;
use uuid::Uuid;

use autofix_api::SpacecatClient;
use autofix_api::spacecat::{Opportunity, Site};
use autofix_api::transport::TransportConfig;
use autofix_config::{FixRequestConfig, Settings};
use autofix_core::prompt::Prompter;
use autofix_core::{archive, aws, message, queue, sites, storage, suggest};
use autofix_core::{EligibleSuggestion, FixRequestMessage};

use crate::cli::FixCli;
use crate::console;
use crate::error::CliError;
use crate::prompt::TermPrompter;

pub async fn run(cli: FixCli) -> Result<(), CliError> {
    console::section("A11y Autofix Requestor");

    let settings = Settings::load(&cli.global.env_file)?;
    let config = FixRequestConfig::from_settings(&settings)?;
    console::success(&format!(
        "Loaded configuration from {}",
        cli.global.env_file.display()
    ));
    console::info(&format!("API base: {}", config.api_base));
    console::info(&format!("S3 bucket: {}", config.s3_bucket));
    console::info(&format!("Repo path: {}", config.repo_path.display()));

    let client = SpacecatClient::new(
        config.api_base.clone(),
        &config.api_key,
        &config.ims_org_id,
        &TransportConfig::default(),
    )?;
    let prompter = TermPrompter;

    let site_id = resolve_site(&client, &cli, &prompter).await?;
    let (eligible, selected) = resolve_suggestion(&client, &cli, site_id, &prompter).await?;
    console::success(&format!(
        "Selected: {} ({})",
        selected.issue_type, selected.id
    ));

    let (archive_location, sdk) = archive_and_upload(&config).await?;

    console::section("Step 6: Review message");
    let issues = suggest::bundle_issues(&selected, &eligible, cli.send_all_issues);
    if cli.send_all_issues {
        console::info(&format!(
            "Bundling {} issues sharing aggregation key {}",
            issues.len(),
            selected.aggregation_key
        ));
    }
    let msg = message::build_message(
        site_id,
        &selected,
        issues,
        archive_location,
        cli.send_all_issues,
    );
    println!("{}", serde_json::to_string_pretty(&msg)?);

    if !prompter.confirm("Send this message?")? {
        console::warn("Cancelled by operator; nothing was published");
        return Ok(());
    }

    publish(&config, &sdk, &msg, &selected).await
}

// ── Step 1: site resolution ──────────────────────────────────────────

async fn resolve_site(
    client: &SpacecatClient,
    cli: &FixCli,
    prompter: &dyn Prompter,
) -> Result<Uuid, CliError> {
    console::section("Step 1: Finding site");

    if let Some(site_id) = cli.site_id {
        console::info(&format!("Using provided site id: {site_id}"));
        return Ok(site_id);
    }

    // The clap group guarantees --name when --site-id is absent.
    let query = cli.name.as_deref().unwrap_or_default();

    let bar = console::spinner("Fetching sites…");
    let listing = client.list_sites().await;
    bar.finish_and_clear();
    let listing = listing?;
    console::success(&format!("Found {} sites", listing.len()));

    let matches: Vec<&Site> = sites::match_sites(&listing, query);
    if matches.len() > 1 {
        console::info(&format!("Found {} matching sites", matches.len()));
    }
    let site = sites::select_site(&matches, query, prompter)?;
    console::success(&format!("Found site: {}", site.label()));
    console::info(&format!("Site id: {}", site.id));
    Ok(site.id)
}

// ── Steps 2-4: opportunities and suggestions ─────────────────────────

async fn resolve_suggestion(
    client: &SpacecatClient,
    cli: &FixCli,
    site_id: Uuid,
    prompter: &dyn Prompter,
) -> Result<(Vec<EligibleSuggestion>, EligibleSuggestion), CliError> {
    let eligible = if let Some(opportunity_id) = cli.opportunity_id {
        console::section("Step 2: Using provided opportunity");
        console::info(&format!("Opportunity id: {opportunity_id}"));

        let opportunity = Opportunity {
            id: opportunity_id,
            opportunity_type: "accessibility".into(),
            status: None,
        };
        let suggestions = client.list_suggestions(&site_id, &opportunity_id).await?;
        suggest::eligible_suggestions(&suggestions, &opportunity)
    } else {
        console::section("Step 2: Finding opportunities");
        let bar = console::spinner("Fetching opportunities…");
        let opportunities = client.list_opportunities(&site_id).await;
        bar.finish_and_clear();

        let a11y: Vec<Opportunity> = opportunities?
            .into_iter()
            .filter(Opportunity::is_accessibility)
            .collect();
        if a11y.is_empty() {
            return Err(CliError::NoOpportunities);
        }
        console::success(&format!(
            "Found {} accessibility opportunities",
            a11y.len()
        ));

        console::section("Step 3: Finding suggestions");
        let mut eligible = Vec::new();
        for opportunity in &a11y {
            let suggestions = client.list_suggestions(&site_id, &opportunity.id).await?;
            eligible.extend(suggest::eligible_suggestions(&suggestions, opportunity));
        }
        eligible
    };

    if eligible.is_empty() {
        return Err(CliError::NoSuggestions);
    }
    console::success(&format!("Found {} valid suggestions", eligible.len()));

    if cli.suggestion_id.is_none() && eligible.len() > 1 {
        console::section("Step 4: Select suggestion");
        eprintln!("{}", console::suggestion_table(&eligible));
    }
    let selected = suggest::select_suggestion(&eligible, cli.suggestion_id, prompter)?.clone();
    Ok((eligible, selected))
}

// ── Step 5: archive and upload ───────────────────────────────────────

async fn archive_and_upload(
    config: &FixRequestConfig,
) -> Result<(String, aws_config::SdkConfig), CliError> {
    console::section("Step 5: Preparing code archive");

    let repo_name = archive::repo_name(&config.repo_path)?;
    // Staging dir is removed on drop, whether or not the upload lands.
    let staging = tempfile::tempdir()?;
    let dest = staging.path().join(format!("{repo_name}.tar.gz"));

    console::info(&format!(
        "Creating tar.gz archive from {}…",
        config.repo_path.display()
    ));
    let packed = archive::pack_repository(&config.repo_path, &dest)?;
    console::success(&format!(
        "Created archive: {} ({})",
        packed.path.display(),
        ByteSize(packed.size_bytes)
    ));

    let key = storage::source_key(&storage::archive_object_name(&repo_name, Utc::now()));
    let uri = storage::s3_uri(&config.s3_bucket, &key);

    let sdk = aws::sdk_config(&config.aws).await;
    let s3 = aws::s3_client(&sdk);

    let bar = console::spinner(&format!("Uploading to {uri}…"));
    let outcome = storage::upload_archive(&s3, &config.s3_bucket, &key, &packed.path).await;
    bar.finish_and_clear();
    outcome?;
    console::success("Upload complete");

    Ok((uri, sdk))
}

// ── Step 7: publish ──────────────────────────────────────────────────

async fn publish(
    config: &FixRequestConfig,
    sdk: &aws_config::SdkConfig,
    msg: &FixRequestMessage,
    selected: &EligibleSuggestion,
) -> Result<(), CliError> {
    console::section("Step 7: Sending message");

    let sqs = aws::sqs_client(sdk);
    let message_id = queue::publish_fix_request(&sqs, &config.queue_url, msg).await?;

    console::success("Message sent");
    console::info(&format!("Message id: {message_id}"));
    console::info(&format!("Opportunity id: {}", selected.opportunity_id));
    console::info(&format!("Archive: {}", msg.archive_location));

    console::section("Next steps");
    console::info("Monitor the remediation worker logs for the opportunity id");
    console::info(&format!(
        "Expect the report at s3://{}/{}",
        config.s3_bucket,
        storage::results_key(&selected.opportunity_id, &selected.aggregation_key)
    ));
    Ok(())
}
