//! Env-file configuration for the autofix operator tools.
//!
//! Both workflows read the same `KEY=VALUE` file (environment-file
//! convention). The raw [`Settings`] are merged from defaults, the
//! process environment, and the file (file wins), then narrowed into
//! the immutable per-workflow configs with fail-fast validation of the
//! required keys. Neither step mutates the process environment, so test
//! runs stay isolated and parallel-safe.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("missing required configuration: {}", keys.join(", "))]
    MissingKeys { keys: Vec<&'static str> },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Raw settings ────────────────────────────────────────────────────

/// Env keys recognized from the process environment. Field names below
/// are the lowercased versions of these keys.
const ENV_KEYS: &[&str] = &[
    "spacecat_api_base",
    "spacecat_api_key",
    "spacecat_ims_org_id",
    "aws_region",
    "spacecat_aws_access_key_id",
    "spacecat_aws_secret_access_key",
    "spacecat_aws_session_token",
    "aws_access_key_id",
    "aws_secret_access_key",
    "aws_session_token",
    "s3_bucket_name",
    "sqs_spacecat_to_mystique_queue_url",
    "repo_path",
    "program_id",
    "central_repo_dir",
];

/// Raw key/value settings as read from the env file and environment.
///
/// Optional keys with documented defaults are pre-filled; everything
/// else stays `None` until validated by the per-workflow constructors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_api_base")]
    pub spacecat_api_base: String,

    pub spacecat_api_key: Option<String>,
    pub spacecat_ims_org_id: Option<String>,

    #[serde(default = "default_region")]
    pub aws_region: String,

    pub spacecat_aws_access_key_id: Option<String>,
    pub spacecat_aws_secret_access_key: Option<String>,
    pub spacecat_aws_session_token: Option<String>,

    // Plain AWS_* fallbacks, used when the SPACECAT_AWS_* keys are absent.
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,

    #[serde(default = "default_bucket")]
    pub s3_bucket_name: String,

    pub sqs_spacecat_to_mystique_queue_url: Option<String>,

    pub repo_path: Option<PathBuf>,

    pub program_id: Option<String>,
    pub central_repo_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spacecat_api_base: default_api_base(),
            spacecat_api_key: None,
            spacecat_ims_org_id: None,
            aws_region: default_region(),
            spacecat_aws_access_key_id: None,
            spacecat_aws_secret_access_key: None,
            spacecat_aws_session_token: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_session_token: None,
            s3_bucket_name: default_bucket(),
            sqs_spacecat_to_mystique_queue_url: None,
            repo_path: None,
            program_id: None,
            central_repo_dir: None,
        }
    }
}

fn default_api_base() -> String {
    "https://spacecat.experiencecloud.live/api/ci".into()
}
fn default_region() -> String {
    "us-east-1".into()
}
fn default_bucket() -> String {
    "spacecat-dev-mystique-assets".into()
}

impl Settings {
    /// Load settings from an env file, merged over the process
    /// environment and the documented defaults (file wins).
    ///
    /// A missing or malformed file is a fatal startup error; the file is
    /// parsed without touching the process environment.
    pub fn load(env_file: &Path) -> Result<Self, ConfigError> {
        let mut file_vars: BTreeMap<String, String> = BTreeMap::new();
        let entries = dotenvy::from_path_iter(env_file).map_err(|source| ConfigError::EnvFile {
            path: env_file.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let (key, value) = entry.map_err(|source| ConfigError::EnvFile {
                path: env_file.to_path_buf(),
                source,
            })?;
            file_vars.insert(key.to_lowercase(), value);
        }

        let settings = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::raw().only(ENV_KEYS))
            .merge(Serialized::defaults(file_vars))
            .extract()?;
        Ok(settings)
    }
}

// ── Presence helpers ────────────────────────────────────────────────

// Empty values count as absent: `KEY=` in the file must fail the same
// presence validation as a missing key.

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

fn present_path(value: Option<&Path>) -> Option<PathBuf> {
    value
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

// ── AWS credentials ─────────────────────────────────────────────────

/// Static AWS credentials resolved from the settings.
///
/// `SPACECAT_AWS_*` keys take precedence over the plain `AWS_*` ones;
/// the session token is optional and forwarded when present.
#[derive(Debug, Clone)]
pub struct AwsSettings {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub session_token: Option<SecretString>,
}

impl AwsSettings {
    fn resolve(settings: &Settings, missing: &mut Vec<&'static str>) -> Option<Self> {
        let access_key_id = present(settings.spacecat_aws_access_key_id.as_deref())
            .or_else(|| present(settings.aws_access_key_id.as_deref()));
        let secret_access_key = present(settings.spacecat_aws_secret_access_key.as_deref())
            .or_else(|| present(settings.aws_secret_access_key.as_deref()));
        let session_token = present(settings.spacecat_aws_session_token.as_deref())
            .or_else(|| present(settings.aws_session_token.as_deref()));

        if access_key_id.is_none() {
            missing.push("SPACECAT_AWS_ACCESS_KEY_ID");
        }
        if secret_access_key.is_none() {
            missing.push("SPACECAT_AWS_SECRET_ACCESS_KEY");
        }

        Some(Self {
            region: settings.aws_region.clone(),
            access_key_id: access_key_id?,
            secret_access_key: SecretString::from(secret_access_key?),
            session_token: session_token.map(SecretString::from),
        })
    }
}

// ── Fix-request workflow config ─────────────────────────────────────

/// Immutable configuration for the fix-request workflow.
#[derive(Debug, Clone)]
pub struct FixRequestConfig {
    pub api_base: Url,
    pub api_key: SecretString,
    pub ims_org_id: String,
    pub aws: AwsSettings,
    pub s3_bucket: String,
    pub queue_url: String,
    pub repo_path: PathBuf,
}

impl FixRequestConfig {
    /// Validate and narrow raw settings, reporting every missing
    /// required key at once.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let api_key = present(settings.spacecat_api_key.as_deref());
        if api_key.is_none() {
            missing.push("SPACECAT_API_KEY");
        }
        let ims_org_id = present(settings.spacecat_ims_org_id.as_deref());
        if ims_org_id.is_none() {
            missing.push("SPACECAT_IMS_ORG_ID");
        }
        let aws = AwsSettings::resolve(settings, &mut missing);
        let queue_url = present(settings.sqs_spacecat_to_mystique_queue_url.as_deref());
        if queue_url.is_none() {
            missing.push("SQS_SPACECAT_TO_MYSTIQUE_QUEUE_URL");
        }
        let repo_path = present_path(settings.repo_path.as_deref());
        if repo_path.is_none() {
            missing.push("REPO_PATH");
        }

        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys { keys: missing });
        }

        let api_base: Url =
            settings
                .spacecat_api_base
                .parse()
                .map_err(|_| ConfigError::Validation {
                    field: "SPACECAT_API_BASE".into(),
                    reason: format!("invalid URL: {}", settings.spacecat_api_base),
                })?;

        // Unreachable else: the missing-key check above covers every option.
        let (Some(api_key), Some(ims_org_id), Some(aws), Some(queue_url), Some(repo_path)) =
            (api_key, ims_org_id, aws, queue_url, repo_path)
        else {
            return Err(ConfigError::MissingKeys { keys: missing });
        };

        Ok(Self {
            api_base,
            api_key: SecretString::from(api_key),
            ims_org_id,
            aws,
            s3_bucket: settings.s3_bucket_name.clone(),
            queue_url,
            repo_path,
        })
    }
}

// ── Clone workflow config ───────────────────────────────────────────

/// Immutable configuration for the repository-clone workflow.
///
/// `program_id` stays optional here; the CLI flag overrides it and the
/// workflow fails fast when neither is present.
#[derive(Debug, Clone)]
pub struct CloneConfig {
    pub program_id: Option<String>,
    pub central_repo_dir: PathBuf,
}

impl CloneConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let Some(central_repo_dir) = present_path(settings.central_repo_dir.as_deref()) else {
            return Err(ConfigError::MissingKeys {
                keys: vec!["CENTRAL_REPO_DIR"],
            });
        };

        Ok(Self {
            program_id: present(settings.program_id.as_deref()),
            central_repo_dir,
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────
