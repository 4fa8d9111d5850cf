//! Object-storage naming scheme and archive upload.
//!
//! Uploads land under `tmp/codefix/source/`; the downstream worker
//! writes its reports under `tmp/codefix/results/` (read-only from this
//! system's perspective).

use std::path::Path;

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::CoreError;

const SOURCE_PREFIX: &str = "tmp/codefix/source";
const RESULTS_PREFIX: &str = "tmp/codefix/results";

/// Archive object name: `<repo>-<yyyymmdd-hhmmss>.tar.gz`.
pub fn archive_object_name(repo_name: &str, at: DateTime<Utc>) -> String {
    format!("{repo_name}-{}.tar.gz", at.format("%Y%m%d-%H%M%S"))
}

/// Upload key for an archive object name.
pub fn source_key(object_name: &str) -> String {
    format!("{SOURCE_PREFIX}/{object_name}")
}

/// Where the downstream worker will place its report for a remediation.
pub fn results_key(opportunity_id: &Uuid, grouping_key: &str) -> String {
    format!("{RESULTS_PREFIX}/{opportunity_id}/{grouping_key}/report.json")
}

/// Storage URI for a bucket/key pair.
pub fn s3_uri(bucket: &str, key: &str) -> String {
    format!("s3://{bucket}/{key}")
}

/// Upload the archive to the bucket under `key`.
///
/// Failures (expired credentials included) abort the run before any
/// message is published; the caller prints the remediation hint.
pub async fn upload_archive(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    archive_path: &Path,
) -> Result<(), CoreError> {
    debug!(bucket, key, "uploading archive");

    let body = ByteStream::from_path(archive_path)
        .await
        .map_err(|e| CoreError::Upload {
            message: e.to_string(),
        })?;

    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(body)
        .send()
        .await
        .map_err(|e| CoreError::Upload {
            message: DisplayErrorContext(&e).to_string(),
        })?;

    Ok(())
}
