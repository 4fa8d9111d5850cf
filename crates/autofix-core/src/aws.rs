//! AWS SDK client construction from the env-file settings.
//!
//! Credentials are static (the operator's session credentials from the
//! env file); no provider chain or instance-profile lookup is involved.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use secrecy::ExposeSecret;

use autofix_config::AwsSettings;

/// Build the shared SDK config from the resolved settings.
pub async fn sdk_config(settings: &AwsSettings) -> SdkConfig {
    let credentials = Credentials::new(
        settings.access_key_id.clone(),
        settings.secret_access_key.expose_secret().to_owned(),
        settings
            .session_token
            .as_ref()
            .map(|token| token.expose_secret().to_owned()),
        None,
        "env-file",
    );

    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .credentials_provider(credentials)
        .load()
        .await
}

pub fn s3_client(config: &SdkConfig) -> aws_sdk_s3::Client {
    aws_sdk_s3::Client::new(config)
}

pub fn sqs_client(config: &SdkConfig) -> aws_sdk_sqs::Client {
    aws_sdk_sqs::Client::new(config)
}
