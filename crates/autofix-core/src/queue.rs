//! Queue publish: hands the fix-request message to the remediation
//! worker's queue.

use aws_sdk_sqs::error::DisplayErrorContext;
use tracing::debug;

use crate::error::CoreError;
use crate::model::FixRequestMessage;

/// Publish the message and return the queue-assigned message id.
///
/// No retry: a failed publish is fatal to the run.
pub async fn publish_fix_request(
    client: &aws_sdk_sqs::Client,
    queue_url: &str,
    message: &FixRequestMessage,
) -> Result<String, CoreError> {
    let body = serde_json::to_string(message).map_err(|e| CoreError::Publish {
        message: format!("serializing message: {e}"),
    })?;

    debug!(queue_url, "publishing fix request");

    let output = client
        .send_message()
        .queue_url(queue_url)
        .message_body(body)
        .send()
        .await
        .map_err(|e| CoreError::Publish {
            message: DisplayErrorContext(&e).to_string(),
        })?;

    output.message_id().map(ToOwned::to_owned).ok_or_else(|| {
        CoreError::Publish {
            message: "queue accepted the message but returned no id".into(),
        }
    })
}
