//! Fix-request message construction.

use uuid::Uuid;

use crate::model::{EligibleSuggestion, FixRequestMessage, IssueDescriptor, MESSAGE_TYPE};

/// Assemble the outgoing queue message.
///
/// The audit identifier is the opportunity the selected suggestion
/// belongs to; `archive_location` is the storage URI of the uploaded
/// source archive.
pub fn build_message(
    site_id: Uuid,
    selected: &EligibleSuggestion,
    issues: Vec<IssueDescriptor>,
    archive_location: String,
    all_issues_bundled: bool,
) -> FixRequestMessage {
    FixRequestMessage {
        message_type: MESSAGE_TYPE,
        site_id,
        audit_id: selected.opportunity_id,
        archive_location,
        issues,
        all_issues_bundled,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn message_serializes_to_the_wire_contract() {
        let site_id = Uuid::new_v4();
        let opportunity_id = Uuid::new_v4();

        let selected = EligibleSuggestion {
            id: Uuid::new_v4(),
            opportunity_id,
            opportunity_type: "generic-opportunity:accessibility".into(),
            aggregation_key: "https://e.com|img-alt|main".into(),
            issue_type: "img-alt".into(),
            status: Some("NEW".into()),
            url: "https://e.com/".into(),
            faulty_line: "<img src=\"x.png\">".into(),
            target_selector: "img.hero".into(),
            issue_description: "Image missing alt text".into(),
        };

        let message = build_message(
            site_id,
            &selected,
            vec![selected.issue()],
            "s3://bucket/tmp/codefix/source/repo-20260805-101500.tar.gz".into(),
            false,
        );

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "guidance:accessibility-remediation",
                "siteId": site_id,
                "auditId": opportunity_id,
                "archiveLocation": "s3://bucket/tmp/codefix/source/repo-20260805-101500.tar.gz",
                "issues": [{
                    "selector": "img.hero",
                    "faultyFragment": "<img src=\"x.png\">",
                    "groupingKey": "https://e.com|img-alt|main",
                }],
                "allIssuesBundled": false,
            })
        );
    }
}
