//! Domain types for the fix-request workflow.
//!
//! Wire suggestions from the audit API are analyzed into
//! [`EligibleSuggestion`] values; only those carrying a non-empty
//! aggregation (grouping) key qualify. The outgoing
//! [`FixRequestMessage`] is the queue contract consumed by the
//! downstream remediation worker.

use serde::Serialize;
use uuid::Uuid;

use autofix_api::spacecat::{Opportunity, Suggestion};

use crate::suggest::issue_type_from_key;

/// Message type tag identifying the remediation message kind.
pub const MESSAGE_TYPE: &str = "guidance:accessibility-remediation";

/// A suggestion that passed the eligibility invariant, flattened with
/// the opportunity it belongs to.
#[derive(Debug, Clone)]
pub struct EligibleSuggestion {
    pub id: Uuid,
    pub opportunity_id: Uuid,
    pub opportunity_type: String,
    pub aggregation_key: String,
    pub issue_type: String,
    pub status: Option<String>,
    pub url: String,
    pub faulty_line: String,
    pub target_selector: String,
    pub issue_description: String,
}

impl EligibleSuggestion {
    /// Analyze a wire suggestion; `None` when the aggregation key is
    /// absent or empty (the suggestion is not eligible for remediation).
    pub fn from_wire(suggestion: &Suggestion, opportunity: &Opportunity) -> Option<Self> {
        let aggregation_key = suggestion
            .data
            .aggregation_key
            .as_deref()
            .filter(|key| !key.is_empty())?
            .to_owned();

        Some(Self {
            id: suggestion.id,
            opportunity_id: opportunity.id,
            opportunity_type: opportunity.opportunity_type.clone(),
            issue_type: issue_type_from_key(&aggregation_key).to_owned(),
            status: suggestion.status.clone(),
            url: suggestion.data.url.clone().unwrap_or_default(),
            faulty_line: suggestion.data.faulty_line.clone().unwrap_or_default(),
            target_selector: suggestion.data.target_selector.clone().unwrap_or_default(),
            issue_description: suggestion.data.issue_description.clone().unwrap_or_default(),
            aggregation_key,
        })
    }

    /// The issue descriptor carried on the wire for this suggestion.
    pub fn issue(&self) -> IssueDescriptor {
        IssueDescriptor {
            selector: self.target_selector.clone(),
            faulty_fragment: self.faulty_line.clone(),
            grouping_key: self.aggregation_key.clone(),
        }
    }
}

/// One issue to remediate: where it is, what is wrong, and the grouping
/// key tying co-fixable issues together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDescriptor {
    pub selector: String,
    pub faulty_fragment: String,
    pub grouping_key: String,
}

/// The queue message requesting a remediation pass.
///
/// Immutable once built; displayed verbatim to the operator before
/// publish. `audit_id` carries the opportunity identifier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixRequestMessage {
    #[serde(rename = "type")]
    pub message_type: &'static str,
    pub site_id: Uuid,
    pub audit_id: Uuid,
    pub archive_location: String,
    pub issues: Vec<IssueDescriptor>,
    pub all_issues_bundled: bool,
}
