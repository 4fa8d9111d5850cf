// Wire models for the Spacecat audit API.
//
// Fields are camelCase on the wire; suggestion data additionally accepts
// snake_case aliases, which some audit runs emit.

use serde::Deserialize;
use uuid::Uuid;

/// A customer site known to the audit service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: Uuid,

    /// The site's public base URL, the primary match target for
    /// name searches.
    #[serde(default, alias = "baseURL")]
    pub base_url: String,

    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl Site {
    /// Human-readable label: base URL if present, otherwise name or id.
    pub fn label(&self) -> String {
        if !self.base_url.is_empty() {
            return self.base_url.clone();
        }
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// A detected category of issue for a site.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: Uuid,

    #[serde(rename = "type", default)]
    pub opportunity_type: String,

    #[serde(default)]
    pub status: Option<String>,
}

impl Opportunity {
    /// Whether this opportunity denotes an accessibility category.
    pub fn is_accessibility(&self) -> bool {
        self.opportunity_type
            .to_lowercase()
            .contains("accessibility")
    }
}

/// A specific proposed fix location within an opportunity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: Uuid,

    #[serde(rename = "type", default)]
    pub suggestion_type: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub data: SuggestionData,
}

/// The per-suggestion payload carrying the issue details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionData {
    /// Grouping key shared by suggestions that should be fixed together.
    /// Suggestions without one are not eligible for remediation.
    #[serde(default)]
    pub aggregation_key: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default, alias = "faulty_line")]
    pub faulty_line: Option<String>,

    #[serde(default, alias = "target_selector")]
    pub target_selector: Option<String>,

    #[serde(default, alias = "issue_description")]
    pub issue_description: Option<String>,
}
