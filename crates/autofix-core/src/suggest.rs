//! Suggestion analysis: eligibility filtering, selection, and issue
//! bundling.

use uuid::Uuid;

use autofix_api::spacecat::{Opportunity, Suggestion};

use crate::error::CoreError;
use crate::model::{EligibleSuggestion, IssueDescriptor};
use crate::prompt::Prompter;
use crate::sites::MAX_DISPLAY;

/// Issue type encoded in an aggregation key (`url|issue-type|scope`).
pub fn issue_type_from_key(aggregation_key: &str) -> &str {
    aggregation_key.split('|').nth(1).unwrap_or("unknown")
}

/// Analyze wire suggestions into eligible ones.
///
/// Suggestions without a non-empty aggregation key are dropped here and
/// never presented for selection.
pub fn eligible_suggestions(
    suggestions: &[Suggestion],
    opportunity: &Opportunity,
) -> Vec<EligibleSuggestion> {
    suggestions
        .iter()
        .filter_map(|s| EligibleSuggestion::from_wire(s, opportunity))
        .collect()
}

/// Pick one suggestion from the eligible set.
///
/// An explicit id skips all interaction (it must exist in the set);
/// otherwise a single candidate is auto-selected and multiple
/// candidates go to the operator, capped at [`MAX_DISPLAY`].
pub fn select_suggestion<'a>(
    eligible: &'a [EligibleSuggestion],
    explicit_id: Option<Uuid>,
    prompter: &dyn Prompter,
) -> Result<&'a EligibleSuggestion, CoreError> {
    if eligible.is_empty() {
        return Err(CoreError::NoSuggestions);
    }

    if let Some(id) = explicit_id {
        return eligible
            .iter()
            .find(|s| s.id == id)
            .ok_or(CoreError::SuggestionNotFound { id });
    }

    if let [only] = eligible {
        return Ok(only);
    }

    let shown = &eligible[..eligible.len().min(MAX_DISPLAY)];
    let labels: Vec<String> = shown
        .iter()
        .map(|s| format!("{} {} ({})", s.issue_type, s.url, s.id))
        .collect();
    let index = prompter.select("Select suggestion", &labels)?;
    Ok(&shown[index])
}

/// The issues to send for a selection.
///
/// With `send_all` the list is exactly the issues of every eligible
/// suggestion sharing the selected suggestion's aggregation key;
/// without it, exactly the selected issue.
pub fn bundle_issues(
    selected: &EligibleSuggestion,
    eligible: &[EligibleSuggestion],
    send_all: bool,
) -> Vec<IssueDescriptor> {
    if !send_all {
        return vec![selected.issue()];
    }
    eligible
        .iter()
        .filter(|s| s.aggregation_key == selected.aggregation_key)
        .map(EligibleSuggestion::issue)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::prompt::{PromptError, ScriptedPrompter};

    use super::*;

    fn opportunity() -> Opportunity {
        serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "type": "generic-opportunity:accessibility",
        }))
        .unwrap()
    }

    fn suggestion(aggregation_key: Option<&str>, selector: &str) -> Suggestion {
        serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "type": "CODE_CHANGE",
            "status": "NEW",
            "data": {
                "aggregationKey": aggregation_key,
                "url": "https://example.com/",
                "faultyLine": "<img src=\"x.png\">",
                "targetSelector": selector,
                "issueDescription": "Image missing alt text",
            }
        }))
        .unwrap()
    }

    #[test]
    fn issue_type_is_second_key_segment() {
        assert_eq!(issue_type_from_key("https://e.com|img-alt|main"), "img-alt");
        assert_eq!(issue_type_from_key("no-separators"), "unknown");
    }

    #[test]
    fn suggestions_without_grouping_key_are_never_eligible() {
        let opp = opportunity();
        let wire = vec![
            suggestion(Some("https://e.com|img-alt|main"), "img.hero"),
            suggestion(None, "a.cta"),
            suggestion(Some(""), "div.banner"),
        ];

        let eligible = eligible_suggestions(&wire, &opp);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].target_selector, "img.hero");
        assert_eq!(eligible[0].issue_type, "img-alt");
        assert_eq!(eligible[0].opportunity_id, opp.id);
    }

    #[test]
    fn explicit_id_selects_without_prompting() {
        let opp = opportunity();
        let wire = vec![
            suggestion(Some("k|a|1"), "one"),
            suggestion(Some("k|b|2"), "two"),
        ];
        let eligible = eligible_suggestions(&wire, &opp);
        let wanted = eligible[1].id;

        let selected =
            select_suggestion(&eligible, Some(wanted), &ScriptedPrompter::refusing()).unwrap();
        assert_eq!(selected.id, wanted);
    }

    #[test]
    fn unknown_explicit_id_fails() {
        let opp = opportunity();
        let wire = vec![suggestion(Some("k|a|1"), "one")];
        let eligible = eligible_suggestions(&wire, &opp);

        let missing = Uuid::new_v4();
        let err = select_suggestion(&eligible, Some(missing), &ScriptedPrompter::refusing())
            .unwrap_err();
        assert!(matches!(err, CoreError::SuggestionNotFound { id } if id == missing));
    }

    #[test]
    fn empty_eligible_set_is_a_reported_failure() {
        let err = select_suggestion(&[], None, &ScriptedPrompter::refusing()).unwrap_err();
        assert!(matches!(err, CoreError::NoSuggestions));
    }

    #[test]
    fn interactive_selection_uses_prompter() {
        let opp = opportunity();
        let wire = vec![
            suggestion(Some("k|a|1"), "one"),
            suggestion(Some("k|b|2"), "two"),
        ];
        let eligible = eligible_suggestions(&wire, &opp);

        let prompter = ScriptedPrompter::new(vec![1], vec![]);
        let selected = select_suggestion(&eligible, None, &prompter).unwrap();
        assert_eq!(selected.target_selector, "two");

        // Exhausted script surfaces rather than hanging.
        let err = select_suggestion(&eligible, None, &ScriptedPrompter::refusing()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Prompt(PromptError::ScriptExhausted)
        ));
    }

    #[test]
    fn bundling_collects_exactly_the_shared_key_set() {
        let opp = opportunity();
        let wire = vec![
            suggestion(Some("https://e.com|img-alt|main"), "img.hero"),
            suggestion(Some("https://e.com|img-alt|main"), "img.footer"),
            suggestion(Some("https://e.com|link-name|main"), "a.cta"),
        ];
        let eligible = eligible_suggestions(&wire, &opp);
        let selected = &eligible[0];

        let single = bundle_issues(selected, &eligible, false);
        assert_eq!(single, vec![selected.issue()]);

        let all = bundle_issues(selected, &eligible, true);
        let selectors: Vec<&str> = all.iter().map(|i| i.selector.as_str()).collect();
        assert_eq!(selectors, vec!["img.hero", "img.footer"]);
        assert!(all.iter().all(|i| i.grouping_key == selected.aggregation_key));
    }
}
