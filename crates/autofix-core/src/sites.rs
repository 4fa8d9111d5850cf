//! Site resolution: case-insensitive substring search over the remote
//! site listing, with interactive disambiguation when needed.

use autofix_api::spacecat::Site;

use crate::error::CoreError;
use crate::prompt::Prompter;

/// How many candidates an interactive selection shows at most.
pub const MAX_DISPLAY: usize = 10;

/// Match sites whose base URL or name contains `fragment`,
/// case-insensitively.
pub fn match_sites<'a>(sites: &'a [Site], fragment: &str) -> Vec<&'a Site> {
    let needle = fragment.to_lowercase();
    sites
        .iter()
        .filter(|site| {
            site.base_url.to_lowercase().contains(&needle)
                || site
                    .name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Pick one site from the match set.
///
/// Zero matches fail the run; a single match is auto-selected without
/// prompting; multiple matches go to the operator (first
/// [`MAX_DISPLAY`] shown).
pub fn select_site<'a>(
    matches: &[&'a Site],
    query: &str,
    prompter: &dyn Prompter,
) -> Result<&'a Site, CoreError> {
    match matches {
        [] => Err(CoreError::NoMatchingSites {
            query: query.to_owned(),
        }),
        [only] => Ok(only),
        _ => {
            let shown = &matches[..matches.len().min(MAX_DISPLAY)];
            let labels: Vec<String> = shown
                .iter()
                .map(|site| format!("{} ({})", site.label(), site.id))
                .collect();
            let index = prompter.select("Select site", &labels)?;
            Ok(shown[index])
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use uuid::Uuid;

    use crate::prompt::ScriptedPrompter;

    use super::*;

    fn site(base_url: &str) -> Site {
        Site {
            id: Uuid::new_v4(),
            base_url: base_url.to_owned(),
            name: None,
        }
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let sites = vec![
            site("https://www.SunstarGUM.com"),
            site("https://www.krisshop.com"),
        ];

        let matches = match_sites(&sites, "sunstargum");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].base_url, "https://www.SunstarGUM.com");

        assert_eq!(match_sites(&sites, "SHOP").len(), 1);
        assert!(match_sites(&sites, "example").is_empty());
    }

    #[test]
    fn single_match_in_large_listing_auto_selects() {
        // 150-site listing with exactly one URL containing the fragment.
        let mut sites: Vec<Site> = (0..149)
            .map(|i| site(&format!("https://customer-{i}.example.com")))
            .collect();
        sites.push(site("https://www.sunstargum.com"));

        let matches = match_sites(&sites, "sunstargum");
        let selected = select_site(&matches, "sunstargum", &ScriptedPrompter::refusing()).unwrap();
        assert_eq!(selected.base_url, "https://www.sunstargum.com");
    }

    #[test]
    fn zero_matches_is_a_reported_failure() {
        let sites = vec![site("https://www.krisshop.com")];
        let matches = match_sites(&sites, "sunstargum");
        let err = select_site(&matches, "sunstargum", &ScriptedPrompter::refusing()).unwrap_err();
        assert!(matches!(err, CoreError::NoMatchingSites { query } if query == "sunstargum"));
    }

    #[test]
    fn multiple_matches_prompt_for_numeric_choice() {
        let sites = vec![
            site("https://www.shop-one.com"),
            site("https://www.shop-two.com"),
        ];
        let matches = match_sites(&sites, "shop");
        assert_eq!(matches.len(), 2);

        let prompter = ScriptedPrompter::new(vec![1], vec![]);
        let selected = select_site(&matches, "shop", &prompter).unwrap();
        assert_eq!(selected.base_url, "https://www.shop-two.com");
    }

    #[test]
    fn display_is_capped() {
        let sites: Vec<Site> = (0..25)
            .map(|i| site(&format!("https://shop-{i}.example.com")))
            .collect();
        let matches = match_sites(&sites, "shop");
        assert_eq!(matches.len(), 25);

        // Index 10 would be the 11th entry; the cap keeps it out of range.
        let prompter = ScriptedPrompter::new(vec![10], vec![]);
        let err = select_site(&matches, "shop", &prompter).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Prompt(crate::prompt::PromptError::OutOfRange { .. })
        ));
    }
}
