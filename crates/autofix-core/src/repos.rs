//! Repository selection for the clone workflow.
//!
//! Customer programs usually register several repositories (code,
//! dispatcher config, environment forks). The heuristic prefers the
//! primary code repository; when it cannot decide, the operator picks
//! by index.

use regex::Regex;

use autofix_api::hosting::Repository;

use crate::error::CoreError;
use crate::prompt::Prompter;

/// Name fragments that mark non-primary repositories.
const EXCLUDE_KEYWORDS: &[&str] = &["config", "dispatcher", "qa", "stage", "dev"];

fn primary_pattern(program_id: &str) -> Regex {
    Regex::new(&format!(
        r"^[^-]+-p{}(?:-uk\d+)?$",
        regex::escape(program_id)
    ))
    .expect("valid primary repository pattern")
}

fn fallback_pattern() -> Regex {
    Regex::new(r"^[^-]+-aem-cloud$").expect("valid fallback repository pattern")
}

fn heuristic_matches<'a>(repos: &'a [Repository], program_id: &str) -> Vec<&'a Repository> {
    let pattern = primary_pattern(program_id);
    repos
        .iter()
        .filter(|r| r.is_ready())
        .filter(|r| {
            let name = r.repo.to_lowercase();
            !EXCLUDE_KEYWORDS.iter().any(|kw| name.contains(kw))
        })
        .filter(|r| pattern.is_match(&r.repo))
        .collect()
}

fn fallback_matches<'a>(repos: &'a [Repository]) -> Vec<&'a Repository> {
    let pattern = fallback_pattern();
    repos
        .iter()
        .filter(|r| r.is_ready() && pattern.is_match(&r.repo))
        .collect()
}

fn label(repo: &Repository) -> String {
    format!("{} (status: {})", repo.repo, repo.status)
}

/// Pick the repository to clone.
///
/// Zero repositories fail the run; one is auto-selected; otherwise the
/// primary-name heuristic decides when it yields a single match and the
/// operator is prompted when it does not.
pub fn select_repository<'a>(
    repos: &'a [Repository],
    program_id: &str,
    prompter: &dyn Prompter,
) -> Result<&'a Repository, CoreError> {
    match repos {
        [] => Err(CoreError::NoRepositories {
            program_id: program_id.to_owned(),
        }),
        [only] => Ok(only),
        _ => {
            let primary = heuristic_matches(repos, program_id);
            if let [only] = primary[..] {
                return Ok(only);
            }

            if primary.is_empty() {
                if let [only] = fallback_matches(repos)[..] {
                    return Ok(only);
                }
            }

            let pool = if primary.is_empty() {
                repos.iter().collect::<Vec<_>>()
            } else {
                primary
            };
            let labels: Vec<String> = pool.iter().map(|r| label(r)).collect();
            let index = prompter.select("Select repository", &labels)?;
            Ok(pool[index])
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crate::prompt::ScriptedPrompter;

    use super::*;

    fn repo(name: &str, status: &str) -> Repository {
        serde_json::from_value(serde_json::json!({
            "id": name,
            "repo": name,
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn zero_repositories_is_fatal() {
        let err = select_repository(&[], "42155", &ScriptedPrompter::refusing()).unwrap_err();
        assert!(matches!(err, CoreError::NoRepositories { .. }));
    }

    #[test]
    fn single_repository_is_auto_selected() {
        let repos = vec![repo("acme-dispatcher", "ready")];
        let selected =
            select_repository(&repos, "42155", &ScriptedPrompter::refusing()).unwrap();
        assert_eq!(selected.repo, "acme-dispatcher");
    }

    #[test]
    fn primary_pattern_wins_over_noise() {
        let repos = vec![
            repo("acme-p42155", "ready"),
            repo("acme-dispatcher-config", "ready"),
            repo("acme-qa", "ready"),
            repo("acme-p99999", "ready"),
        ];
        let selected =
            select_repository(&repos, "42155", &ScriptedPrompter::refusing()).unwrap();
        assert_eq!(selected.repo, "acme-p42155");
    }

    #[test]
    fn unready_repositories_are_ignored_by_the_heuristic() {
        let repos = vec![
            repo("acme-p42155", "creating"),
            repo("acme-aem-cloud", "ready"),
            repo("other-noise", "ready"),
        ];
        // Primary candidate is not ready, fallback pattern decides.
        let selected =
            select_repository(&repos, "42155", &ScriptedPrompter::refusing()).unwrap();
        assert_eq!(selected.repo, "acme-aem-cloud");
    }

    #[test]
    fn uk_suffix_matches_primary_pattern() {
        let repos = vec![
            repo("acme-p42155-uk1", "ready"),
            repo("unrelated-repo", "ready"),
        ];
        let selected =
            select_repository(&repos, "42155", &ScriptedPrompter::refusing()).unwrap();
        assert_eq!(selected.repo, "acme-p42155-uk1");
    }

    #[test]
    fn ambiguous_heuristic_prompts_the_operator() {
        let repos = vec![
            repo("acme-p42155", "ready"),
            repo("beta-p42155", "ready"),
        ];
        let prompter = ScriptedPrompter::new(vec![1], vec![]);
        let selected = select_repository(&repos, "42155", &prompter).unwrap();
        assert_eq!(selected.repo, "beta-p42155");
    }

    #[test]
    fn no_heuristic_match_prompts_over_everything() {
        let repos = vec![
            repo("alpha-thing", "ready"),
            repo("beta-thing", "creating"),
            repo("gamma-thing", "ready"),
        ];
        let prompter = ScriptedPrompter::new(vec![2], vec![]);
        let selected = select_repository(&repos, "42155", &prompter).unwrap();
        assert_eq!(selected.repo, "gamma-thing");
    }
}
