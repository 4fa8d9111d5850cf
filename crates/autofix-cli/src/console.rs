//! Operator-facing terminal output.
//!
//! Workflow narration (sections, markers, spinners) goes to stderr so
//! stdout stays reserved for the message payload. Color is applied via
//! owo-colors and honors `NO_COLOR` through the terminal check.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use autofix_core::EligibleSuggestion;
use autofix_core::sites::MAX_DISPLAY;

fn colored() -> bool {
    io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err()
}

/// Print a section rule with a title, bracketing each workflow step.
pub fn section(title: &str) {
    let rule = "─".repeat(72);
    if colored() {
        eprintln!("\n{}\n  {}\n{}", rule.dimmed(), title.bold(), rule.dimmed());
    } else {
        eprintln!("\n{rule}\n  {title}\n{rule}");
    }
}

pub fn success(message: &str) {
    if colored() {
        eprintln!("{} {message}", "✓".green());
    } else {
        eprintln!("✓ {message}");
    }
}

pub fn info(message: &str) {
    if colored() {
        eprintln!("{} {message}", "ℹ".cyan());
    } else {
        eprintln!("ℹ {message}");
    }
}

pub fn warn(message: &str) {
    if colored() {
        eprintln!("{} {message}", "⚠".yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}

/// Spinner shown around a long remote call; callers finish-and-clear it.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message.to_owned());
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

// ── Suggestion listing ───────────────────────────────────────────────

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Issue")]
    issue: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Faulty line")]
    faulty: String,
    #[tabled(rename = "Suggestion id")]
    id: String,
}

fn preview(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{cut}…")
}

/// Render the eligible-suggestion listing (display capped).
pub fn suggestion_table(suggestions: &[EligibleSuggestion]) -> String {
    let rows: Vec<SuggestionRow> = suggestions
        .iter()
        .take(MAX_DISPLAY)
        .enumerate()
        .map(|(i, s)| SuggestionRow {
            index: i + 1,
            issue: s.issue_type.clone(),
            url: preview(&s.url, 40),
            target: preview(&s.target_selector, 40),
            faulty: preview(&s.faulty_line, 40),
            id: s.id.to_string(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_and_flattens() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("line\nbreak", 20), "line break");
        assert_eq!(preview("abcdefghij", 4), "abcd…");
    }
}
