//! Terminal implementation of the core `Prompter` capability, backed by
//! dialoguer.

use autofix_core::{PromptError, Prompter};

fn io_error(err: dialoguer::Error) -> PromptError {
    let dialoguer::Error::IO(inner) = err;
    PromptError::Io(inner)
}

/// Interactive prompts on the controlling terminal.
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize, PromptError> {
        dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(io_error)
    }

    fn confirm(&self, prompt: &str) -> Result<bool, PromptError> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(io_error)
    }
}
