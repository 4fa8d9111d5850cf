//! Synchronous prompt capability.
//!
//! Interactive selection and confirmation go through this trait so the
//! workflow logic can be exercised with a scripted input source instead
//! of real terminal I/O.

use std::cell::RefCell;
use std::collections::VecDeque;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("selection {index} out of range (1-{max})")]
    OutOfRange { index: usize, max: usize },

    #[error("scripted prompt exhausted")]
    ScriptExhausted,
}

/// Blocking operator prompts: numeric selection and yes/no confirmation.
pub trait Prompter {
    /// Present `items` and return the index of the operator's choice.
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize, PromptError>;

    /// Ask a yes/no question; anything but an affirmative answer is `false`.
    fn confirm(&self, prompt: &str) -> Result<bool, PromptError>;
}

/// Scripted prompt source for tests: answers are popped in order, and
/// running past the script is an error rather than a hang.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    selections: RefCell<VecDeque<usize>>,
    confirmations: RefCell<VecDeque<bool>>,
}

impl ScriptedPrompter {
    pub fn new(selections: Vec<usize>, confirmations: Vec<bool>) -> Self {
        Self {
            selections: RefCell::new(selections.into()),
            confirmations: RefCell::new(confirmations.into()),
        }
    }

    /// A prompter with an empty script; any prompt call fails.
    ///
    /// Used to assert that a code path never prompts.
    pub fn refusing() -> Self {
        Self::default()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, _prompt: &str, items: &[String]) -> Result<usize, PromptError> {
        let index = self
            .selections
            .borrow_mut()
            .pop_front()
            .ok_or(PromptError::ScriptExhausted)?;
        if index >= items.len() {
            return Err(PromptError::OutOfRange {
                index: index + 1,
                max: items.len(),
            });
        }
        Ok(index)
    }

    fn confirm(&self, _prompt: &str) -> Result<bool, PromptError> {
        self.confirmations
            .borrow_mut()
            .pop_front()
            .ok_or(PromptError::ScriptExhausted)
    }
}
