//! Workflow logic and shared services for the autofix operator tools.
//!
//! The CLI crates drive the interactive pipelines; everything that can
//! be decided without a terminal lives here: site matching, suggestion
//! eligibility and bundling, message construction, archive packing, and
//! the object-storage / queue services.

pub mod archive;
pub mod aws;
pub mod error;
pub mod message;
pub mod model;
pub mod prompt;
pub mod queue;
pub mod repos;
pub mod sites;
pub mod storage;
pub mod suggest;

pub use error::CoreError;
pub use model::{EligibleSuggestion, FixRequestMessage, IssueDescriptor};
pub use prompt::{PromptError, Prompter};
