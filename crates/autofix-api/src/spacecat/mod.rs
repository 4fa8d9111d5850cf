// Spacecat audit API: sites, opportunities, and suggestions.

pub mod client;
pub mod models;
mod opportunities;
mod sites;

pub use client::SpacecatClient;
pub use models::{Opportunity, Site, Suggestion, SuggestionData};
