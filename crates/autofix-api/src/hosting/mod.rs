// Cloud Manager repository-hosting (self-service-git) API.
//
// Authenticated with authorization headers captured from the operator's
// interactive SSO session; see [`crate::auth::AuthorizationSource`].

pub mod client;
pub mod models;
mod repositories;

pub use client::HostingClient;
pub use models::Repository;
