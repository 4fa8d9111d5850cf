// autofix-api: Async Rust clients for the Spacecat audit API and the
// Cloud Manager repository-hosting (self-service-git) API.

pub mod auth;
pub mod error;
pub mod hosting;
pub mod spacecat;
pub mod transport;

pub use auth::AuthorizationSource;
pub use error::Error;
pub use hosting::HostingClient;
pub use spacecat::SpacecatClient;
