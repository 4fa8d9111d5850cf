// Wire models for the repository-hosting API.
//
// Listing responses use HAL conventions: the page payload lives under
// `_embedded.repositories` and pagination follows `_links.next.href`.

use serde::Deserialize;

/// A customer repository registered with the hosting service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,

    /// Repository name (e.g. `customer-p42155`).
    #[serde(default)]
    pub repo: String,

    /// Provisioning status; only `ready` repositories can be cloned.
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub repository_url: Option<String>,
}

impl Repository {
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

/// One HAL page of the repository listing.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryPage {
    #[serde(rename = "_embedded", default)]
    pub embedded: Embedded,

    #[serde(rename = "_links", default)]
    pub links: Links,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Embedded {
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Links {
    #[serde(default)]
    pub next: Option<Link>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Link {
    pub href: String,
}

/// Response of the per-repository commands endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryCommands {
    #[serde(default)]
    pub clone: Option<String>,
}
