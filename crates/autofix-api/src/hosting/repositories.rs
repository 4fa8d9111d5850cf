// Repository listing and clone-command endpoints.

use tracing::debug;

use crate::error::Error;
use crate::hosting::client::HostingClient;
use crate::hosting::models::{Repository, RepositoryCommands, RepositoryPage};

/// Page size the hosting service uses for repository listings.
const PAGE_LIMIT: usize = 20;

impl HostingClient {
    /// List every repository under a program, following HAL pagination.
    ///
    /// `GET /api/program/{programId}/repositories`, then `_links.next`
    /// until a short page or no next link.
    pub async fn list_repositories(&self, program_id: &str) -> Result<Vec<Repository>, Error> {
        let mut url = Some(self.api_url(&format!("api/program/{program_id}/repositories"))?);
        let mut all = Vec::new();

        while let Some(page_url) = url.take() {
            let page: RepositoryPage = self.get(page_url).await?;
            let fetched = page.embedded.repositories.len();
            all.extend(page.embedded.repositories);
            debug!(fetched, total = all.len(), "fetched repository page");

            if fetched < PAGE_LIMIT {
                break;
            }
            if let Some(next) = page.links.next {
                url = Some(self.resolve_href(&next.href)?);
            }
        }

        Ok(all)
    }

    /// Fetch the clone command for a repository.
    ///
    /// `GET /api/program/{programId}/repository/{repositoryId}/commands`
    pub async fn clone_command(
        &self,
        program_id: &str,
        repository_id: &str,
    ) -> Result<String, Error> {
        let url =
            self.api_url(&format!("api/program/{program_id}/repository/{repository_id}/commands"))?;
        debug!(%program_id, %repository_id, "fetching clone command");

        let commands: RepositoryCommands = self.get(url).await?;
        commands.clone.ok_or(Error::MissingField { field: "clone" })
    }
}
