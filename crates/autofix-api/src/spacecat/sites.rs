// Spacecat site endpoints.

use tracing::debug;

use crate::error::Error;
use crate::spacecat::client::SpacecatClient;
use crate::spacecat::models::Site;

impl SpacecatClient {
    /// List all sites visible to the configured organization.
    ///
    /// `GET /sites`
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let url = self.api_url("sites")?;
        debug!("listing sites");
        self.get(url).await
    }
}
