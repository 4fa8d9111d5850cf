// Spacecat opportunity and suggestion endpoints.
//
// Both are site-scoped: /sites/{siteId}/opportunities and
// /sites/{siteId}/opportunities/{opportunityId}/suggestions.

use tracing::debug;
use uuid::Uuid;

use crate::error::Error;
use crate::spacecat::client::SpacecatClient;
use crate::spacecat::models::{Opportunity, Suggestion};

impl SpacecatClient {
    /// List the opportunities detected for a site.
    ///
    /// `GET /sites/{siteId}/opportunities`
    pub async fn list_opportunities(&self, site_id: &Uuid) -> Result<Vec<Opportunity>, Error> {
        let url = self.api_url(&format!("sites/{site_id}/opportunities"))?;
        debug!(%site_id, "listing opportunities");
        self.get(url).await
    }

    /// List the suggestions attached to an opportunity.
    ///
    /// `GET /sites/{siteId}/opportunities/{opportunityId}/suggestions`
    pub async fn list_suggestions(
        &self,
        site_id: &Uuid,
        opportunity_id: &Uuid,
    ) -> Result<Vec<Suggestion>, Error> {
        let url = self.api_url(&format!(
            "sites/{site_id}/opportunities/{opportunity_id}/suggestions"
        ))?;
        debug!(%site_id, %opportunity_id, "listing suggestions");
        self.get(url).await
    }
}
