// Spacecat API HTTP client
//
// Wraps `reqwest::Client` with Spacecat URL construction and response
// handling. Endpoint modules (sites, opportunities) are implemented as
// inherent methods via separate files to keep this module focused on
// transport mechanics.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// HTTP client for the Spacecat audit API.
///
/// Every request carries the `x-api-key` and `x-gw-ims-org-id` headers
/// injected as client defaults at construction time.
pub struct SpacecatClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SpacecatClient {
    /// Create a new client for the given API base.
    ///
    /// `base_url` is the full API root, e.g.
    /// `https://spacecat.experiencecloud.live/api/ci`.
    pub fn new(
        base_url: Url,
        api_key: &SecretString,
        ims_org_id: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();

        let mut key = HeaderValue::from_str(api_key.expose_secret()).map_err(|e| {
            Error::InvalidHeader {
                message: format!("api key: {e}"),
            }
        })?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);

        let org = HeaderValue::from_str(ims_org_id).map_err(|e| Error::InvalidHeader {
            message: format!("ims org id: {e}"),
        })?;
        headers.insert("x-gw-ims-org-id", org);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self { http, base_url })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL for an API path relative to the base.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&full).map_err(Error::InvalidUrl)
    }

    /// Send a GET request and deserialize the JSON response.
    ///
    /// Non-2xx responses become [`Error::Api`] with the body preserved;
    /// body/schema mismatches become [`Error::Deserialization`] carrying
    /// the raw body for debugging.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
