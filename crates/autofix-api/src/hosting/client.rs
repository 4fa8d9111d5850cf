// Repository-hosting API HTTP client
//
// Carries the authorization headers captured from the operator's SSO
// session as client defaults. 401/403 responses are surfaced as
// `Error::AccessDenied` so callers can print the access-request hint.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Default API base for the hosting service.
pub const DEFAULT_API_BASE: &str = "https://ssg.adobe.io";

/// SSO login path on the hosting service; the browser flow starts here.
pub const SSO_LOGIN_PATH: &str = "/api/auth/login";

/// HTTP client for the repository-hosting API.
pub struct HostingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HostingClient {
    /// Create a client using authorization headers captured from SSO.
    pub fn with_headers(
        base_url: Url,
        headers: HeaderMap,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(headers)?;
        Ok(Self { http, base_url })
    }

    /// The hosting API base URL.
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

    /// Resolve a HAL `href` that may be absolute or API-relative.
    pub(crate) fn resolve_href(&self, href: &str) -> Result<Url, Error> {
        if href.starts_with("http://") || href.starts_with("https://") {
            return Url::parse(href).map_err(Error::InvalidUrl);
        }
        self.api_url(href)
    }

    /// Send a GET request and deserialize the JSON response.
    ///
    /// 401/403 become [`Error::AccessDenied`]; other non-2xx responses
    /// become [`Error::Api`] with the body preserved.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::AccessDenied {
                status: status.as_u16(),
            });
        }

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
