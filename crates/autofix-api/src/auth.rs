use reqwest::header::HeaderMap;

use crate::error::Error;

/// Capability to obtain authorization headers for the hosting API.
///
/// The real build drives an interactive browser SSO flow and captures
/// the resulting authorization via a loopback callback listener; tests
/// substitute an implementation returning canned headers.
#[allow(async_fn_in_trait)]
pub trait AuthorizationSource {
    /// Wait until authorization headers are available, or fail if they
    /// cannot be obtained within the implementation's bounded wait.
    async fn authorization_headers(&self) -> Result<HeaderMap, Error>;
}

/// A pre-captured set of authorization headers.
///
/// Useful when the operator already holds a token, and as the canned
/// implementation in tests.
#[derive(Debug, Clone)]
pub struct StaticAuthorization {
    headers: HeaderMap,
}

impl StaticAuthorization {
    pub fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Build from a bearer token string.
    pub fn bearer(token: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::InvalidHeader {
                message: e.to_string(),
            })?;
        value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, value);
        Ok(Self { headers })
    }
}

impl AuthorizationSource for StaticAuthorization {
    async fn authorization_headers(&self) -> Result<HeaderMap, Error> {
        Ok(self.headers.clone())
    }
}
