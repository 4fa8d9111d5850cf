//! Browser SSO capture.
//!
//! Implements the "obtain authorization headers for the hosting API"
//! capability: opens the operator's browser at the service's SSO login
//! endpoint with a loopback redirect, then waits (bounded) for the
//! callback carrying the authorization material. Tests use
//! [`autofix_api::auth::StaticAuthorization`] instead.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::debug;
use url::Url;

use autofix_api::hosting::client::SSO_LOGIN_PATH;
use autofix_api::{AuthorizationSource, Error};

const CALLBACK_PATH: &str = "/callback";
const MAX_REQUEST_BYTES: usize = 16 * 1024;

const CALLBACK_PAGE: &str = "<html><body><h3>Authentication captured.</h3>\
<p>You can close this window and return to the terminal.</p></body></html>";

/// Interactive SSO capture against the hosting service.
pub struct BrowserSsoCapture {
    login_url: Url,
    timeout: Duration,
}

impl BrowserSsoCapture {
    pub fn new(hosting_base: &Url, timeout: Duration) -> Result<Self, Error> {
        let login_url = hosting_base
            .join(SSO_LOGIN_PATH)
            .map_err(Error::InvalidUrl)?;
        Ok(Self { login_url, timeout })
    }
}

impl AuthorizationSource for BrowserSsoCapture {
    async fn authorization_headers(&self) -> Result<HeaderMap, Error> {
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .map_err(|e| listener_error(&e))?;
        let port = listener
            .local_addr()
            .map_err(|e| listener_error(&e))?
            .port();

        let mut login_url = self.login_url.clone();
        login_url
            .query_pairs_mut()
            .append_pair("redirect_uri", &format!("http://127.0.0.1:{port}{CALLBACK_PATH}"));

        debug!(%login_url, "opening browser for SSO");
        open::that(login_url.as_str()).map_err(|e| Error::Authentication {
            message: format!("could not open the browser: {e}"),
        })?;

        tokio::time::timeout(self.timeout, wait_for_callback(&listener))
            .await
            .map_err(|_| Error::Authentication {
                message: format!(
                    "SSO not completed within {}s",
                    self.timeout.as_secs()
                ),
            })?
    }
}

fn listener_error(err: &std::io::Error) -> Error {
    Error::Authentication {
        message: format!("callback listener failed: {err}"),
    }
}

/// Accept connections until one carries the authorization material.
///
/// Stray requests (favicon lookups, reloads of the callback page) get a
/// 404 and the wait continues.
async fn wait_for_callback(listener: &TcpListener) -> Result<HeaderMap, Error> {
    loop {
        let (mut stream, peer) = listener.accept().await.map_err(|e| listener_error(&e))?;
        debug!(%peer, "callback connection");

        let head = read_request_head(&mut stream).await?;
        match authorization_from_request(&head)? {
            Some(headers) => {
                respond(&mut stream, "200 OK", CALLBACK_PAGE).await;
                return Ok(headers);
            }
            None => respond(&mut stream, "404 Not Found", "").await,
        }
    }
}

async fn read_request_head(stream: &mut TcpStream) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.map_err(|e| listener_error(&e))?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.len() > MAX_REQUEST_BYTES {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

async fn respond(stream: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    // Best effort; the capture result does not depend on the browser
    // receiving this page.
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Extract authorization headers from a callback request head.
///
/// Accepts either a `token` query parameter (turned into a bearer
/// header) or a forwarded `Authorization` header on the request itself.
fn authorization_from_request(head: &str) -> Result<Option<HeaderMap>, Error> {
    let Some(request_line) = head.lines().next() else {
        return Ok(None);
    };
    let Some(target) = request_line.split_whitespace().nth(1) else {
        return Ok(None);
    };
    if !target.starts_with(CALLBACK_PATH) {
        return Ok(None);
    }

    // Loopback target; the base is only needed to parse the query.
    let url = Url::parse(&format!("http://127.0.0.1{target}")).map_err(Error::InvalidUrl)?;
    if let Some((_, token)) = url.query_pairs().find(|(k, _)| k == "token") {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            Error::InvalidHeader {
                message: e.to_string(),
            }
        })?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        return Ok(Some(headers));
    }

    for line in head.lines().skip(1) {
        if let Some((name, rest)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("authorization") {
                let mut value =
                    HeaderValue::from_str(rest.trim()).map_err(|e| Error::InvalidHeader {
                        message: e.to_string(),
                    })?;
                value.set_sensitive(true);
                let mut headers = HeaderMap::new();
                headers.insert(AUTHORIZATION, value);
                return Ok(Some(headers));
            }
        }
    }

    Ok(None)
}
