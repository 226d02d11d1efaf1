//! Interactive consent flow for installed applications.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use super::credential::OAuthCredential;
use super::oauth::{OAuthClient, Pkce, random_state};
use crate::config::ClientSecrets;
use crate::error::{ProviderError, Result};

const PROVIDER: &str = "google-oauth";

/// How long to wait for the browser to come back to the loopback listener.
pub(crate) const REDIRECT_TIMEOUT: Duration = Duration::from_secs(300);

const MAX_REQUEST_HEAD: usize = 8 * 1024;

const SUCCESS_PAGE: &str = "<html><body><p>The authentication flow has completed. \
You may close this window.</p></body></html>";
const FAILURE_PAGE: &str = "<html><body><p>Authorization failed. \
Check the adapter's log output.</p></body></html>";

/// Obtains a brand-new credential from the user.
#[async_trait]
pub trait AuthorizationFlow: Send + Sync {
    async fn authorize(&self) -> Result<OAuthCredential>;
}

/// Loopback-redirect consent flow: the consent URL is logged, the browser is
/// redirected to `http://127.0.0.1:<port>/`, and the code is exchanged for a token.
pub struct LocalServerFlow {
    client_secrets_path: PathBuf,
    oauth: OAuthClient,
    scopes: Vec<&'static str>,
}

impl LocalServerFlow {
    pub fn new(client_secrets_path: impl Into<PathBuf>, oauth: OAuthClient, scopes: Vec<&'static str>) -> Self {
        Self {
            client_secrets_path: client_secrets_path.into(),
            oauth,
            scopes,
        }
    }
}

#[async_trait]
impl AuthorizationFlow for LocalServerFlow {
    async fn authorize(&self) -> Result<OAuthCredential> {
        let secrets = ClientSecrets::load(&self.client_secrets_path).await?;
        let Some(client) = secrets.entry() else {
            return Err(failed("client secrets have no usable section"));
        };

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| failed(format!("cannot bind loopback listener: {e}")))?;
        let port = listener
            .local_addr()
            .map_err(|e| failed(format!("cannot read listener address: {e}")))?
            .port();
        let redirect_uri = format!("http://127.0.0.1:{port}/");

        let pkce = Pkce::generate();
        let state = random_state();
        let consent_url =
            self.oauth
                .authorization_url(client, &redirect_uri, &state, &pkce, &self.scopes)?;
        log::info!("Please visit this URL to authorize this application: {consent_url}");

        let code = tokio::time::timeout(REDIRECT_TIMEOUT, accept_redirect(&listener, &state))
            .await
            .map_err(|_| {
                failed(format!(
                    "no redirect received within {}s",
                    REDIRECT_TIMEOUT.as_secs()
                ))
            })??;

        let credential = self
            .oauth
            .exchange_code(client, &code, &redirect_uri, &pkce.verifier, &self.scopes)
            .await?;
        log::info!("[{PROVIDER}] Authorization completed");
        Ok(credential)
    }
}

fn failed(detail: impl Into<String>) -> ProviderError {
    ProviderError::AuthorizationFailed {
        provider: PROVIDER.to_string(),
        detail: detail.into(),
    }
}

/// Wait for the redirect carrying `code` and a matching `state`.
///
/// Stray requests (favicon and the like) get a 404 and are skipped.
pub(crate) async fn accept_redirect(listener: &TcpListener, expected_state: &str) -> Result<String> {
    loop {
        let (mut stream, _) = listener
            .accept()
            .await
            .map_err(|e| failed(format!("accept failed: {e}")))?;

        let Some(target) = read_request_target(&mut stream).await else {
            respond(&mut stream, "400 Bad Request", FAILURE_PAGE).await;
            continue;
        };
        let Ok(url) = url::Url::parse(&format!("http://127.0.0.1{target}")) else {
            respond(&mut stream, "400 Bad Request", FAILURE_PAGE).await;
            continue;
        };

        let mut code = None;
        let mut state = None;
        let mut error = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            respond(&mut stream, "200 OK", FAILURE_PAGE).await;
            return Err(failed(format!("consent was not granted: {error}")));
        }
        let Some(code) = code else {
            respond(&mut stream, "404 Not Found", "").await;
            continue;
        };
        if state.as_deref() != Some(expected_state) {
            respond(&mut stream, "400 Bad Request", FAILURE_PAGE).await;
            return Err(failed("state mismatch in redirect"));
        }

        respond(&mut stream, "200 OK", SUCCESS_PAGE).await;
        return Ok(code);
    }
}

/// Read the request head and return the request target of its first line.
async fn read_request_target(stream: &mut TcpStream) -> Option<String> {
    let mut head = Vec::with_capacity(1024);
    let mut buf = [0_u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await.ok()?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
        if head.len() > MAX_REQUEST_HEAD {
            return None;
        }
    }
    let head = String::from_utf8_lossy(&head);
    let mut parts = head.lines().next()?.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("GET"), Some(target)) if target.starts_with('/') => Some(target.to_string()),
        _ => None,
    }
}

async fn respond(stream: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    if let Err(e) = stream.write_all(response.as_bytes()).await {
        log::debug!("[{PROVIDER}] Failed to answer redirect request: {e}");
    }
    let _ = stream.shutdown().await;
}
