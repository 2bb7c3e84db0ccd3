//! Authenticated HTTP transport with transparent token refresh.

use std::sync::Arc;

use reqwest::Method;
use tracing::warn;

use crate::auth::SessionManager;
use crate::config::{CONNECT_TIMEOUT, GENERIC_ERROR_MESSAGE, REQUEST_TIMEOUT};
use crate::error::{Error, Result};
use crate::models::auth::ApiErrorBody;
use crate::transport::headers;

/// HTTP transport for API calls: attaches the bearer token and recovers
/// from access-token expiry by refreshing once and replaying.
///
/// Auth endpoints never go through here - the [`SessionManager`] owns a
/// separate bare client for those, so the refresh call cannot recurse
/// into this retry policy.
pub struct HttpTransport {
    client: reqwest::Client,
    session: Arc<SessionManager>,
}

impl HttpTransport {
    /// Create a new transport.
    pub fn new(session: Arc<SessionManager>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, session }
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: reqwest::Client, session: Arc<SessionManager>) -> Self {
        Self { client, session }
    }

    /// Issue a request to a path relative to the configured base URL.
    ///
    /// Body and query are opaque caller payloads. On a 401/403 the
    /// transport refreshes the token (single-flight across concurrent
    /// requests) and replays this request once with the new token; a
    /// second rejection is terminal. No other status is ever retried -
    /// replaying a non-idempotent write on a 5xx would duplicate it.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        query: Option<&[(&str, &str)]>,
    ) -> Result<serde_json::Value> {
        let url = self.session.config().api_url(path);
        let mut token = self.session.access_token().await?;
        let mut retried = false;

        loop {
            let mut request = self
                .client
                .request(method.clone(), &url)
                .headers(headers::api_headers(token.as_deref()));
            if let Some(query) = query {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await.map_err(send_error)?;
            let status = response.status().as_u16();

            if response.status().is_success() {
                return read_json_body(response).await;
            }

            // One refresh-and-replay per request on an auth rejection.
            if matches!(status, 401 | 403) && !retried {
                warn!(status, path, "Auth rejection - refreshing token and replaying");
                retried = true;
                token = Some(
                    self.session
                        .refresh_access_token(token.as_deref())
                        .await?,
                );
                continue;
            }

            return Err(read_api_error(response).await);
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("session", &self.session)
            .finish()
    }
}

/// Map a reqwest send failure into the client taxonomy.
pub(crate) fn send_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::Network(err)
    }
}

/// Parse a success body. Empty bodies (204s and the like) become `null`.
async fn read_json_body(response: reqwest::Response) -> Result<serde_json::Value> {
    let bytes = response.bytes().await.map_err(Error::Network)?;
    if bytes.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Turn a non-2xx response into an [`Error::Api`], surfacing the server's
/// `message` field verbatim when present.
pub(crate) async fn read_api_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let message = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<ApiErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(&bytes).trim().to_string();
                if text.is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    text
                }
            }),
        Err(_) => GENERIC_ERROR_MESSAGE.to_string(),
    };

    Error::Api { status, message }
}
