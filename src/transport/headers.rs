//! API header construction.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

/// User agent sent on every request.
const USER_AGENT: &str = concat!("scan2card-client/", env!("CARGO_PKG_VERSION"));

/// Build the standard headers for API requests.
///
/// Attaches the bearer token when one exists; otherwise the request goes
/// out unauthenticated and the server rejects it as it sees fit.
pub fn api_headers(access_token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Some(token) = access_token {
        headers.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .unwrap_or_else(|_| HeaderValue::from_static("Bearer invalid")),
        );
    }

    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(USER_AGENT),
    );

    // Unique request ID for server-side tracing
    headers.insert(
        HeaderName::from_static("x-request-id"),
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("00000000-0000-0000-0000-000000000000")),
    );

    headers
}
