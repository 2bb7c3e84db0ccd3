//! Main client entry point.

use std::sync::Arc;

use reqwest::Method;
use tracing::info;

use crate::auth::{NavigationSink, SessionManager};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::auth::{LoginOutcome, Session, UserProfile};
use crate::storage::{CredentialStore, MemoryCredentialStore};
use crate::transport::HttpTransport;

/// Scan2Card API client.
///
/// Wraps every REST call with the current bearer token and recovers
/// transparently from token expiry; callers never see the refresh
/// protocol on the success path.
///
/// # Examples
///
/// ```rust,no_run
/// use scan2card_client::{LoginOutcome, Scan2CardClient};
///
/// # async fn example() -> scan2card_client::Result<()> {
/// let client = Scan2CardClient::builder()
///     .base_url("https://api.scan2card.io")
///     .build()?;
///
/// match client.login("admin@expo.test", "hunter2").await? {
///     LoginOutcome::LoggedIn(session) => {
///         println!("hello, {}", session.user.first_name);
///     }
///     LoginOutcome::TwoFactorRequired { user_id, .. } => {
///         client.verify_otp(&user_id, "123456").await?;
///     }
/// }
///
/// let events = client.get("/events").await?;
/// println!("{events}");
/// # Ok(())
/// # }
/// ```
pub struct Scan2CardClient {
    session: Arc<SessionManager>,
    http: HttpTransport,
}

impl Scan2CardClient {
    /// Create a builder for configuring the client.
    pub fn builder() -> Scan2CardClientBuilder {
        Scan2CardClientBuilder::new()
    }

    // ── Auth lifecycle ───────────────────────────────────────────────────

    /// Exchange credentials for a session. See [`SessionManager::login`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        self.session.login(email, password).await
    }

    /// Complete a two-factor login.
    pub async fn verify_otp(&self, user_id: &str, otp: &str) -> Result<Session> {
        self.session.verify_otp(user_id, otp).await
    }

    /// Destroy the current session.
    pub async fn logout(&self) -> Result<()> {
        self.session.logout().await
    }

    /// Whether a usable session exists.
    pub async fn is_authenticated(&self) -> Result<bool> {
        self.session.is_authenticated().await
    }

    /// Profile snapshot of the logged-in user, if any.
    pub async fn current_user(&self) -> Result<Option<UserProfile>> {
        self.session.current_user().await
    }

    // ── REST passthrough ─────────────────────────────────────────────────

    /// Issue a request with an explicit method, body, and query string.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        query: Option<&[(&str, &str)]>,
    ) -> Result<serde_json::Value> {
        self.http.request(method, path, body, query).await
    }

    /// GET a path relative to the base URL.
    pub async fn get(&self, path: &str) -> Result<serde_json::Value> {
        self.http.request(Method::GET, path, None, None).await
    }

    /// POST a JSON body.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        self.http.request(Method::POST, path, Some(body), None).await
    }

    /// PUT a JSON body.
    pub async fn put(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        self.http.request(Method::PUT, path, Some(body), None).await
    }

    /// DELETE a path relative to the base URL.
    pub async fn delete(&self, path: &str) -> Result<serde_json::Value> {
        self.http.request(Method::DELETE, path, None, None).await
    }

    /// Get a reference to the session manager.
    pub fn session_manager(&self) -> &SessionManager {
        &self.session
    }
}

impl std::fmt::Debug for Scan2CardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scan2CardClient")
            .field("session", &self.session)
            .finish()
    }
}

/// Builder for [`Scan2CardClient`].
pub struct Scan2CardClientBuilder {
    base_url: Option<String>,
    storage: Option<Arc<dyn CredentialStore>>,
    navigation: Option<Arc<dyn NavigationSink>>,
    reqwest_client: Option<reqwest::Client>,
}

impl Scan2CardClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            storage: None,
            navigation: None,
            reqwest_client: None,
        }
    }

    /// Set the backend base URL (required).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a credential storage backend. Defaults to in-memory storage;
    /// pass a [`FileCredentialStore`](crate::storage::FileCredentialStore)
    /// to keep the session across restarts.
    pub fn storage(mut self, storage: Arc<dyn CredentialStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the navigation sink invoked on terminal auth failure.
    pub fn navigation(mut self, sink: Arc<dyn NavigationSink>) -> Self {
        self.navigation = Some(sink);
        self
    }

    /// Set a custom reqwest client, used for both the API transport and
    /// the bare auth transport.
    pub fn reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.reqwest_client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Scan2CardClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".into()))?;
        let config = ClientConfig::new(base_url);

        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new()));

        let mut manager = SessionManager::new(config, storage);
        if let Some(sink) = self.navigation {
            manager = manager.with_navigation(sink);
        }
        if let Some(client) = &self.reqwest_client {
            manager = manager.with_client(client.clone());
        }

        let session = Arc::new(manager);
        let http = match self.reqwest_client {
            Some(client) => HttpTransport::with_client(client, Arc::clone(&session)),
            None => HttpTransport::new(Arc::clone(&session)),
        };

        info!("Scan2CardClient initialized");
        Ok(Scan2CardClient { session, http })
    }
}

impl Default for Scan2CardClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
