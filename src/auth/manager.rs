//! Session lifecycle manager.
//!
//! Owns the credential store, the bare client for auth endpoints, and the
//! single-flight refresh state. Shared across tasks via `Arc`.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::auth::endpoints;
use crate::auth::navigation::NavigationSink;
use crate::config::{ClientConfig, CONNECT_TIMEOUT};
use crate::error::{Error, Result};
use crate::models::auth::{LoginOutcome, Session, UserProfile};
use crate::storage::CredentialStore;

/// A request suspended behind an in-flight refresh. Resolved with the new
/// access token, or with the refresh failure message.
type Waiter = oneshot::Sender<std::result::Result<String, String>>;

/// Single-flight refresh bookkeeping.
///
/// Guarded by a sync mutex that is never held across an await: tasks
/// either claim the in-flight slot or enqueue a waiter, in one critical
/// section.
struct RefreshState {
    in_flight: bool,
    waiters: Vec<Waiter>,
}

/// Manages the Scan2Card session lifecycle.
///
/// All reads and writes of session state go through the credential store;
/// the manager itself keeps no token copies. At most one refresh-token
/// exchange is in flight at any time - concurrent callers hit with an
/// expired token wait for that exchange and share its result.
pub struct SessionManager {
    /// Session persistence.
    store: Arc<dyn CredentialStore>,
    /// Bare HTTP client for auth endpoints. Carries no bearer header and
    /// is not subject to the API transport's retry policy.
    client: reqwest::Client,
    /// Backend location.
    config: ClientConfig,
    /// Host navigation callbacks, if any.
    navigation: Option<Arc<dyn NavigationSink>>,
    /// Single-flight refresh state.
    refresh: Mutex<RefreshState>,
}

impl SessionManager {
    /// Create a new session manager over the given store.
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            store,
            client,
            config,
            navigation: None,
            refresh: Mutex::new(RefreshState {
                in_flight: false,
                waiters: Vec::new(),
            }),
        }
    }

    /// Set the navigation sink invoked on terminal auth failure.
    pub fn with_navigation(mut self, sink: Arc<dyn NavigationSink>) -> Self {
        self.navigation = Some(sink);
        self
    }

    /// Set the HTTP client used for auth endpoints (useful for testing or
    /// custom TLS config).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Backend location this manager talks to.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current session snapshot, if any.
    pub async fn session(&self) -> Result<Option<Session>> {
        self.store.load().await
    }

    /// Current access token, if a session holds one.
    pub async fn access_token(&self) -> Result<Option<String>> {
        Ok(self
            .session()
            .await?
            .map(|s| s.access_token)
            .filter(|t| !t.is_empty()))
    }

    /// Profile snapshot of the logged-in user, if any.
    pub async fn current_user(&self) -> Result<Option<UserProfile>> {
        Ok(self.session().await?.map(|s| s.user))
    }

    /// Whether a usable session exists.
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.access_token().await?.is_some())
    }

    /// Persist a freshly issued session (login / OTP success).
    pub async fn install_session(&self, session: Session) -> Result<()> {
        self.store.save(&session).await?;
        info!(user = %session.user.id, store = self.store.name(), "Session installed");
        Ok(())
    }

    /// Exchange credentials for a session.
    ///
    /// Accounts with two-factor enabled get a [`LoginOutcome::TwoFactorRequired`]
    /// challenge instead of a session; complete it with [`verify_otp`](Self::verify_otp).
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let response = endpoints::login(&self.client, &self.config, email, password).await?;

        if response.requires_2fa {
            let user_id = response.user_id.ok_or_else(|| {
                Error::MalformedAuthResponse("2FA challenge without a userId".into())
            })?;
            info!(%user_id, "Two-factor verification required");
            return Ok(LoginOutcome::TwoFactorRequired {
                user_id,
                email: response.email,
            });
        }

        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::MalformedAuthResponse("login response missing token".into()))?;
        let user = response
            .user
            .ok_or_else(|| Error::MalformedAuthResponse("login response missing user".into()))?;

        let session = Session::new(token, response.refresh_token.unwrap_or_default(), user);
        self.install_session(session.clone()).await?;
        Ok(LoginOutcome::LoggedIn(session))
    }

    /// Complete a two-factor login with the code sent to the user.
    pub async fn verify_otp(&self, user_id: &str, otp: &str) -> Result<Session> {
        let response = endpoints::verify_otp(&self.client, &self.config, user_id, otp).await?;

        if response.token.is_empty() {
            return Err(Error::MalformedAuthResponse(
                "OTP response missing token".into(),
            ));
        }

        let session = Session::new(
            response.token,
            response.refresh_token.unwrap_or_default(),
            response.user,
        );
        self.install_session(session.clone()).await?;
        Ok(session)
    }

    /// Destroy the session without signaling navigation.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        info!("Session cleared");
        Ok(())
    }

    /// Get a new access token after an auth rejection.
    ///
    /// `stale_token` is the token the failing request went out with, so a
    /// refresh that already happened in the meantime can be reused.
    ///
    /// Single-flight: the first caller performs the refresh-token exchange;
    /// callers arriving while it is in flight enqueue a continuation and
    /// share its outcome. Continuations resolve in enqueue order.
    ///
    /// On any terminal failure (no refresh token, or the exchange itself
    /// failed) the session is cleared, the login redirect fires once, and
    /// every caller gets [`Error::AuthExhausted`].
    pub async fn refresh_access_token(&self, stale_token: Option<&str>) -> Result<String> {
        // No refresh token is terminal before any network traffic.
        let refresh_token = match self.session().await?.map(|s| s.refresh_token) {
            Some(token) if !token.is_empty() => token,
            _ => {
                warn!("Auth failure with no refresh token - clearing session");
                self.expire_session().await;
                return Err(Error::AuthExhausted("no refresh token available".into()));
            }
        };

        // Claim the in-flight slot or join the queue. One critical section,
        // no await inside.
        let waiter = {
            let mut state = self.refresh.lock().expect("refresh state poisoned");
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            debug!("Refresh already in flight - waiting for its result");
            return match rx.await {
                Ok(Ok(token)) => Ok(token),
                Ok(Err(message)) => Err(Error::AuthExhausted(message)),
                // The performing task dropped its state without resolving
                // the queue; surface it rather than hang.
                Err(_) => Err(Error::AuthExhausted("refresh was abandoned".into())),
            };
        }

        // Double-check: an earlier expiry episode may have replaced the
        // token after this request was dispatched but before it claimed
        // the slot. Anyone queued behind us shares the answer either way.
        let outcome = match self.reusable_token(stale_token).await {
            Ok(Some(token)) => Ok(token),
            Ok(None) => self.perform_refresh(&refresh_token).await,
            Err(err) => Err(err),
        };

        // Release the slot and resolve the queue in enqueue order.
        let waiters = {
            let mut state = self.refresh.lock().expect("refresh state poisoned");
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };

        match &outcome {
            Ok(token) => {
                debug!(waiters = waiters.len(), "Resuming queued requests");
                for tx in waiters {
                    let _ = tx.send(Ok(token.clone()));
                }
            }
            Err(err) => {
                let message = match err {
                    Error::AuthExhausted(inner) => inner.clone(),
                    other => other.to_string(),
                };
                warn!(waiters = waiters.len(), "Failing queued requests");
                for tx in waiters {
                    let _ = tx.send(Err(message.clone()));
                }
            }
        }

        outcome
    }

    /// Returns the stored access token when it is already newer than the
    /// one the failing request used.
    async fn reusable_token(&self, stale_token: Option<&str>) -> Result<Option<String>> {
        let Some(stale) = stale_token else {
            return Ok(None);
        };
        let current = self.access_token().await?;
        match current {
            Some(token) if token != stale => {
                debug!("Token already refreshed since this request went out");
                Ok(Some(token))
            }
            _ => Ok(None),
        }
    }

    /// The actual refresh-token exchange, run by exactly one task at a time.
    async fn perform_refresh(&self, refresh_token: &str) -> Result<String> {
        match endpoints::refresh_access_token(&self.client, &self.config, refresh_token).await {
            Ok(response) => {
                let Some(mut session) = self.session().await? else {
                    // Logged out while the exchange was in flight; do not
                    // resurrect the session.
                    return Err(Error::NotAuthenticated);
                };

                session.access_token = response.token.clone();
                if let Some(rotated) = response.refresh_token {
                    if !rotated.is_empty() {
                        session.refresh_token = rotated;
                    }
                }
                self.store.save(&session).await?;

                info!("Access token refreshed");
                Ok(response.token)
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed - clearing session");
                self.expire_session().await;
                let message = match err {
                    Error::AuthExhausted(inner) => inner,
                    other => other.to_string(),
                };
                Err(Error::AuthExhausted(message))
            }
        }
    }

    /// Clear the session and fire the login redirect.
    async fn expire_session(&self) {
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "Failed to clear credential store");
        }
        if let Some(sink) = &self.navigation {
            sink.redirect_to_login();
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.config.base_url)
            .field("store", &self.store.name())
            .field("has_navigation", &self.navigation.is_some())
            .finish()
    }
}
