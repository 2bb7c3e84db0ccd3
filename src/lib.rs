//! # scan2card-client
//!
//! Rust client library for the Scan2Card lead-capture API.
//!
//! Wraps every REST call with the current bearer token and transparently
//! recovers from access-token expiry: the first request to hit a 401/403
//! performs the refresh-token exchange, concurrent failures queue behind
//! it, and everything replays with the new token. Callers never see any
//! of it on the success path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scan2card_client::{LoginOutcome, Scan2CardClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Scan2CardClient::builder()
//!         .base_url("https://api.scan2card.io")
//!         .build()?;
//!
//!     if let LoginOutcome::LoggedIn(session) = client.login("admin@expo.test", "hunter2").await? {
//!         println!("logged in as {}", session.user.first_name);
//!     }
//!
//!     let leads = client.get("/leads").await?;
//!     println!("{leads}");
//!     Ok(())
//! }
//! ```
//!
//! ## Role-based routing
//!
//! The [`can_access`] predicate decides, per navigation, whether a session
//! may view content restricted to a set of [`Role`]s.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod transport;

// Re-exports for ergonomic usage
pub use auth::{can_access, AccessDecision, CallbackNavigator, NavigationSink, SessionManager};
pub use client::{Scan2CardClient, Scan2CardClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::auth::{LoginOutcome, Role, Session, UserProfile};
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
