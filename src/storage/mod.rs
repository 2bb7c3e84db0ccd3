//! Credential storage backends for persisting the session.
//!
//! Provides the [`CredentialStore`] trait and implementations:
//! - [`FileCredentialStore`] - JSON file with 0600 permissions
//! - [`MemoryCredentialStore`] - In-memory (testing)

mod file;
mod memory;

use async_trait::async_trait;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

use crate::error::Result;
use crate::models::auth::Session;

/// Trait for credential storage backends.
///
/// Holds at most one session. The session manager is the only writer after
/// startup; backends just persist whatever they are handed, last write wins.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the stored session, if any.
    async fn load(&self) -> Result<Option<Session>>;

    /// Save the session, replacing any previous one.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Remove the stored session.
    async fn clear(&self) -> Result<()>;

    /// Check whether a session is stored.
    async fn exists(&self) -> Result<bool> {
        Ok(self.load().await?.is_some())
    }

    /// Name of this storage backend.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Blanket impl for `Arc<T>`.
#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<T> {
    async fn load(&self) -> Result<Option<Session>> {
        (**self).load().await
    }
    async fn save(&self, session: &Session) -> Result<()> {
        (**self).save(session).await
    }
    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
    async fn exists(&self) -> Result<bool> {
        (**self).exists().await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Blanket impl for `Box<T>`.
#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for Box<T> {
    async fn load(&self) -> Result<Option<Session>> {
        (**self).load().await
    }
    async fn save(&self, session: &Session) -> Result<()> {
        (**self).save(session).await
    }
    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
    async fn exists(&self) -> Result<bool> {
        (**self).exists().await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}
