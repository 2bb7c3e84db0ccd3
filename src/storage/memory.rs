//! In-memory credential storage for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CredentialStore;
use crate::error::Result;
use crate::models::auth::Session;

/// In-memory credential storage, primarily for testing.
pub struct MemoryCredentialStore {
    session: RwLock<Option<Session>>,
}

impl MemoryCredentialStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    /// Create a store pre-seeded with a session.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.write().await = None;
        Ok(())
    }

    async fn exists(&self) -> Result<bool> {
        Ok(self.session.read().await.is_some())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
