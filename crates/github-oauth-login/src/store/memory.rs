//! In-memory user store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{UserStore, ensure_valid};
use crate::error::StoreResult;
use crate::models::UserProfile;

/// Process-local user store. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn put(&self, user: UserProfile) -> StoreResult<UserProfile> {
        ensure_valid(&user)?;
        self.users.write().await.insert(user.key.clone(), user.clone());
        Ok(user)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<UserProfile>> {
        Ok(self.users.read().await.get(key).cloned())
    }
}

impl std::fmt::Debug for MemoryUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryUserStore").finish()
    }
}
