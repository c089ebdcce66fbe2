//! Persistence for authenticated user profiles.
//!
//! Backends:
//! - [`MemoryUserStore`]: process-local map, used when no remote store is configured
//! - [`DetaUserStore`]: Deta-Base-compatible HTTP key-value API

mod deta;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StorageConfig;
use crate::error::{StoreError, StoreResult};
use crate::models::UserProfile;

pub use deta::DetaUserStore;
pub use memory::MemoryUserStore;

/// Key-value store for user profiles, keyed by [`UserProfile::key`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert or overwrite the record sharing `user.key`; returns the stored record.
    async fn put(&self, user: UserProfile) -> StoreResult<UserProfile>;

    /// Look up a record by key.
    async fn get(&self, key: &str) -> StoreResult<Option<UserProfile>>;
}

/// Reject records the store contract does not accept.
pub(crate) fn ensure_valid(user: &UserProfile) -> StoreResult<()> {
    if user.has_valid_key() {
        Ok(())
    } else {
        Err(StoreError::InvalidRecord("key must be non-empty".to_string()))
    }
}

/// Build the backend selected by `config`.
///
/// # Errors
///
/// Returns error if the Deta project key is malformed or its HTTP client
/// cannot be built.
pub fn from_config(
    config: &StorageConfig,
    client_config: &crate::config::Config,
) -> StoreResult<Arc<dyn UserStore>> {
    match config {
        StorageConfig::Memory => Ok(Arc::new(MemoryUserStore::new())),
        StorageConfig::Deta { project_key, base_name, api_url } => Ok(Arc::new(
            DetaUserStore::new(project_key, base_name, api_url, client_config)?,
        )),
    }
}
