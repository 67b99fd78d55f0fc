//! Secret service implementation backed by secret.json.

use crate::secret_storage::SecretStorage;
use docent_core::config::SecretConfig;
use docent_core::secret::SecretService;
use std::path::PathBuf;

/// Service for reading secret configuration.
///
/// A missing secret file is not an error: the store is only the last fallback
/// after explicit entry and environment variables, so it loads as empty.
pub struct SecretServiceImpl {
    storage: Option<SecretStorage>,
}

impl SecretServiceImpl {
    /// Uses the default location. If no config directory can be resolved the
    /// service behaves like an empty store.
    pub fn new() -> Self {
        let storage = match SecretStorage::new() {
            Ok(storage) => Some(storage),
            Err(e) => {
                tracing::warn!("[SecretService] Secret store unavailable: {}", e);
                None
            }
        };
        Self { storage }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            storage: Some(SecretStorage::with_path(path)),
        }
    }
}

impl Default for SecretServiceImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        let Some(storage) = &self.storage else {
            return Ok(SecretConfig::default());
        };

        match storage.load().await {
            Ok(Some(secrets)) => Ok(secrets),
            Ok(None) => {
                tracing::debug!("[SecretService] No secret file at {:?}", storage.path());
                Ok(SecretConfig::default())
            }
            Err(e) => Err(format!("Failed to load secret.json: {}", e)),
        }
    }

    async fn secret_file_exists(&self) -> bool {
        match &self.storage {
            Some(storage) => storage.exists().await,
            None => false,
        }
    }
}
