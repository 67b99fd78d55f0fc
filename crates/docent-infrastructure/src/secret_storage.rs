//! Plaintext credential file (secret.json).

use std::path::{Path, PathBuf};

use docent_core::config::SecretConfig;
use docent_core::{DocentError, Result};

use crate::paths::DocentPaths;

/// Read-only access to `secret.json`.
///
/// The file is plain JSON; keep it at mode 600.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Uses ~/.config/docent/secret.json.
    pub fn new() -> Result<Self> {
        let path = DocentPaths::secret_file().map_err(|e| DocentError::config(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Reads the file. `Ok(None)` when it does not exist.
    pub async fn load(&self) -> Result<Option<SecretConfig>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let secrets: SecretConfig = serde_json::from_str(&content)?;
        Ok(Some(secrets))
    }
}
