//! Settings file storage (config.toml).

use std::path::{Path, PathBuf};

use docent_core::config::Settings;
use docent_core::{DocentError, Result};

use crate::paths::DocentPaths;

/// Loads [`Settings`] from a TOML file. A missing file means defaults.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Uses ~/.config/docent/config.toml.
    pub fn new() -> Result<Self> {
        let path = DocentPaths::config_file().map_err(|e| DocentError::config(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Settings> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[ConfigStorage] {:?} not found, using defaults", self.path);
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings = toml::from_str(&content)?;
        tracing::debug!("[ConfigStorage] Loaded settings from {:?}", self.path);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(storage.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_load_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "model = \"gemini-2.5-flash\"\ndefault_document = \"docs/lighting.md\"\n",
        )
        .unwrap();

        let settings = ConfigStorage::with_path(path).load().await.unwrap();
        assert_eq!(settings.model, "gemini-2.5-flash");
        assert_eq!(settings.default_document, "docs/lighting.md");
        assert_eq!(settings.request_timeout_secs, None);
    }

    #[tokio::test]
    async fn test_malformed_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "model = [unterminated").unwrap();

        let err = ConfigStorage::with_path(path).load().await.unwrap_err();
        assert!(matches!(err, DocentError::Serialization { ref format, .. } if format == "TOML"));
    }
}
