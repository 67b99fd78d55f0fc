//! Credential resolution across explicit entry, environment and secret store.

use std::sync::Arc;

use docent_core::config::{ADMIN_PASSWORD_ENV, API_KEY_ENV};
use docent_core::secret::SecretService;

/// Reads a single environment variable.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves credentials in priority order:
/// 1. explicit user entry
/// 2. environment variable
/// 3. secret store
///
/// Empty strings count as absent at every step.
#[derive(Clone)]
pub struct CredentialResolver {
    secrets: Arc<dyn SecretService>,
    env: EnvLookup,
}

impl CredentialResolver {
    pub fn new(secrets: Arc<dyn SecretService>) -> Self {
        Self {
            secrets,
            env: Arc::new(|key: &str| std::env::var(key).ok()),
        }
    }

    /// Replaces the process-environment lookup (tests, embedding).
    pub fn with_env_lookup(
        mut self,
        env: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Arc::new(env);
        self
    }

    pub async fn resolve(&self, key: &str, explicit: Option<&str>) -> Option<String> {
        if let Some(value) = non_empty(explicit.map(str::to_string)) {
            tracing::debug!("[CredentialResolver] {} taken from user entry", key);
            return Some(value);
        }

        if let Some(value) = non_empty((self.env)(key)) {
            tracing::debug!("[CredentialResolver] {} taken from environment", key);
            return Some(value);
        }

        match self.secrets.load_secrets().await {
            Ok(secrets) => {
                let value = non_empty(secrets.get(key).map(str::to_string));
                if value.is_some() {
                    tracing::debug!("[CredentialResolver] {} taken from secret store", key);
                }
                value
            }
            Err(e) => {
                tracing::warn!("[CredentialResolver] Secret store lookup failed: {}", e);
                None
            }
        }
    }

    pub async fn api_key(&self, explicit: Option<&str>) -> Option<String> {
        self.resolve(API_KEY_ENV, explicit).await
    }

    /// The admin password has no explicit-entry source.
    pub async fn admin_password(&self) -> Option<String> {
        self.resolve(ADMIN_PASSWORD_ENV, None).await
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
