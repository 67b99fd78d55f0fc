use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_DOCUMENT_PATH: &str = "조명에대한모든것.md";

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Environment variable holding the admin password.
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

/// Application settings read from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_model")]
    pub model: String,
    /// Default context document, relative to the working directory.
    #[serde(default = "default_document")]
    pub default_document: String,
    /// Upper bound for one model call. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_document() -> String {
    DEFAULT_DOCUMENT_PATH.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            default_document: default_document(),
            request_timeout_secs: None,
        }
    }
}

/// Contents of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
}

impl SecretConfig {
    /// Looks a secret up by its environment-variable name.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            API_KEY_ENV => self.google_api_key.as_deref(),
            ADMIN_PASSWORD_ENV => self.admin_password.as_deref(),
            _ => None,
        }
    }
}
