use crate::document::UploadedFile;

use super::store::ConversationStore;

/// Everything one interactive session owns.
///
/// Handlers receive this explicitly instead of reaching for global state.
/// Nothing here outlives the session; there is no persistence across restarts.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Unique session identifier (UUID format).
    pub id: String,
    /// Ordered chat history for this session.
    pub conversation: ConversationStore,
    /// Sticky flag set once the admin password has been verified.
    pub admin_authenticated: bool,
    /// API key typed in by the user; takes priority over env and secret store.
    pub api_key_entry: Option<String>,
    /// Admin-uploaded document that supersedes the default file.
    pub upload: Option<UploadedFile>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            conversation: ConversationStore::new(),
            admin_authenticated: false,
            api_key_entry: None,
            upload: None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
