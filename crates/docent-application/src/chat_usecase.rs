//! Chat use case.
//!
//! Orchestrates one render cycle or one chat turn against an explicit
//! [`SessionState`]: document loading, access gate, system instruction,
//! gateway call and conversation bookkeeping.

use std::sync::Arc;

use docent_core::config::API_KEY_ENV;
use docent_core::document::{ContextDocument, DocumentLoader, UploadedFile};
use docent_core::gate::AccessGate;
use docent_core::gateway::{ChatGatewayFactory, ChatRequest};
use docent_core::session::{ConversationMessage, SessionState};
use docent_core::{DocentError, Result};
use docent_infrastructure::CredentialResolver;

use crate::system_instruction::assemble_system_instruction;

/// Prefix of the reply that replaces a failed model call.
pub const REMOTE_ERROR_PREFIX: &str = "에러가 발생했습니다: ";

/// Snapshot of what the front end shows for one render cycle.
#[derive(Debug, Clone)]
pub struct RenderView {
    /// Active context document; `None` when loading failed.
    pub document: Option<ContextDocument>,
    /// Reported inline; never fatal.
    pub load_error: Option<DocentError>,
    pub upload_allowed: bool,
    pub api_key_present: bool,
}

impl RenderView {
    /// True when a non-empty document is available for chatting.
    pub fn has_context(&self) -> bool {
        self.document.as_ref().is_some_and(|doc| !doc.is_empty())
    }
}

/// Result of a chat turn that reached the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Assistant reply as stored in the conversation (error string on failure).
    pub reply: String,
    /// The remote failure, if the reply is a substituted error string.
    pub error: Option<DocentError>,
}

pub struct ChatUseCase {
    loader: Arc<dyn DocumentLoader>,
    gateways: Arc<dyn ChatGatewayFactory>,
    credentials: CredentialResolver,
}

impl ChatUseCase {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        gateways: Arc<dyn ChatGatewayFactory>,
        credentials: CredentialResolver,
    ) -> Self {
        Self {
            loader,
            gateways,
            credentials,
        }
    }

    /// Re-reads the active document and resolves what the UI needs to show.
    pub async fn render(&self, state: &SessionState) -> RenderView {
        let (document, load_error) = match self.loader.load(state.upload.as_ref()).await {
            Ok(doc) => (Some(doc), None),
            Err(e) => {
                tracing::warn!("[ChatUseCase] Failed to load context document: {}", e);
                (None, Some(e))
            }
        };

        let api_key_present = self
            .credentials
            .api_key(state.api_key_entry.as_deref())
            .await
            .is_some();

        RenderView {
            document,
            load_error,
            upload_allowed: AccessGate::upload_allowed(state),
            api_key_present,
        }
    }

    /// Checks `password` against the configured admin secret. Returns whether
    /// the session is authenticated afterwards.
    pub async fn login(&self, state: &mut SessionState, password: &str) -> bool {
        let gate = AccessGate::new(self.credentials.admin_password().await);
        if !gate.is_configured() {
            tracing::warn!("[ChatUseCase] No admin password configured; upload stays locked");
        }

        let authenticated = gate.authenticate(state, password);
        tracing::info!(
            "[ChatUseCase] Admin login for session {}: {}",
            state.id,
            if authenticated { "granted" } else { "denied" }
        );
        authenticated
    }

    /// Installs an upload that supersedes the default document until removed.
    pub fn attach_upload(&self, state: &mut SessionState, upload: UploadedFile) -> Result<()> {
        if !AccessGate::upload_allowed(state) {
            return Err(DocentError::security("document upload requires admin login"));
        }

        tracing::info!(
            "[ChatUseCase] Upload '{}' attached to session {}",
            upload.name,
            state.id
        );
        state.upload = Some(upload);
        Ok(())
    }

    /// Drops the upload so the default document applies again.
    pub fn remove_upload(&self, state: &mut SessionState) -> bool {
        state.upload.take().is_some()
    }

    /// Stores the API key typed in by the user. `None` or blank clears it.
    pub fn set_api_key(&self, state: &mut SessionState, api_key: Option<String>) {
        state.api_key_entry = api_key.filter(|key| !key.trim().is_empty());
    }

    /// Clears the conversation. Previous messages are gone for good.
    pub fn reset(&self, state: &mut SessionState) {
        tracing::info!(
            "[ChatUseCase] Clearing {} messages from session {}",
            state.conversation.len(),
            state.id
        );
        state.conversation.clear();
    }

    /// Runs one chat turn.
    ///
    /// Missing credential or missing document return an error before any state
    /// change or remote call. Once the question is accepted, a failed model
    /// call is turned into an error-string reply and the conversation goes on.
    pub async fn submit(&self, state: &mut SessionState, question: &str) -> Result<TurnOutcome> {
        let api_key = self
            .credentials
            .api_key(state.api_key_entry.as_deref())
            .await
            .ok_or_else(|| DocentError::missing_credential(API_KEY_ENV))?;

        let document = match self.loader.load(state.upload.as_ref()).await {
            Ok(doc) if !doc.is_empty() => doc,
            Ok(_) => return Err(DocentError::MissingDocument),
            Err(e) => {
                tracing::warn!("[ChatUseCase] Context document unavailable: {}", e);
                return Err(DocentError::MissingDocument);
            }
        };

        state.conversation.append(ConversationMessage::user(question));

        let (reply, error) = match self.ask(&api_key, &document, state, question).await {
            Ok(reply) => (reply, None),
            Err(e) => {
                tracing::error!("[ChatUseCase] Model call failed: {}", e);
                (format!("{REMOTE_ERROR_PREFIX}{e}"), Some(e))
            }
        };

        state
            .conversation
            .append(ConversationMessage::assistant(reply.clone()));

        Ok(TurnOutcome { reply, error })
    }

    async fn ask(
        &self,
        api_key: &str,
        document: &ContextDocument,
        state: &SessionState,
        question: &str,
    ) -> Result<String> {
        let system_instruction = assemble_system_instruction(&document.raw_text)?;
        let gateway = self.gateways.connect(api_key)?;

        gateway
            .generate(ChatRequest {
                system_instruction,
                history: state.conversation.history_excluding_last().to_vec(),
                user_input: question.to_string(),
            })
            .await
    }
}
