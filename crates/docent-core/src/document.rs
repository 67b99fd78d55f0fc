//! Context document domain model and loader interface.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Media type that routes an upload through PDF text extraction.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// File extensions accepted for admin uploads.
pub const ACCEPTED_UPLOAD_EXTENSIONS: [&str; 3] = ["pdf", "txt", "md"];

/// Number of characters shown by [`ContextDocument::preview`].
pub const PREVIEW_CHARS: usize = 1000;

/// A file handed over by the admin: raw bytes plus declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename
    pub name: String,
    /// MIME type of the file
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }
}

/// Where the active context text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    DefaultFile,
    Uploaded,
}

/// The single reference document injected into the system instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDocument {
    pub raw_text: String,
    pub source: DocumentSource,
}

impl ContextDocument {
    pub fn new(raw_text: impl Into<String>, source: DocumentSource) -> Self {
        Self {
            raw_text: raw_text.into(),
            source,
        }
    }

    /// Length in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.raw_text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }

    /// First [`PREVIEW_CHARS`] characters followed by an ellipsis.
    pub fn preview(&self) -> String {
        let head: String = self.raw_text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

/// Resolves the active context document for a render cycle.
///
/// Implementations must not cache: every call re-reads the default file or
/// re-decodes the upload, and an upload always wins over the default file.
#[async_trait::async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, upload: Option<&UploadedFile>) -> Result<ContextDocument>;
}
