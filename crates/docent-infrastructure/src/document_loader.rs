//! Filesystem-backed context document loader.

use std::path::{Path, PathBuf};

use docent_core::document::{ContextDocument, DocumentLoader, DocumentSource, UploadedFile};
use docent_core::{DocentError, Result};

/// Loads the default document from disk or decodes an admin upload.
///
/// Nothing is cached: each call re-reads the file or re-decodes the upload.
pub struct FileDocumentLoader {
    default_path: PathBuf,
}

impl FileDocumentLoader {
    pub fn new(default_path: impl Into<PathBuf>) -> Self {
        Self {
            default_path: default_path.into(),
        }
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// A missing default file yields an empty document; the caller decides
    /// whether that blocks sending.
    async fn load_default(&self) -> Result<ContextDocument> {
        let bytes = match tokio::fs::read(&self.default_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "[DocumentLoader] Default document {:?} not found",
                    self.default_path
                );
                return Ok(ContextDocument::new(String::new(), DocumentSource::DefaultFile));
            }
            Err(e) => return Err(e.into()),
        };

        let text = String::from_utf8(bytes)?;
        tracing::debug!(
            "[DocumentLoader] Loaded default document {:?} ({} bytes)",
            self.default_path,
            text.len()
        );
        Ok(ContextDocument::new(text, DocumentSource::DefaultFile))
    }

    async fn load_upload(&self, upload: &UploadedFile) -> Result<ContextDocument> {
        let text = if upload.is_pdf() {
            let bytes = upload.bytes.clone();
            tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                .await
                .map_err(|e| DocentError::internal(format!("PDF extraction task failed: {e}")))??
        } else {
            String::from_utf8(upload.bytes.clone())?
        };

        tracing::debug!(
            "[DocumentLoader] Decoded upload '{}' ({}, {} bytes of text)",
            upload.name,
            upload.media_type,
            text.len()
        );
        Ok(ContextDocument::new(text, DocumentSource::Uploaded))
    }
}

#[async_trait::async_trait]
impl DocumentLoader for FileDocumentLoader {
    async fn load(&self, upload: Option<&UploadedFile>) -> Result<ContextDocument> {
        match upload {
            Some(upload) => self.load_upload(upload).await,
            None => self.load_default().await,
        }
    }
}

/// Extracts text page by page and joins the non-empty pages with newlines.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let document = lopdf::Document::load_mem(bytes)
        .map_err(|e| DocentError::decode(format!("Failed to parse PDF: {e}")))?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().into_keys() {
        match document.extract_text(&[page_number]) {
            // lopdf ends every page with a line break of its own
            Ok(text) if !text.trim().is_empty() => pages.push(text.trim_end().to_string()),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    "[DocumentLoader] Skipping PDF page {}: {}",
                    page_number,
                    e
                );
            }
        }
    }

    Ok(pages.join("\n"))
}
