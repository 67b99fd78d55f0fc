//! Reads files from disk into upload handles.

use std::path::Path;

use docent_core::document::{ACCEPTED_UPLOAD_EXTENSIONS, UploadedFile};
use docent_core::{DocentError, Result};

/// Reads `path` into an [`UploadedFile`].
///
/// Only `pdf`, `txt` and `md` files are accepted (case-insensitive). The media
/// type is guessed from the extension.
pub async fn read_upload(path: &Path) -> Result<UploadedFile> {
    let media_type = upload_media_type(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = tokio::fs::read(path).await?;
    tracing::info!(
        "[Upload] Read '{}' as {} ({} bytes)",
        name,
        media_type,
        bytes.len()
    );

    Ok(UploadedFile::new(name, media_type, bytes))
}

/// Validates the extension and returns the media type for it.
pub fn upload_media_type(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| DocentError::UnsupportedUpload(path.display().to_string()))?;

    if !ACCEPTED_UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
        return Err(DocentError::UnsupportedUpload(format!(
            "{} (accepted: {})",
            path.display(),
            ACCEPTED_UPLOAD_EXTENSIONS.join(", ")
        )));
    }

    // pinned so uploads report the same media type on every platform
    if extension == "md" {
        return Ok("text/markdown".to_string());
    }

    Ok(mime_guess::from_ext(&extension)
        .first_or_text_plain()
        .essence_str()
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_types_for_accepted_extensions() {
        assert_eq!(
            upload_media_type(Path::new("manual.PDF")).unwrap(),
            "application/pdf"
        );
        assert_eq!(upload_media_type(Path::new("notes.txt")).unwrap(), "text/plain");
        for name in ["guide.md", "GUIDE.MD"] {
            assert_eq!(upload_media_type(Path::new(name)).unwrap(), "text/markdown");
        }
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["slides.pptx", "image.png", "README"] {
            let err = upload_media_type(Path::new(name)).unwrap_err();
            assert!(matches!(err, DocentError::UnsupportedUpload(_)), "{name}");
        }
    }

    #[tokio::test]
    async fn test_read_upload_keeps_name_and_bytes() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let upload = read_upload(&path).await.unwrap();
        assert_eq!(upload.name, "notes.txt");
        assert_eq!(upload.media_type, "text/plain");
        assert_eq!(upload.bytes, b"hello");
    }

    #[tokio::test]
    async fn test_read_upload_missing_file_is_io_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let err = read_upload(&temp_dir.path().join("gone.md")).await.unwrap_err();
        assert!(err.is_io());
    }
}
