use docent_core::DocentError;
use docent_core::document::{DocumentLoader, DocumentSource, UploadedFile};
use docent_infrastructure::FileDocumentLoader;
use docent_infrastructure::document_loader::extract_pdf_text;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tempfile::TempDir;

const DEFAULT_TEXT: &str = "조명 색온도는 3000K~6500K입니다.";

fn loader_with_default(temp_dir: &TempDir, content: Option<&[u8]>) -> FileDocumentLoader {
    let path = temp_dir.path().join("조명에대한모든것.md");
    if let Some(content) = content {
        std::fs::write(&path, content).unwrap();
    }
    FileDocumentLoader::new(path)
}

/// Builds a PDF with one page per entry; an empty entry is a blank page.
fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in texts {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[tokio::test]
async fn test_loads_default_document() {
    let temp_dir = TempDir::new().unwrap();
    let loader = loader_with_default(&temp_dir, Some(DEFAULT_TEXT.as_bytes()));

    let doc = loader.load(None).await.expect("default document should load");
    assert_eq!(doc.raw_text, DEFAULT_TEXT);
    assert_eq!(doc.source, DocumentSource::DefaultFile);
}

#[tokio::test]
async fn test_missing_default_is_empty_not_error() {
    let temp_dir = TempDir::new().unwrap();
    let loader = loader_with_default(&temp_dir, None);

    let doc = loader.load(None).await.expect("missing default is not fatal");
    assert!(doc.is_empty());
}

#[tokio::test]
async fn test_default_with_invalid_utf8_is_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let loader = loader_with_default(&temp_dir, Some(&[0xc3, 0x28, 0xff]));

    let err = loader.load(None).await.unwrap_err();
    assert!(matches!(err, DocentError::Decode { .. }));
}

#[tokio::test]
async fn test_default_path_is_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let loader = FileDocumentLoader::new(temp_dir.path());

    let err = loader.load(None).await.unwrap_err();
    assert!(err.is_io());
}

#[tokio::test]
async fn test_text_upload_supersedes_default() {
    let temp_dir = TempDir::new().unwrap();
    let loader = loader_with_default(&temp_dir, Some(DEFAULT_TEXT.as_bytes()));
    let upload = UploadedFile::new(
        "humidity.md",
        "text/markdown",
        "적정 습도는 40~60%입니다.".as_bytes().to_vec(),
    );

    let doc = loader.load(Some(&upload)).await.unwrap();
    assert_eq!(doc.raw_text, "적정 습도는 40~60%입니다.");
    assert_eq!(doc.source, DocumentSource::Uploaded);

    // Default comes back once the upload is gone
    let doc = loader.load(None).await.unwrap();
    assert_eq!(doc.raw_text, DEFAULT_TEXT);
}

#[tokio::test]
async fn test_upload_is_reread_every_call() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.md");
    std::fs::write(&path, "v1").unwrap();
    let loader = FileDocumentLoader::new(&path);

    assert_eq!(loader.load(None).await.unwrap().raw_text, "v1");
    std::fs::write(&path, "v2").unwrap();
    assert_eq!(loader.load(None).await.unwrap().raw_text, "v2");
}

#[tokio::test]
async fn test_corrupt_pdf_upload_is_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let loader = loader_with_default(&temp_dir, Some(DEFAULT_TEXT.as_bytes()));
    let upload = UploadedFile::new("broken.pdf", "application/pdf", b"not a pdf".to_vec());

    let err = loader.load(Some(&upload)).await.unwrap_err();
    assert!(matches!(err, DocentError::Decode { .. }));
}

#[test]
fn test_extract_pdf_text_joins_non_empty_pages() {
    let bytes = pdf_with_pages(&["Color temp 3000K", "", "Humidity 40"]);

    let text = extract_pdf_text(&bytes).unwrap();
    assert_eq!(text, "Color temp 3000K\nHumidity 40");
}

#[tokio::test]
async fn test_pdf_upload_supersedes_default() {
    let temp_dir = TempDir::new().unwrap();
    let loader = loader_with_default(&temp_dir, Some(DEFAULT_TEXT.as_bytes()));
    let upload = UploadedFile::new(
        "lighting.pdf",
        "application/pdf",
        pdf_with_pages(&["Color temp 3000K"]),
    );

    let doc = loader.load(Some(&upload)).await.unwrap();
    assert_eq!(doc.raw_text, "Color temp 3000K");
    assert_eq!(doc.source, DocumentSource::Uploaded);
}

#[test]
fn test_extract_pdf_text_rejects_garbage() {
    assert!(extract_pdf_text(b"%PDF-garbage").is_err());
}
