use serde::{Deserialize, Serialize};
use std::path::Path;

pub const IMAGE_PREFIX: &str = "image/";
pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const OCTET_STREAM_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileType {
    Image(ImageType),
    Document(DocumentType),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageType {
    Jpeg,
    Png,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentType {
    Pdf,
    Docx,
    Other(String),
}

impl FileType {
    /// Classifies a declared media type string.
    pub fn from_media_type(media_type: &str) -> Self {
        match media_type {
            "image/jpeg" | "image/jpg" => FileType::Image(ImageType::Jpeg),
            "image/png" => FileType::Image(ImageType::Png),
            PDF_MIME => FileType::Document(DocumentType::Pdf),
            DOCX_MIME => FileType::Document(DocumentType::Docx),
            mime if mime.starts_with(IMAGE_PREFIX) =>
                FileType::Image(ImageType::Other(mime.to_string())),
            mime if mime.starts_with("application/") =>
                FileType::Document(DocumentType::Other(mime.to_string())),
            _ => FileType::Unknown,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, FileType::Image(_))
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, FileType::Document(DocumentType::Pdf))
    }
}

pub struct FileTypeDetector;

impl FileTypeDetector {
    /// Sniffs the media type from the leading bytes of the content.
    pub fn detect(data: &[u8]) -> Option<String> {
        infer::get(data).map(|kind| kind.mime_type().to_string())
    }

    pub fn from_extension(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "pdf" => Some(PDF_MIME),
            "docx" => Some(DOCX_MIME),
            _ => None,
        }
    }

    /// Media type a file on disk is declared with: sniffed content first,
    /// then extension, then `application/octet-stream`.
    ///
    /// A bare zip signature defers to the extension since a `.docx` whose
    /// parts lie past the sniffed head only shows up as a zip archive.
    pub fn declared_type(data: &[u8], path: &Path) -> String {
        match Self::detect(data) {
            Some(mime) if mime == "application/zip" => Self::from_extension(path)
                .map(str::to_string)
                .unwrap_or(mime),
            Some(mime) => mime,
            None => Self::from_extension(path)
                .map(str::to_string)
                .unwrap_or_else(|| OCTET_STREAM_MIME.to_string()),
        }
    }
}
