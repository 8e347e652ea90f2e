mod content;
mod file;
mod upload;

pub use content::{DetectedLanguage, ExtractedData, Section, StructuredDocument};
pub use file::{FileType, FileTypeDetector, ImageType, DocumentType, IMAGE_PREFIX, PDF_MIME, DOCX_MIME, OCTET_STREAM_MIME};
pub use upload::{FileId, RawFile, RawHandle, UploadedFile};
