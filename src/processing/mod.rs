//! Collaborators that turn an accepted batch into detected languages and
//! extracted content. The bundled implementations return fixed fixtures.

mod extraction;
mod language;

use async_trait::async_trait;

use crate::{DetectedLanguage, ExtractedData, Result, UploadedFile};

pub use extraction::MockContentExtractor;
pub use language::MockLanguageDetector;

#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, files: &[UploadedFile]) -> Result<Vec<DetectedLanguage>>;
}

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, files: &[UploadedFile]) -> Result<ExtractedData>;
}
