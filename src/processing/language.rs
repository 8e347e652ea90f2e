use async_trait::async_trait;

use super::LanguageDetector;
use crate::{DetectedLanguage, Result, UploadedFile};

/// Reports the same three languages for any batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockLanguageDetector;

#[async_trait]
impl LanguageDetector for MockLanguageDetector {
    async fn detect(&self, _files: &[UploadedFile]) -> Result<Vec<DetectedLanguage>> {
        Ok(vec![
            DetectedLanguage::new("English", 95.2),
            DetectedLanguage::new("Spanish", 3.1),
            DetectedLanguage::new("French", 1.7),
        ])
    }
}
