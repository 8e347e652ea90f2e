use async_trait::async_trait;

use super::ContentExtractor;
use crate::{ExtractedData, Result, Section, StructuredDocument, UploadedFile};

const SAMPLE_MARKDOWN: &str = "# Document Title\n\n\
This is a sample extracted document with **bold text** and *italic text*.\n\n\
## Section 1\n\n\
Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n\n\
- Item 1\n- Item 2\n- Item 3";

/// Returns a fixed sample document regardless of input.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockContentExtractor;

impl MockContentExtractor {
    pub fn sample() -> ExtractedData {
        ExtractedData {
            markdown: SAMPLE_MARKDOWN.to_string(),
            json: StructuredDocument {
                title: Some("Document Title".to_string()),
                sections: vec![
                    Section::Heading { level: 1, text: "Document Title".to_string() },
                    Section::Paragraph {
                        text: "This is a sample extracted document with bold text and italic text.".to_string(),
                    },
                    Section::Heading { level: 2, text: "Section 1".to_string() },
                    Section::List {
                        items: vec!["Item 1".to_string(), "Item 2".to_string(), "Item 3".to_string()],
                    },
                ],
            },
        }
    }
}

#[async_trait]
impl ContentExtractor for MockContentExtractor {
    async fn extract(&self, _files: &[UploadedFile]) -> Result<ExtractedData> {
        Ok(Self::sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_fixture_layout() {
        let data = MockContentExtractor::sample();
        assert!(data.markdown.starts_with("# Document Title\n\nThis is a sample"));
        assert!(data.markdown.ends_with("- Item 1\n- Item 2\n- Item 3"));
    }

    #[tokio::test]
    async fn sample_summary() {
        let data = MockContentExtractor.extract(&[]).await.unwrap();
        assert_eq!(
            data.json.describe(),
            "This document contains 4 sections. The main title is \"Document Title\". \
             It includes 2 headings for structure. There is 1 paragraph of content. \
             The document contains 1 list with a total of 3 items."
        );
        assert_eq!(data.json.outline()[3], "List with 3 items");
    }
}
