use serde::{Deserialize, Serialize};

/// Longest section text shown verbatim in an outline entry.
const OUTLINE_TEXT_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    pub language: String,
    /// Percentage in `0.0..=100.0`.
    pub confidence: f64,
}

impl DetectedLanguage {
    pub fn new(language: impl Into<String>, confidence: f64) -> Self {
        Self { language: language.into(), confidence }
    }

    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Section {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
}

impl Section {
    pub fn kind(&self) -> &'static str {
        match self {
            Section::Heading { .. } => "heading",
            Section::Paragraph { .. } => "paragraph",
            Section::List { .. } => "list",
        }
    }

    /// One-line description used in the content structure listing,
    /// e.g. `Heading (Level 2): "Section 1"`. Empty text and a zero level
    /// are left out.
    pub fn outline(&self) -> String {
        let kind = self.kind();
        let mut line = kind[..1].to_ascii_uppercase() + &kind[1..];

        match self {
            Section::Heading { level, text } => {
                if *level > 0 {
                    line.push_str(&format!(" (Level {})", level));
                }
                push_text(&mut line, text);
            }
            Section::Paragraph { text } => push_text(&mut line, text),
            Section::List { items } => line.push_str(&format!(" with {} items", items.len())),
        }

        line
    }
}

fn push_text(line: &mut String, text: &str) {
    if !text.is_empty() {
        line.push_str(&format!(": \"{}\"", truncate(text)));
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(OUTLINE_TEXT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl StructuredDocument {
    pub fn describe(&self) -> String {
        let mut description = format!("This document contains {} sections. ", self.sections.len());

        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            description.push_str(&format!("The main title is \"{}\". ", title));
        }

        let headings = self.count(|s| matches!(s, Section::Heading { .. }));
        let paragraphs = self.count(|s| matches!(s, Section::Paragraph { .. }));
        let lists: Vec<&Vec<String>> = self
            .sections
            .iter()
            .filter_map(|s| match s {
                Section::List { items } => Some(items),
                _ => None,
            })
            .collect();

        if headings > 0 {
            description.push_str(&format!(
                "It includes {} heading{} for structure. ",
                headings,
                plural(headings)
            ));
        }

        if paragraphs > 0 {
            description.push_str(&format!(
                "There {} {} paragraph{} of content. ",
                if paragraphs == 1 { "is" } else { "are" },
                paragraphs,
                plural(paragraphs)
            ));
        }

        if !lists.is_empty() {
            let total_items: usize = lists.iter().map(|items| items.len()).sum();
            description.push_str(&format!(
                "The document contains {} list{} with a total of {} items.",
                lists.len(),
                plural(lists.len()),
                total_items
            ));
        }

        description
    }

    pub fn outline(&self) -> Vec<String> {
        self.sections.iter().map(Section::outline).collect()
    }

    fn count(&self, pred: impl Fn(&Section) -> bool) -> usize {
        self.sections.iter().filter(|s| pred(s)).count()
    }
}

fn plural(n: usize) -> &'static str {
    if n > 1 { "s" } else { "" }
}

/// Extracted content in its two export shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub markdown: String,
    pub json: StructuredDocument,
}
