use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::info;

use crate::{ExtractedData, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
    All,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Markdown, ExportFormat::All];

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "extracted-data.json",
            ExportFormat::Markdown => "extracted-content.md",
            ExportFormat::All => "all-extracted-content.txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::All => "text/plain",
        }
    }

    pub fn render(&self, data: &ExtractedData) -> Result<String> {
        Ok(match self {
            ExportFormat::Json => serde_json::to_string_pretty(&data.json)?,
            ExportFormat::Markdown => data.markdown.clone(),
            ExportFormat::All => format!(
                "=== MARKDOWN ===\n{}\n\n=== JSON ===\n{}",
                data.markdown,
                serde_json::to_string_pretty(&data.json)?
            ),
        })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "markdown",
            ExportFormat::All => "all",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "all" => Ok(ExportFormat::All),
            other => Err(format!("unknown export format '{}' (expected json, markdown or all)", other)),
        }
    }
}

/// A rendered export, ready to be written or handed to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl Export {
    pub fn new(format: ExportFormat, data: &ExtractedData) -> Result<Self> {
        Ok(Self {
            file_name: format.file_name(),
            content_type: format.content_type(),
            body: format.render(data)?,
        })
    }

    /// Writes the export into `dir` under its fixed file name, replacing any
    /// previous export of the same format.
    pub async fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await?;
        let path = dir.join(self.file_name);
        fs::write(&path, &self.body).await?;
        info!(path = %path.display(), content_type = self.content_type, bytes = self.body.len(), "export written");
        Ok(path)
    }
}
