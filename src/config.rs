use std::env;
use std::path::PathBuf;

use crate::{IntakeError, Result, DOCX_MIME, PDF_MIME};

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_PREVIEW_CACHE: usize = 64;

pub const ENV_MAX_FILE_SIZE: &str = "DOC_INTAKE_MAX_FILE_SIZE";
pub const ENV_ACCEPTED_TYPES: &str = "DOC_INTAKE_ACCEPTED_TYPES";
pub const ENV_EXPORT_DIR: &str = "DOC_INTAKE_EXPORT_DIR";
pub const ENV_PREVIEW_CACHE: &str = "DOC_INTAKE_PREVIEW_CACHE";

pub fn default_accepted_types() -> Vec<String> {
    ["image/jpeg", "image/jpg", "image/png", PDF_MIME, DOCX_MIME]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub max_file_size: u64,
    pub accepted_types: Vec<String>,
    pub export_dir: PathBuf,
    pub preview_cache_size: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            accepted_types: default_accepted_types(),
            export_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            preview_cache_size: DEFAULT_PREVIEW_CACHE,
        }
    }
}

impl IntakeConfig {
    /// Defaults overridden by `DOC_INTAKE_*` variables, reading `.env` first
    /// when one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_FILE_SIZE) {
            config.max_file_size = raw
                .trim()
                .parse()
                .map_err(|e| IntakeError::Config(format!("{}={}: {}", ENV_MAX_FILE_SIZE, raw, e)))?;
        }

        if let Some(raw) = lookup(ENV_ACCEPTED_TYPES) {
            let types: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            if types.is_empty() {
                return Err(IntakeError::Config(format!("{} lists no media types", ENV_ACCEPTED_TYPES)));
            }
            config.accepted_types = types;
        }

        if let Some(raw) = lookup(ENV_EXPORT_DIR) {
            config.export_dir = PathBuf::from(raw);
        }

        if let Some(raw) = lookup(ENV_PREVIEW_CACHE) {
            let size: usize = raw
                .trim()
                .parse()
                .map_err(|e| IntakeError::Config(format!("{}={}: {}", ENV_PREVIEW_CACHE, raw, e)))?;
            if size == 0 {
                return Err(IntakeError::Config(format!("{} must be at least 1", ENV_PREVIEW_CACHE)));
            }
            config.preview_cache_size = size;
        }

        Ok(config)
    }
}
