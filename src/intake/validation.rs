use thiserror::Error;

use crate::config::{default_accepted_types, MAX_FILE_SIZE};
use crate::{IntakeConfig, RawFile};

const MIB: u64 = 1024 * 1024;

/// Why a candidate file was turned away. The display text is the message
/// shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("File type {0} is not supported. Please upload JPG, PNG, JPEG, PDF, or DOCX files.")]
    UnsupportedType(String),
    #[error("File size exceeds {} limit.", format_limit(.limit))]
    TooLarge { size: u64, limit: u64 },
}

fn format_limit(limit: &u64) -> String {
    let limit = *limit;
    if limit % MIB == 0 {
        format!("{}MB", limit / MIB)
    } else {
        format!("{} bytes", limit)
    }
}

#[derive(Debug, Clone)]
pub struct IntakePolicy {
    accepted_types: Vec<String>,
    max_file_size: u64,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            accepted_types: default_accepted_types(),
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl IntakePolicy {
    pub fn new(accepted_types: Vec<String>, max_file_size: u64) -> Self {
        Self { accepted_types, max_file_size }
    }

    pub fn from_config(config: &IntakeConfig) -> Self {
        Self::new(config.accepted_types.clone(), config.max_file_size)
    }

    pub fn accepted_types(&self) -> &[String] {
        &self.accepted_types
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Type is checked before size; the size bound is inclusive.
    pub fn check(&self, file: &RawFile) -> std::result::Result<(), Rejection> {
        if !self.accepted_types.iter().any(|t| *t == file.media_type) {
            return Err(Rejection::UnsupportedType(file.media_type.clone()));
        }

        if file.size > self.max_file_size {
            return Err(Rejection::TooLarge { size: file.size, limit: self.max_file_size });
        }

        Ok(())
    }
}
