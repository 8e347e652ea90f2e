use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, File};
use tokio::io::AsyncReadExt;
use uuid::Uuid;

use super::{FileType, FileTypeDetector, IMAGE_PREFIX};
use crate::{IntakeError, Result};

/// Bytes read from the head of a file on disk to sniff its media type.
const SNIFF_LEN: u64 = 64 * 1024;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Session-unique file identifier: a millisecond timestamp followed by a
/// random suffix. Uniqueness is best effort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    pub fn generate() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", Utc::now().timestamp_millis(), &suffix[..10]))
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to the original content of a candidate file.
#[derive(Debug, Clone)]
pub enum RawHandle {
    Memory(Arc<[u8]>),
    Path(PathBuf),
}

impl RawHandle {
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        RawHandle::Memory(Arc::from(data))
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        match self {
            RawHandle::Memory(data) => Ok(data.to_vec()),
            RawHandle::Path(path) => Ok(fs::read(path).await?),
        }
    }
}

/// A candidate file as handed to the intake, before validation.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub handle: RawHandle,
}

impl RawFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size: u64, handle: RawHandle) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
            handle,
        }
    }

    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        let size = data.len() as u64;
        Self::new(name, media_type, size, RawHandle::from_bytes(data))
    }

    /// Builds a candidate from a file on disk. The declared media type is
    /// sniffed from the content; the content itself stays on disk.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(IntakeError::NotFound(path.display().to_string()));
        }

        let mut head = Vec::new();
        File::open(path).await?.take(SNIFF_LEN).read_to_end(&mut head).await?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| IntakeError::NotFound(format!("invalid file name: {}", path.display())))?;

        Ok(Self::new(
            name,
            FileTypeDetector::declared_type(&head, path),
            metadata.len(),
            RawHandle::Path(path.to_owned()),
        ))
    }
}

/// A file that passed the intake policy.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub preview: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip)]
    pub raw: RawHandle,
}

impl UploadedFile {
    pub(crate) fn from_raw(raw: RawFile) -> Self {
        Self {
            id: FileId::generate(),
            name: raw.name,
            media_type: raw.media_type,
            size: raw.size,
            preview: None,
            uploaded_at: Utc::now(),
            raw: raw.handle,
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_media_type(&self.media_type)
    }

    /// Images get a preview; the check is on the declared type prefix.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with(IMAGE_PREFIX)
    }

    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / BYTES_PER_MB)
    }
}
