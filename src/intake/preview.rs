use base64::prelude::*;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::cache::PreviewCache;
use crate::{FileId, RawHandle, Result, UploadedFile};

/// Outcome of a background preview read, keyed by the file it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewEvent {
    Ready { id: FileId, data_uri: String },
    Failed { id: FileId, reason: String },
}

impl PreviewEvent {
    pub fn id(&self) -> &FileId {
        match self {
            PreviewEvent::Ready { id, .. } | PreviewEvent::Failed { id, .. } => id,
        }
    }
}

pub fn data_uri(media_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, BASE64_STANDARD.encode(data))
}

/// Reads image content off the intake path and reports the encoded preview
/// on an event channel.
#[derive(Clone)]
pub struct PreviewGenerator {
    cache: PreviewCache,
    events: UnboundedSender<PreviewEvent>,
}

impl PreviewGenerator {
    pub fn new(cache: PreviewCache, events: UnboundedSender<PreviewEvent>) -> Self {
        Self { cache, events }
    }

    /// Must be called from within a tokio runtime. Exactly one event is sent
    /// per spawned read.
    pub fn spawn(&self, file: &UploadedFile) -> JoinHandle<()> {
        let id = file.id.clone();
        let media_type = file.media_type.clone();
        let handle = file.raw.clone();
        let cache = self.cache.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let event = match render(&cache, &media_type, &handle).await {
                Ok(data_uri) => {
                    debug!(file_id = %id, bytes = data_uri.len(), "preview ready");
                    PreviewEvent::Ready { id, data_uri }
                }
                Err(e) => {
                    warn!(file_id = %id, error = %e, "preview read failed");
                    PreviewEvent::Failed { id, reason: e.to_string() }
                }
            };

            if events.send(event).is_err() {
                debug!("preview receiver dropped");
            }
        })
    }
}

async fn render(cache: &PreviewCache, media_type: &str, handle: &RawHandle) -> Result<String> {
    let data = handle.read().await?;
    let key = format!("{}:{}", media_type, PreviewCache::digest(&data));

    if let Some(hit) = cache.get(&key).await {
        return Ok(hit);
    }

    let encoded = data_uri(media_type, &data);
    cache.put(key, encoded.clone()).await;
    Ok(encoded)
}
