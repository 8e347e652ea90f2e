pub mod cache;
pub mod preview;
pub mod validation;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::{IntakeConfig, RawFile, UploadedFile};
use cache::PreviewCache;
use preview::{PreviewEvent, PreviewGenerator};
use validation::IntakePolicy;

/// Result of one intake batch.
#[derive(Debug, Default)]
pub struct IntakeOutcome {
    /// Files that passed the policy, in input order.
    pub accepted: Vec<UploadedFile>,
    /// Message for the last rejected file of the batch, if any.
    pub error: Option<String>,
    pub rejected: usize,
}

pub struct FileIntake {
    policy: IntakePolicy,
    previews: PreviewGenerator,
}

impl FileIntake {
    pub fn new(policy: IntakePolicy, previews: PreviewGenerator) -> Self {
        Self { policy, previews }
    }

    pub fn from_config(config: &IntakeConfig, events: UnboundedSender<PreviewEvent>) -> Self {
        let cache = PreviewCache::new(config.preview_cache_size);
        Self::new(IntakePolicy::from_config(config), PreviewGenerator::new(cache, events))
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Validates the batch in order and starts a preview read for every
    /// accepted image. Accepted records are returned without waiting for
    /// those reads.
    pub fn process_batch(&self, batch: Vec<RawFile>) -> IntakeOutcome {
        let mut outcome = IntakeOutcome::default();

        for raw in batch {
            match self.policy.check(&raw) {
                Ok(()) => {
                    let file = UploadedFile::from_raw(raw);
                    if file.is_image() {
                        self.previews.spawn(&file);
                    }
                    outcome.accepted.push(file);
                }
                Err(rejection) => {
                    warn!(file = %raw.name, media_type = %raw.media_type, size = raw.size, "{}", rejection);
                    outcome.rejected += 1;
                    outcome.error = Some(rejection.to_string());
                }
            }
        }

        info!(accepted = outcome.accepted.len(), rejected = outcome.rejected, "intake batch processed");
        outcome
    }
}
