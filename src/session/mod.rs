//! Page-level state: the accepted files, the current selection, overlay
//! switches, the extracted-content tab and the single error slot.
//!
//! Preview reads finish in the background and arrive as [`PreviewEvent`]s;
//! the session only changes a file's preview when one of those events is
//! applied.

pub mod overlay;
pub mod viewer;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::export::{Export, ExportFormat};
use crate::intake::preview::PreviewEvent;
use crate::intake::validation::IntakePolicy;
use crate::intake::FileIntake;
use crate::processing::{ContentExtractor, LanguageDetector, MockContentExtractor, MockLanguageDetector};
use crate::{
    DetectedLanguage, ExtractedData, FileId, IntakeConfig, IntakeError, RawFile, Result, UploadedFile,
};
use overlay::{OverlayKind, OverlayToggles};
use viewer::ViewerContent;

const NO_DATA_SUMMARY: &str = "No data available to describe.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentTab {
    #[default]
    Markdown,
    Json,
    Natural,
}

impl FromStr for ContentTab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" => Ok(ContentTab::Markdown),
            "json" => Ok(ContentTab::Json),
            "natural" => Ok(ContentTab::Natural),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

pub struct Session {
    intake: FileIntake,
    detector: Box<dyn LanguageDetector>,
    extractor: Box<dyn ContentExtractor>,
    preview_events: UnboundedReceiver<PreviewEvent>,
    pending_previews: HashSet<FileId>,
    files: Vec<UploadedFile>,
    selected: Option<FileId>,
    languages: Vec<DetectedLanguage>,
    extracted: Option<ExtractedData>,
    overlays: OverlayToggles,
    active_tab: ContentTab,
    error: Option<String>,
}

impl Session {
    pub fn new(config: &IntakeConfig) -> Self {
        Self::with_collaborators(config, Box::new(MockLanguageDetector), Box::new(MockContentExtractor))
    }

    pub fn with_collaborators(
        config: &IntakeConfig,
        detector: Box<dyn LanguageDetector>,
        extractor: Box<dyn ContentExtractor>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            intake: FileIntake::from_config(config, tx),
            detector,
            extractor,
            preview_events: rx,
            pending_previews: HashSet::new(),
            files: Vec::new(),
            selected: None,
            languages: Vec::new(),
            extracted: None,
            overlays: OverlayToggles::default(),
            active_tab: ContentTab::default(),
            error: None,
        }
    }

    /// Runs one intake batch. Accepted files are handed to the detector and
    /// extractor and appended once both succeed; a batch with nothing
    /// accepted leaves the session untouched apart from the error slot.
    ///
    /// When a collaborator fails, no file of the batch is kept and the
    /// failure is recorded in the error slot.
    ///
    /// Returns the ids of the accepted files, in input order.
    pub async fn upload(&mut self, batch: Vec<RawFile>) -> Result<Vec<FileId>> {
        let outcome = self.intake.process_batch(batch);
        self.error = outcome.error;

        if outcome.accepted.is_empty() {
            return Ok(Vec::new());
        }

        let (languages, extracted) = match self.analyze(&outcome.accepted).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, files = outcome.accepted.len(), "batch discarded");
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        let ids: Vec<FileId> = outcome.accepted.iter().map(|f| f.id.clone()).collect();
        for file in &outcome.accepted {
            if file.is_image() {
                self.pending_previews.insert(file.id.clone());
            }
        }
        self.files.extend(outcome.accepted);
        self.languages = languages;
        self.extracted = Some(extracted);

        info!(files = self.files.len(), languages = self.languages.len(), "session updated");
        Ok(ids)
    }

    async fn analyze(&self, batch: &[UploadedFile]) -> Result<(Vec<DetectedLanguage>, ExtractedData)> {
        let languages = self.detector.detect(batch).await?;
        let extracted = self.extractor.extract(batch).await?;
        Ok((languages, extracted))
    }

    /// Attaches a finished preview to its file. Events for files no longer in
    /// the session are dropped. Returns whether a file was updated.
    pub fn apply_preview(&mut self, event: PreviewEvent) -> bool {
        self.pending_previews.remove(event.id());

        let Some(file) = self.files.iter_mut().find(|f| f.id == *event.id()) else {
            debug!(file_id = %event.id(), "preview for unknown file ignored");
            return false;
        };

        match event {
            PreviewEvent::Ready { data_uri, .. } => {
                file.preview = Some(data_uri);
                true
            }
            PreviewEvent::Failed { reason, .. } => {
                warn!(file = %file.name, %reason, "no preview available");
                false
            }
        }
    }

    /// Applies every preview event that has already arrived.
    pub fn drain_previews(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.preview_events.try_recv() {
            if self.apply_preview(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits until every outstanding preview read has reported back.
    pub async fn wait_for_previews(&mut self) -> usize {
        let mut applied = self.drain_previews();
        while !self.pending_previews.is_empty() {
            match self.preview_events.recv().await {
                Some(event) => {
                    if self.apply_preview(event) {
                        applied += 1;
                    }
                }
                None => break,
            }
        }
        applied
    }

    pub fn pending_previews(&self) -> usize {
        self.pending_previews.len()
    }

    pub fn select(&mut self, id: &FileId) -> Result<&UploadedFile> {
        let file = self
            .files
            .iter()
            .find(|f| f.id == *id)
            .ok_or_else(|| IntakeError::NotFound(id.to_string()))?;
        self.selected = Some(id.clone());
        Ok(file)
    }

    pub fn selected_file(&self) -> Option<&UploadedFile> {
        let id = self.selected.as_ref()?;
        self.files.iter().find(|f| f.id == *id)
    }

    /// Drops a file from the accepted set, clearing the selection if it
    /// pointed at it. A preview still in flight for it is discarded on
    /// arrival.
    pub fn remove(&mut self, id: &FileId) -> Result<UploadedFile> {
        let index = self
            .files
            .iter()
            .position(|f| f.id == *id)
            .ok_or_else(|| IntakeError::NotFound(id.to_string()))?;

        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.pending_previews.remove(id);

        let removed = self.files.remove(index);
        info!(file = %removed.name, "file removed");
        Ok(removed)
    }

    pub fn toggle_overlay(&mut self, kind: OverlayKind) -> bool {
        self.overlays.toggle(kind)
    }

    pub fn set_tab(&mut self, tab: ContentTab) {
        self.active_tab = tab;
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn file(&self, id: &FileId) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.id == *id)
    }

    pub fn languages(&self) -> &[DetectedLanguage] {
        &self.languages
    }

    pub fn extracted(&self) -> Option<&ExtractedData> {
        self.extracted.as_ref()
    }

    pub fn overlays(&self) -> &OverlayToggles {
        &self.overlays
    }

    pub fn active_tab(&self) -> ContentTab {
        self.active_tab
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn policy(&self) -> &IntakePolicy {
        self.intake.policy()
    }

    pub fn viewer(&self) -> ViewerContent {
        ViewerContent::render(self.selected_file(), &self.overlays)
    }

    pub fn summary(&self) -> String {
        match &self.extracted {
            Some(data) => data.json.describe(),
            None => NO_DATA_SUMMARY.to_string(),
        }
    }

    /// `None` when nothing has been extracted yet.
    pub fn export(&self, format: ExportFormat) -> Result<Option<Export>> {
        self.extracted
            .as_ref()
            .map(|data| Export::new(format, data))
            .transpose()
    }

    pub async fn export_to<P: AsRef<Path>>(&self, format: ExportFormat, dir: P) -> Result<Option<PathBuf>> {
        match self.export(format)? {
            Some(export) => Ok(Some(export.write_to(dir).await?)),
            None => Ok(None),
        }
    }
}
