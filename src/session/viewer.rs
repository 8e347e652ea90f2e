use serde::Serialize;

use super::overlay::{OverlayKind, OverlayToggles};
use crate::UploadedFile;

/// What the document viewer shows for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewerContent {
    Empty,
    Image {
        name: String,
        /// `None` until the preview read has been applied.
        preview: Option<String>,
        overlays: Vec<OverlayKind>,
    },
    Document {
        name: String,
        size_label: String,
        notice: &'static str,
        overlay_badges: Vec<String>,
    },
}

impl ViewerContent {
    pub fn render(selected: Option<&UploadedFile>, overlays: &OverlayToggles) -> Self {
        let Some(file) = selected else {
            return ViewerContent::Empty;
        };

        if file.is_image() {
            return ViewerContent::Image {
                name: file.name.clone(),
                preview: file.preview.clone(),
                overlays: overlays.active(),
            };
        }

        let notice = if file.file_type().is_pdf() {
            "PDF preview requires backend processing"
        } else {
            "Document preview requires backend processing"
        };

        ViewerContent::Document {
            name: file.name.clone(),
            size_label: file.size_label(),
            notice,
            overlay_badges: if overlays.any_active() {
                overlays
                    .active()
                    .into_iter()
                    .map(|k| format!("{} overlay active", k.label()))
                    .collect()
            } else {
                Vec::new()
            },
        }
    }
}
