use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Text,
    Tables,
    Images,
    Headings,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 4] = [
        OverlayKind::Text,
        OverlayKind::Tables,
        OverlayKind::Images,
        OverlayKind::Headings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OverlayKind::Text => "Text",
            OverlayKind::Tables => "Tables",
            OverlayKind::Images => "Images",
            OverlayKind::Headings => "Headings",
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OverlayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OverlayKind::Text),
            "tables" => Ok(OverlayKind::Tables),
            "images" => Ok(OverlayKind::Images),
            "headings" => Ok(OverlayKind::Headings),
            other => Err(format!("unknown overlay '{}' (expected text, tables, images or headings)", other)),
        }
    }
}

/// Independent on/off switches, all off initially.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayToggles {
    pub text: bool,
    pub tables: bool,
    pub images: bool,
    pub headings: bool,
}

impl OverlayToggles {
    fn slot(&mut self, kind: OverlayKind) -> &mut bool {
        match kind {
            OverlayKind::Text => &mut self.text,
            OverlayKind::Tables => &mut self.tables,
            OverlayKind::Images => &mut self.images,
            OverlayKind::Headings => &mut self.headings,
        }
    }

    /// Flips one switch and returns its new value.
    pub fn toggle(&mut self, kind: OverlayKind) -> bool {
        let slot = self.slot(kind);
        *slot = !*slot;
        *slot
    }

    pub fn is_active(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::Text => self.text,
            OverlayKind::Tables => self.tables,
            OverlayKind::Images => self.images,
            OverlayKind::Headings => self.headings,
        }
    }

    pub fn active(&self) -> Vec<OverlayKind> {
        OverlayKind::ALL.into_iter().filter(|k| self.is_active(*k)).collect()
    }

    pub fn any_active(&self) -> bool {
        OverlayKind::ALL.iter().any(|k| self.is_active(*k))
    }
}
