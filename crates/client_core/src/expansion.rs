//! Click-to-enlarge selection for artwork images.

use serde::Serialize;
use shared::domain::ArtworkId;

pub const DEFAULT_IMAGE_WIDTH: f32 = 200.0;
pub const EXPANDED_IMAGE_WIDTH: f32 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    Default,
    Expanded,
}

impl ImageSize {
    /// Maximum display width in logical pixels; height follows the aspect ratio.
    pub fn max_width(self) -> f32 {
        match self {
            ImageSize::Default => DEFAULT_IMAGE_WIDTH,
            ImageSize::Expanded => EXPANDED_IMAGE_WIDTH,
        }
    }
}

/// At most one artwork is expanded at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionTracker {
    expanded: Option<ArtworkId>,
}

impl ExpansionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses `id` if it is the expanded artwork, otherwise expands it
    /// (collapsing whichever artwork was expanded before).
    pub fn toggle(&mut self, id: ArtworkId) {
        self.expanded = match self.expanded {
            Some(current) if current == id => None,
            _ => Some(id),
        };
    }

    pub fn expanded(&self) -> Option<ArtworkId> {
        self.expanded
    }

    pub fn is_expanded(&self, id: ArtworkId) -> bool {
        self.expanded == Some(id)
    }

    pub fn size_of(&self, id: ArtworkId) -> ImageSize {
        if self.is_expanded(id) {
            ImageSize::Expanded
        } else {
            ImageSize::Default
        }
    }
}
