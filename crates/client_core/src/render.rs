//! Front-end neutral render model of the gallery view.

use std::fmt::Write as _;

use serde::Serialize;
use shared::domain::ArtworkId;

use crate::{expansion::ImageSize, view::GalleryState};

pub const HEADING: &str = "Art Base One";
pub const ARTWORKS_HEADING: &str = "Artworks";
pub const LOADING_TITLES: &str = "Loading titles...";
pub const LOADING_ARTWORKS: &str = "Loading artworks...";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListSection<T> {
    Loading { placeholder: String },
    Loaded { items: Vec<T> },
}

impl<T> ListSection<T> {
    fn from_items(items: Vec<T>, placeholder: &str) -> Self {
        if items.is_empty() {
            ListSection::Loading {
                placeholder: placeholder.to_string(),
            }
        } else {
            ListSection::Loaded { items }
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListSection::Loading { .. } => &[],
            ListSection::Loaded { items } => items,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListSection::Loading { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkEntry {
    pub id: ArtworkId,
    pub title: String,
    pub image_url: Option<String>,
    pub alt: String,
    pub size: ImageSize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryView {
    pub heading: String,
    pub error_banner: Option<String>,
    pub titles: ListSection<String>,
    pub artworks_heading: String,
    pub artworks: ListSection<ArtworkEntry>,
}

/// The two lists are rendered independently of each other and of the
/// error banner.
pub fn render_gallery(state: &GalleryState) -> GalleryView {
    let expansion = state.expansion();
    let entries = state
        .artworks()
        .iter()
        .map(|artwork| ArtworkEntry {
            id: artwork.id,
            title: artwork.title.clone(),
            image_url: artwork.image_url.clone(),
            alt: artwork.title.clone(),
            size: expansion.size_of(artwork.id),
        })
        .collect();

    GalleryView {
        heading: HEADING.to_string(),
        error_banner: state.error_message().map(str::to_string),
        titles: ListSection::from_items(state.titles().to_vec(), LOADING_TITLES),
        artworks_heading: ARTWORKS_HEADING.to_string(),
        artworks: ListSection::from_items(entries, LOADING_ARTWORKS),
    }
}

pub fn render_text(view: &GalleryView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.heading);
    if let Some(banner) = &view.error_banner {
        let _ = writeln!(out, "! {banner}");
    }
    match &view.titles {
        ListSection::Loading { placeholder } => {
            let _ = writeln!(out, "{placeholder}");
        }
        ListSection::Loaded { items } => {
            for title in items {
                let _ = writeln!(out, "- {title}");
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.artworks_heading);
    match &view.artworks {
        ListSection::Loading { placeholder } => {
            let _ = writeln!(out, "{placeholder}");
        }
        ListSection::Loaded { items } => {
            for entry in items {
                let image = entry.image_url.as_deref().unwrap_or("no image");
                let _ = writeln!(
                    out,
                    "- {} [{image}] ({}px)",
                    entry.title,
                    entry.size.max_width()
                );
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
