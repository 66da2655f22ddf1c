//! UI layer for the gallery window.

pub mod app;

pub use app::GalleryApp;
