use serde::{Deserialize, Serialize};

use crate::domain::Artwork;

/// `GET /artworks/titles`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitlesResponse {
    pub titles: Vec<String>,
}

/// `GET /artworks`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworksResponse {
    pub data: Vec<Artwork>,
}

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}
