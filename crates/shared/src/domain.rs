use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ArtworkId);

/// One row of the backend's `art_list` view.
///
/// Only `id` and `title` are required. The backend column behind `image_url`
/// is nullable, and the descriptive columns are optional; anything else the
/// view adds is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi_res_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Artwork {
    pub fn new(id: i64, title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: ArtworkId(id),
            title: title.into(),
            image_url: Some(image_url.into()),
            hi_res_url: None,
            year: None,
            description: None,
        }
    }
}
