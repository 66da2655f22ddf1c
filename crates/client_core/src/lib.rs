use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{Artwork, ArtworkId},
    error::ApiError,
    protocol::{ArtworksResponse, RootResponse, TitlesResponse},
};
use tracing::debug;
use url::Url;

pub mod config;
pub mod error;
pub mod expansion;
pub mod render;
pub mod view;

pub use config::Settings;
pub use error::FetchError;
pub use expansion::{ExpansionTracker, ImageSize};
pub use render::{render_text, ArtworkEntry, GalleryView, ListSection};
pub use view::{GalleryController, GalleryEvent, GalleryState, MountId};

pub const TITLES_PATH: &str = "/artworks/titles";

/// Read-only view of the artwork API.
#[async_trait]
pub trait ArtworkApi: Send + Sync {
    async fn fetch_titles(&self) -> Result<Vec<String>, FetchError>;
    async fn fetch_artworks(&self) -> Result<Vec<Artwork>, FetchError>;
    async fn fetch_artwork(&self, id: ArtworkId) -> Result<Artwork, FetchError>;
    async fn fetch_root_message(&self) -> Result<String, FetchError>;
}

#[derive(Clone)]
pub struct HttpArtworkClient {
    http: Client,
    base: Url,
    artworks_path: String,
}

impl HttpArtworkClient {
    pub fn new(base: Url) -> Self {
        Self::with_http(Client::new(), base)
    }

    fn with_http(http: Client, base: Url) -> Self {
        Self {
            http,
            base,
            artworks_path: Settings::default().artworks_path,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let base = settings.api_base_url()?;
        Ok(Self::with_http(http, base).with_artworks_path(settings.artworks_path()))
    }

    pub fn with_artworks_path(mut self, path: impl Into<String>) -> Self {
        self.artworks_path = path.into();
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base.as_str().trim_end_matches('/'))
    }

    /// Image URLs in artwork rows may be relative; they resolve against the
    /// API base the way a page would resolve them against its own URL.
    pub fn resolve_image_url(&self, raw: &str) -> Result<Url, FetchError> {
        match Url::parse(raw) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.base.join(raw).map_err(|source| FetchError::InvalidUrl {
                    value: raw.to_string(),
                    source,
                })
            }
            Err(source) => Err(FetchError::InvalidUrl {
                value: raw.to_string(),
                source,
            }),
        }
    }

    pub async fn fetch_image(&self, raw_url: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.resolve_image_url(raw_url)?.to_string();
        let res = self.send_get(&url).await?;
        let bytes = res
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { url, source })?;
        Ok(bytes.to_vec())
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!(%url, "GET");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.json::<ApiError>().await.ok().map(|body| body.message());
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                detail,
            });
        }
        Ok(res)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        let res = self.send_get(&url).await?;
        let bytes = res.bytes().await.map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl ArtworkApi for HttpArtworkClient {
    async fn fetch_titles(&self) -> Result<Vec<String>, FetchError> {
        let body: TitlesResponse = self.get_json(TITLES_PATH).await?;
        Ok(body.titles)
    }

    async fn fetch_artworks(&self) -> Result<Vec<Artwork>, FetchError> {
        let body: ArtworksResponse = self.get_json(&self.artworks_path).await?;
        Ok(body.data)
    }

    async fn fetch_artwork(&self, id: ArtworkId) -> Result<Artwork, FetchError> {
        self.get_json(&format!("/artworks/{}", id.0)).await
    }

    async fn fetch_root_message(&self) -> Result<String, FetchError> {
        let body: RootResponse = self.get_json("/").await?;
        Ok(body.message)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
