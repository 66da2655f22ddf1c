//! Gallery view controller: two independent fetches per mount feeding two
//! independent state slices.

use std::sync::Arc;

use shared::domain::{Artwork, ArtworkId};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, error, info};

use crate::{
    expansion::ExpansionTracker,
    render::{render_gallery, GalleryView},
    ArtworkApi,
};

pub const TITLES_ERROR: &str = "Failed to load artwork titles";
pub const ARTWORKS_ERROR: &str = "Failed to load artworks";

/// Identifies one lifetime of the gallery view. Every fetch result carries
/// the mount it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum GalleryEvent {
    Mounted { mount: MountId },
    Unmounted { mount: MountId },
    TitlesLoaded { mount: MountId, titles: Vec<String> },
    TitlesFailed { mount: MountId },
    ArtworksLoaded { mount: MountId, artworks: Vec<Artwork> },
    ArtworksFailed { mount: MountId },
}

impl GalleryEvent {
    pub fn mount(&self) -> MountId {
        match self {
            GalleryEvent::Mounted { mount }
            | GalleryEvent::Unmounted { mount }
            | GalleryEvent::TitlesLoaded { mount, .. }
            | GalleryEvent::TitlesFailed { mount }
            | GalleryEvent::ArtworksLoaded { mount, .. }
            | GalleryEvent::ArtworksFailed { mount } => *mount,
        }
    }
}

/// Render state owned by whoever displays the view.
#[derive(Debug, Default, Clone)]
pub struct GalleryState {
    mount: Option<MountId>,
    titles: Vec<String>,
    artworks: Vec<Artwork>,
    error: Option<String>,
    expansion: ExpansionTracker,
    titles_settled: bool,
    artworks_settled: bool,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self) -> Option<MountId> {
        self.mount
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn expansion(&self) -> &ExpansionTracker {
        &self.expansion
    }

    pub fn toggle_image_expansion(&mut self, id: ArtworkId) {
        self.expansion.toggle(id);
    }

    /// Both fetches of the current mount have completed, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.mount.is_some() && self.titles_settled && self.artworks_settled
    }

    /// Applies one controller event. Returns whether the state changed.
    ///
    /// A `Mounted` event always starts a fresh state. Any other event is
    /// dropped unless it belongs to the current mount.
    pub fn apply(&mut self, event: GalleryEvent) -> bool {
        if let GalleryEvent::Mounted { mount } = event {
            *self = Self {
                mount: Some(mount),
                ..Self::default()
            };
            return true;
        }

        if self.mount != Some(event.mount()) {
            debug!(
                mount = event.mount().0,
                current = ?self.mount.map(|m| m.0),
                "discarding gallery event for stale mount"
            );
            return false;
        }

        match event {
            GalleryEvent::Mounted { .. } => unreachable!("handled above"),
            GalleryEvent::Unmounted { .. } => {
                self.mount = None;
            }
            GalleryEvent::TitlesLoaded { titles, .. } => {
                self.titles = titles;
                self.titles_settled = true;
            }
            GalleryEvent::TitlesFailed { .. } => {
                self.error = Some(TITLES_ERROR.to_string());
                self.titles_settled = true;
            }
            GalleryEvent::ArtworksLoaded { artworks, .. } => {
                self.artworks = artworks;
                self.artworks_settled = true;
            }
            GalleryEvent::ArtworksFailed { .. } => {
                self.error = Some(ARTWORKS_ERROR.to_string());
                self.artworks_settled = true;
            }
        }
        true
    }

    /// Applies events until both fetches of the current mount settled or the
    /// channel closes.
    pub async fn settle(&mut self, events: &mut UnboundedReceiver<GalleryEvent>) {
        while let Some(event) = events.recv().await {
            self.apply(event);
            if self.is_settled() {
                break;
            }
        }
    }

    pub fn render(&self) -> GalleryView {
        render_gallery(self)
    }
}

/// Issues the two fetches for each mount and aborts them on unmount.
///
/// Results are delivered as [`GalleryEvent`]s on the channel passed to
/// [`GalleryController::new`]. Dropping the controller unmounts it.
pub struct GalleryController {
    api: Arc<dyn ArtworkApi>,
    events: UnboundedSender<GalleryEvent>,
    next_mount: u64,
    current: Option<MountId>,
    tasks: Vec<JoinHandle<()>>,
}

impl GalleryController {
    pub fn new(api: Arc<dyn ArtworkApi>, events: UnboundedSender<GalleryEvent>) -> Self {
        Self {
            api,
            events,
            next_mount: 0,
            current: None,
            tasks: Vec::new(),
        }
    }

    pub fn with_channel(api: Arc<dyn ArtworkApi>) -> (Self, UnboundedReceiver<GalleryEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(api, tx), rx)
    }

    pub fn current_mount(&self) -> Option<MountId> {
        self.current
    }

    /// Starts a new mount, tearing down the previous one first. Must be
    /// called from within a tokio runtime.
    pub fn mount(&mut self) -> MountId {
        self.unmount();

        self.next_mount += 1;
        let mount = MountId(self.next_mount);
        self.current = Some(mount);
        info!(mount = mount.0, "mounting gallery view");

        // Sent before the fetches are spawned so it precedes their results.
        let _ = self.events.send(GalleryEvent::Mounted { mount });

        self.tasks.push(self.spawn_titles_fetch(mount));
        self.tasks.push(self.spawn_artworks_fetch(mount));
        mount
    }

    pub fn unmount(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        if let Some(mount) = self.current.take() {
            info!(mount = mount.0, "unmounted gallery view");
            let _ = self.events.send(GalleryEvent::Unmounted { mount });
        }
    }

    fn spawn_titles_fetch(&self, mount: MountId) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match api.fetch_titles().await {
                Ok(titles) => {
                    info!(mount = mount.0, count = titles.len(), "loaded artwork titles");
                    GalleryEvent::TitlesLoaded { mount, titles }
                }
                Err(err) => {
                    error!(mount = mount.0, "{TITLES_ERROR}: {err}");
                    GalleryEvent::TitlesFailed { mount }
                }
            };
            let _ = events.send(event);
        })
    }

    fn spawn_artworks_fetch(&self, mount: MountId) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match api.fetch_artworks().await {
                Ok(artworks) => {
                    info!(mount = mount.0, count = artworks.len(), "loaded artworks");
                    GalleryEvent::ArtworksLoaded { mount, artworks }
                }
                Err(err) => {
                    error!(mount = mount.0, "{ARTWORKS_ERROR}: {err}");
                    GalleryEvent::ArtworksFailed { mount }
                }
            };
            let _ = events.send(event);
        })
    }
}

impl Drop for GalleryController {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
