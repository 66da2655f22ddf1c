//! Backend commands queued from UI to backend worker.

use client_core::MountId;
use shared::domain::ArtworkId;

pub enum BackendCommand {
    /// Tear down the current gallery mount (if any) and start a new one.
    Mount,
    Unmount,
    /// Every thumbnail of one mount, queued as a single command.
    FetchImages {
        mount: MountId,
        items: Vec<(ArtworkId, String)>,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Mount => "mount",
            BackendCommand::Unmount => "unmount",
            BackendCommand::FetchImages { .. } => "fetch_images",
        }
    }
}
