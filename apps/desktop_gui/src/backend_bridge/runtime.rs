//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{GalleryController, GalleryEvent, HttpArtworkClient, MountId, Settings};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::ArtworkId;
use tokio::sync::mpsc;

use crate::backend_bridge::{commands::BackendCommand, images::decode_preview_image};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match HttpArtworkClient::from_settings(&settings) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("invalid API settings: {err}"),
                    )));
                    tracing::error!("invalid API settings {settings:?}: {err}");
                    return;
                }
            };
            tracing::info!(api_base = %client.base(), "backend worker using artwork API");

            let (events_tx, mut events_rx) = mpsc::unbounded_channel();
            let mut controller = GalleryController::new(Arc::new(client.clone()), events_tx);

            let ui_tx_events = ui_tx.clone();
            let forward_task = tokio::task::spawn_blocking(move || {
                forward_gallery_events(&mut events_rx, &ui_tx_events);
            });

            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            // Blocking receive parks this thread only; spawned tasks run on the workers.
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Mount => {
                        controller.mount();
                    }
                    BackendCommand::Unmount => {
                        controller.unmount();
                    }
                    BackendCommand::FetchImages { mount, items } => {
                        tracing::debug!(mount = mount.0, count = items.len(), "fetching artwork images");
                        for (artwork_id, url) in items {
                            tokio::spawn(load_image(
                                client.clone(),
                                ui_tx.clone(),
                                mount,
                                artwork_id,
                                url,
                            ));
                        }
                    }
                }
            }

            controller.unmount();
            // Forwarding ends once the controller and its aborted fetch tasks
            // release the event sender.
            drop(controller);
            drop(forward_task);
            tracing::info!("backend command channel closed; worker exiting");
        });
    });
}

/// Gallery events are few and drive the whole view, so they wait for room in
/// the UI queue instead of being dropped. Runs on a blocking thread.
fn forward_gallery_events(
    events_rx: &mut mpsc::UnboundedReceiver<GalleryEvent>,
    ui_tx: &Sender<UiEvent>,
) {
    while let Some(event) = events_rx.blocking_recv() {
        if ui_tx.send(UiEvent::Gallery(event)).is_err() {
            tracing::debug!("ui event receiver closed; stop forwarding gallery events");
            return;
        }
    }
}

async fn load_image(
    client: HttpArtworkClient,
    ui_tx: Sender<UiEvent>,
    mount: MountId,
    artwork_id: ArtworkId,
    url: String,
) {
    let result = match client.fetch_image(&url).await {
        Ok(bytes) => tokio::task::spawn_blocking(move || decode_preview_image(&bytes))
            .await
            .unwrap_or_else(|err| Err(err.to_string())),
        Err(err) => Err(err.to_string()),
    };
    let event = match result {
        Ok(image) => UiEvent::ImageLoaded {
            mount,
            artwork_id,
            image,
        },
        Err(reason) => {
            tracing::warn!(
                artwork_id = artwork_id.0,
                %url,
                "failed to load artwork image: {reason}"
            );
            UiEvent::ImageFailed {
                mount,
                artwork_id,
                reason,
            }
        }
    };
    if ui_tx.try_send(event).is_err() {
        tracing::warn!(artwork_id = artwork_id.0, "ui queue full; dropped image result");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::time::Duration;

    #[test]
    fn gallery_events_wait_for_a_full_ui_queue() {
        let mount = MountId(4);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        events_tx
            .send(GalleryEvent::Mounted { mount })
            .expect("send mounted");
        events_tx
            .send(GalleryEvent::TitlesLoaded {
                mount,
                titles: vec!["Starry Night".into()],
            })
            .expect("send titles");
        events_tx
            .send(GalleryEvent::ArtworksFailed { mount })
            .expect("send artworks");
        drop(events_tx);

        let (ui_tx, ui_rx) = bounded(1);
        ui_tx
            .send(UiEvent::Info("queue already full".into()))
            .expect("fill queue");
        let forwarder = thread::spawn(move || forward_gallery_events(&mut events_rx, &ui_tx));

        let mut received = Vec::new();
        while let Ok(event) = ui_rx.recv_timeout(Duration::from_secs(5)) {
            received.push(event);
        }
        forwarder.join().expect("forwarder thread");

        let gallery: Vec<GalleryEvent> = received
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Gallery(event) => Some(event),
                _ => None,
            })
            .collect();
        assert_eq!(
            gallery,
            vec![
                GalleryEvent::Mounted { mount },
                GalleryEvent::TitlesLoaded {
                    mount,
                    titles: vec!["Starry Night".into()],
                },
                GalleryEvent::ArtworksFailed { mount },
            ]
        );
    }
}
