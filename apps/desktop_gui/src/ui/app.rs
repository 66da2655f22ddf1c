use std::collections::HashMap;

use client_core::{ArtworkEntry, GalleryEvent, GalleryState, ListSection, MountId};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use shared::domain::ArtworkId;

use crate::backend_bridge::{commands::BackendCommand, images::PreviewImage};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(220, 50, 47);

enum ImageSlot {
    Pending,
    Decoded(PreviewImage),
    Ready {
        texture: TextureHandle,
        size: egui::Vec2,
    },
    Failed(UiError),
}

pub struct GalleryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    gallery: GalleryState,
    images: HashMap<ArtworkId, ImageSlot>,

    status: String,
    status_banner: Option<UiError>,
}

impl GalleryApp {
    /// Creates the app and mounts the gallery view.
    pub fn bootstrap(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            gallery: GalleryState::new(),
            images: HashMap::new(),
            status: "Starting".to_string(),
            status_banner: None,
        };
        app.remount();
        app
    }

    fn remount(&mut self) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Mount, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.status = format!("{}: {}", err.label(), err.message());
                    self.status_banner = Some(err);
                }
                UiEvent::Gallery(event) => self.apply_gallery_event(event),
                UiEvent::ImageLoaded {
                    mount,
                    artwork_id,
                    image,
                } => {
                    if self.is_current(mount) {
                        self.images.insert(artwork_id, ImageSlot::Decoded(image));
                    }
                }
                UiEvent::ImageFailed {
                    mount,
                    artwork_id,
                    reason,
                } => {
                    if self.is_current(mount) {
                        let err = UiError::from_message(UiErrorContext::Image, reason);
                        self.images.insert(artwork_id, ImageSlot::Failed(err));
                    }
                }
            }
        }
    }

    fn is_current(&self, mount: MountId) -> bool {
        self.gallery.mount() == Some(mount)
    }

    fn apply_gallery_event(&mut self, event: GalleryEvent) {
        let mounted = matches!(event, GalleryEvent::Mounted { .. });
        let artworks_loaded = matches!(event, GalleryEvent::ArtworksLoaded { .. });
        if !self.gallery.apply(event) {
            return;
        }

        if mounted {
            self.images.clear();
            self.status = "Loading gallery".to_string();
        }
        if artworks_loaded {
            self.request_images();
        }
        if self.gallery.is_settled() {
            self.status = format!(
                "{} titles, {} artworks",
                self.gallery.titles().len(),
                self.gallery.artworks().len()
            );
        }
    }

    fn request_images(&mut self) {
        let Some(mount) = self.gallery.mount() else {
            return;
        };
        let items: Vec<(ArtworkId, String)> = self
            .gallery
            .artworks()
            .iter()
            .filter_map(|artwork| {
                artwork
                    .image_url
                    .as_ref()
                    .map(|url| (artwork.id, url.clone()))
            })
            .collect();
        if items.is_empty() {
            return;
        }

        let ids: Vec<ArtworkId> = items.iter().map(|(id, _)| *id).collect();
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchImages { mount, items },
            &mut self.status,
        );
        for artwork_id in ids {
            let slot = if queued {
                ImageSlot::Pending
            } else {
                ImageSlot::Failed(UiError::from_message(
                    UiErrorContext::Image,
                    "image request could not be queued; use Reload",
                ))
            };
            self.images.insert(artwork_id, slot);
        }
    }

    fn show_gallery(&mut self, ctx: &egui::Context) {
        let view = self.gallery.render();
        let mut toggled: Option<ArtworkId> = None;

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Reload").clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Unmount,
                        &mut self.status,
                    );
                    self.remount();
                }
                ui.small(egui::RichText::new(&self.status).weak());
            });
            if let Some(banner) = &self.status_banner {
                ui.colored_label(ERROR_RED, format!("{}: {}", banner.label(), banner.message()));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading(&view.heading);
                    if let Some(error) = &view.error_banner {
                        ui.colored_label(ERROR_RED, error);
                    }
                    match &view.titles {
                        ListSection::Loading { placeholder } => {
                            ui.label(placeholder);
                        }
                        ListSection::Loaded { items } => {
                            for title in items {
                                ui.label(format!("• {title}"));
                            }
                        }
                    }

                    ui.add_space(12.0);
                    ui.heading(&view.artworks_heading);
                    match &view.artworks {
                        ListSection::Loading { placeholder } => {
                            ui.label(placeholder);
                        }
                        ListSection::Loaded { items } => {
                            for entry in items {
                                if self.show_artwork(ui, entry) {
                                    toggled = Some(entry.id);
                                }
                                ui.add_space(8.0);
                            }
                        }
                    }
                });
        });

        if let Some(id) = toggled {
            self.gallery.toggle_image_expansion(id);
        }
    }

    /// Returns true when the image was clicked.
    fn show_artwork(&mut self, ui: &mut egui::Ui, entry: &ArtworkEntry) -> bool {
        ui.label(egui::RichText::new(&entry.title).strong().size(16.0));

        if matches!(self.images.get(&entry.id), Some(ImageSlot::Decoded(_))) {
            if let Some(ImageSlot::Decoded(image)) = self.images.remove(&entry.id) {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [image.width, image.height],
                    &image.rgba,
                );
                let texture = ui.ctx().load_texture(
                    format!("artwork_image_{}", entry.id.0),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                let size = egui::vec2(image.width as f32, image.height as f32);
                self.images
                    .insert(entry.id, ImageSlot::Ready { texture, size });
            }
        }

        match self.images.get(&entry.id) {
            Some(ImageSlot::Ready { texture, size }) => {
                let max_width = entry.size.max_width();
                let mut display = *size;
                if display.x > max_width {
                    display *= max_width / display.x;
                }
                let response = ui
                    .add(
                        egui::Button::image(
                            egui::Image::new(texture).fit_to_exact_size(display),
                        )
                        .frame(false),
                    )
                    .on_hover_text(&entry.alt);
                response.clicked()
            }
            Some(ImageSlot::Pending) | Some(ImageSlot::Decoded(_)) => {
                ui.spinner();
                false
            }
            Some(ImageSlot::Failed(err)) => {
                ui.weak(format!("[{}]", entry.alt))
                    .on_hover_text(format!("{}: {}", err.label(), err.message()));
                false
            }
            None => {
                ui.weak("no image");
                false
            }
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_gallery(ctx);
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
