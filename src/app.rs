// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the label store and the session, and
//! routes toolbar, timeline, canvas and panel actions into them.

use crate::config::{COPIED_INDICATOR, WINDOW_TITLE};
use crate::io::{
    clipboard::{self, CopyIndicator, EguiClipboard, SystemClipboard},
    export,
    media,
    player::{LoadedVideo, Playback, VideoPlayer},
};
use crate::models::{label::LabelId, session::Session, store::LabelStore};
use crate::ui::{canvas, properties, timeline, toolbar};
use crate::util::geometry::{self, CanvasSize};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::Instant;

/// JSON export regenerated whenever the store revision changes.
struct ExportCache {
    revision: Option<u64>,
    json: String,
}

impl ExportCache {
    fn new() -> Self {
        Self {
            revision: None,
            json: String::new(),
        }
    }

    fn refresh(&mut self, store: &LabelStore) -> &str {
        if self.revision != Some(store.revision()) {
            self.json = match export::to_json(store.list()) {
                Ok(json) => json,
                Err(e) => {
                    log::error!("Failed to serialize labels: {:#}", e);
                    String::new()
                }
            };
            self.revision = Some(store.revision());
        }
        &self.json
    }
}

/// Body of the Help → About window.
fn about_text() -> String {
    format!(
        "{} {}\n\n{}",
        WINDOW_TITLE,
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}

/// Main application state.
pub struct VidboxApp {
    /// Finished labels
    store: LabelStore,

    /// Playback/labeling mode and drag state
    session: Session,

    /// Currently loaded video
    player: Option<VideoPlayer>,

    /// Canvas size from the last frame
    canvas_size: Option<CanvasSize>,

    export: ExportCache,

    copy_indicator: CopyIndicator,

    /// System clipboard, held open so copied text stays available
    clipboard: SystemClipboard,

    /// Message for the blocking copy-failure dialog
    copy_error: Option<String>,

    about_open: bool,

    /// Receiver for background video loading
    video_loader: Option<Receiver<Result<LoadedVideo, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Last loading failure, shown on the empty canvas
    load_error: Option<String>,
}

impl Default for VidboxApp {
    fn default() -> Self {
        Self::new()
    }
}

impl VidboxApp {
    /// Create a new application instance.
    pub fn new() -> Self {
        Self {
            store: LabelStore::new(),
            session: Session::new(),
            player: None,
            canvas_size: None,
            export: ExportCache::new(),
            copy_indicator: CopyIndicator::new(COPIED_INDICATOR),
            clipboard: SystemClipboard::new(),
            copy_error: None,
            about_open: false,
            video_loader: None,
            loading_message: None,
            load_error: None,
        }
    }

    /// Create the application and start loading `path`, if given.
    pub fn with_initial_file(path: Option<PathBuf>) -> Self {
        let mut app = Self::new();
        if let Some(path) = path {
            app.begin_video_load(path);
        }
        app
    }

    /// Replace the current video: clears labels and leaves labeling mode.
    pub fn begin_video_load(&mut self, path: PathBuf) {
        self.store.clear();
        self.session.reset();
        self.player = None;
        self.canvas_size = None;
        self.load_error = None;

        let (sender, receiver) = channel();
        self.video_loader = Some(receiver);
        self.loading_message = Some("Loading video...".to_string());

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let result = media::open(&path)
                .map(|source| LoadedVideo { source, file_name })
                .map_err(|e| format!("{:#}", e));

            let _ = sender.send(result);
        });
    }

    /// The source finished opening (metadata is now known).
    fn handle_loaded_video(&mut self, loaded: LoadedVideo) {
        let player = VideoPlayer::new(loaded);
        let meta = player.metadata();
        log::info!(
            "Loaded {} ({}x{}, {:.1}s, {} fps)",
            player.file_name(),
            meta.width,
            meta.height,
            meta.duration,
            meta.fps.map_or("unknown".to_string(), |fps| format!("{fps:.2}"))
        );
        self.player = Some(player);
    }

    fn poll_loader(&mut self) {
        let Some(receiver) = &self.video_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.video_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => self.handle_loaded_video(loaded),
            Err(e) => {
                log::error!("Failed to load video: {}", e);
                self.load_error = Some(e);
            }
        }
    }

    fn open_video_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Videos", media::VIDEO_EXTENSIONS)
            .add_filter("Images", media::IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.begin_video_load(path);
        }
    }

    fn play(&mut self) {
        let Some(player) = &mut self.player else {
            return;
        };
        // Playing from the end starts over
        if player.is_at_end() {
            player.seek(0.0);
        }
        self.session.play();
    }

    fn pause(&mut self) {
        self.session.pause();
    }

    fn toggle_play(&mut self) {
        if self.session.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    fn toggle_labeling(&mut self) {
        if self.player.is_none() {
            return;
        }
        self.session.toggle_labeling();
        log::info!(
            "Labeling mode {}",
            if self.session.is_labeling() { "on" } else { "off" }
        );
    }

    fn seek(&mut self, seconds: f64) {
        self.session.cancel_drag();
        if let Some(player) = &mut self.player {
            player.seek(seconds);
        }
    }

    /// Finish a drag and store the box if it qualifies.
    fn finish_drag(&mut self) -> Option<LabelId> {
        let rect = self.session.pointer_up()?;
        let (Some(canvas), Some(player)) = (self.canvas_size, &self.player) else {
            return None;
        };

        let bbox = geometry::to_normalized(rect, canvas);
        let id = match self.store.create(player.current_time(), bbox, Utc::now()) {
            Ok(id) => id,
            Err(e) => {
                log::error!("Failed to add label: {:#}", e);
                return None;
            }
        };
        log::info!(
            "Added label {} at {:.3}s [{}, {}, {}, {}], total: {}",
            id,
            player.current_time(),
            bbox.xmin,
            bbox.ymin,
            bbox.xmax,
            bbox.ymax,
            self.store.len()
        );
        Some(id)
    }

    fn delete_label(&mut self, id: &LabelId) {
        if self.store.remove(id) {
            log::info!("Deleted label {}, total: {}", id, self.store.len());
        }
    }

    fn copy_json(&mut self, ctx: &egui::Context) {
        let json = self.export.refresh(&self.store).to_owned();
        match clipboard::copy_text(&json, &mut self.clipboard, &mut EguiClipboard(ctx)) {
            Ok(()) => {
                self.copy_indicator.mark(Instant::now());
                log::info!("Copied {} labels to clipboard", self.store.len());
            }
            Err(e) => {
                log::error!("{:#}", e);
                self.copy_error = Some(e.to_string());
            }
        }
    }

    fn handle_canvas_action(&mut self, action: canvas::CanvasAction) {
        match action {
            canvas::CanvasAction::PointerDown(pos) => self.session.pointer_down(pos),
            canvas::CanvasAction::PointerMove(pos) => self.session.pointer_move(pos),
            canvas::CanvasAction::PointerUp(pos) => {
                self.session.pointer_move(pos);
                self.finish_drag();
            }
            canvas::CanvasAction::PointerLeave => {
                self.finish_drag();
            }
            canvas::CanvasAction::None => {}
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        // Only process if no text field is focused
        if ctx.wants_keyboard_input() {
            return;
        }
        let (space, l, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::L),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if space {
            self.toggle_play();
        }
        if l {
            self.toggle_labeling();
        }
        if escape {
            self.session.cancel_drag();
        }
    }

    /// The copy-failure dialog blocks every other control until dismissed.
    fn is_blocked(&self) -> bool {
        self.copy_error.is_some()
    }

    fn show_about(&mut self, ctx: &egui::Context) {
        if !self.about_open {
            return;
        }

        let mut open = true;
        let mut close_clicked = false;
        egui::Window::new("About")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(about_text());
                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
            });
        self.about_open = open && !close_clicked;
    }

    fn show_copy_error(&mut self, ctx: &egui::Context) {
        let Some(message) = self.copy_error.clone() else {
            return;
        };

        egui::Window::new("Copy failed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.copy_error = None;
                }
            });
    }
}

impl eframe::App for VidboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader();

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        let blocked = self.is_blocked();
        if !blocked {
            self.handle_keyboard(ctx);
        }

        // Advance the playback clock
        if self.session.is_playing() {
            if let Some(player) = &mut self.player {
                let dt = ctx.input(|i| i.stable_dt) as f64;
                if player.advance(dt) == Playback::Ended {
                    self.session.pause();
                }
                ctx.request_repaint();
            }
        }

        if let Some(player) = &mut self.player {
            player.update_texture(ctx);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                egui::menu::bar(ui, |ui| {
                    ui.menu_button("File", |ui| {
                        if ui.button("Open Video...").clicked() {
                            ui.close_menu();
                            self.open_video_dialog();
                        }
                        ui.separator();
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });

                    ui.menu_button("Help", |ui| {
                        if ui.button("About").clicked() {
                            self.about_open = true;
                            ui.close_menu();
                        }
                    });
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    toolbar::show(
                        ui,
                        self.session.is_labeling(),
                        self.player.as_ref().map(|p| p.file_name()),
                    )
                })
                .inner
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::ToggleLabeling => self.toggle_labeling(),
            toolbar::ToolbarAction::OpenVideo => self.open_video_dialog(),
            toolbar::ToolbarAction::None => {}
        }

        // Labels and JSON panel (right side)
        let now = Instant::now();
        let copied = self.copy_indicator.is_active(now);
        if let Some(remaining) = self.copy_indicator.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
        let json = self.export.refresh(&self.store).to_owned();
        let properties_action = egui::SidePanel::right("properties")
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| properties::show(ui, &self.store, &json, copied))
                    .inner
            })
            .inner;

        match properties_action {
            properties::PropertiesAction::DeleteLabel(id) => self.delete_label(&id),
            properties::PropertiesAction::CopyJson => self.copy_json(ctx),
            properties::PropertiesAction::None => {}
        }

        // Transport controls (bottom)
        let timeline_action = egui::TopBottomPanel::bottom("timeline")
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| match &self.player {
                    Some(player) => timeline::show(ui, player, self.session.is_playing()),
                    None => timeline::TimelineAction::None,
                })
                .inner
            })
            .inner;

        match timeline_action {
            timeline::TimelineAction::Play => self.play(),
            timeline::TimelineAction::Pause => self.pause(),
            timeline::TimelineAction::Seek(seconds) => self.seek(seconds),
            timeline::TimelineAction::None => {}
        }

        // Main canvas (center)
        let canvas_response = egui::CentralPanel::default()
            .show(ctx, |ui| {
                canvas::show(
                    ui,
                    self.player.as_ref(),
                    self.store.list(),
                    &self.session,
                    self.loading_message.as_deref(),
                    self.load_error.as_deref(),
                )
            })
            .inner;

        if canvas_response.size != self.canvas_size {
            if let Some(size) = canvas_response.size {
                log::debug!("Canvas resized to {}x{}", size.width, size.height);
            }
            self.canvas_size = canvas_response.size;
        }
        if !blocked {
            self.handle_canvas_action(canvas_response.action);
        }

        self.show_about(ctx);
        self.show_copy_error(ctx);
    }
}
