// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback clock and frame display.
//!
//! The player owns the opened source and the current playback time. Whether
//! the video is playing is decided by the session; the app only advances
//! the clock while the session says so.

use super::media::{FrameSource, VideoMetadata};

/// Result of advancing the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Running,
    Ended,
}

/// A source opened on the loader thread, ready to be shown.
pub struct LoadedVideo {
    pub source: Box<dyn FrameSource>,
    pub file_name: String,
}

pub struct VideoPlayer {
    source: Box<dyn FrameSource>,
    metadata: VideoMetadata,
    file_name: String,
    current_time: f64,
    texture: Option<egui::TextureHandle>,
    /// Playback time of the frame currently in `texture`.
    shown_time: Option<f64>,
}

impl VideoPlayer {
    pub fn new(loaded: LoadedVideo) -> Self {
        let metadata = loaded.source.metadata();
        if metadata.fps.is_some() && metadata.duration <= 0.0 {
            log::warn!(
                "{} reports a frame rate but no length; playback and seeking are disabled",
                loaded.file_name
            );
        }
        Self {
            source: loaded.source,
            metadata,
            file_name: loaded.file_name,
            current_time: 0.0,
            texture: None,
            shown_time: None,
        }
    }

    pub fn metadata(&self) -> VideoMetadata {
        self.metadata
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.metadata.duration
    }

    /// Whether the source has a length to play through and seek in.
    pub fn is_playable(&self) -> bool {
        self.duration() > 0.0
    }

    pub fn is_at_end(&self) -> bool {
        self.is_playable() && self.current_time >= self.duration()
    }

    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }

    /// Move the clock forward by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Playback {
        let duration = self.duration();
        self.current_time = (self.current_time + dt.max(0.0)).min(duration);
        if self.current_time >= duration {
            Playback::Ended
        } else {
            Playback::Running
        }
    }

    /// Jump to `seconds`, clamped to the video length.
    pub fn seek(&mut self, seconds: f64) {
        if seconds.is_finite() {
            self.current_time = seconds.clamp(0.0, self.duration());
        }
    }

    /// Decode and upload the frame for the current time if it changed.
    pub fn update_texture(&mut self, ctx: &egui::Context) {
        if self.shown_time == Some(self.current_time) {
            return;
        }

        match self.source.frame_at(self.current_time) {
            Ok(frame) => {
                let image = frame.to_color_image();
                match &mut self.texture {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.texture =
                            Some(ctx.load_texture("video_frame", image, egui::TextureOptions::LINEAR));
                    }
                }
            }
            Err(e) => log::error!("Failed to decode frame at {:.3}s: {:#}", self.current_time, e),
        }
        // Don't retry a failing frame every repaint
        self.shown_time = Some(self.current_time);
    }
}
