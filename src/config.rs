// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration and tuning constants.

use std::time::Duration;

/// Width of the fixed space exported boxes are expressed in.
pub const TARGET_WIDTH: f64 = 1920.0;

/// Height of the fixed space exported boxes are expressed in.
pub const TARGET_HEIGHT: f64 = 1080.0;

/// Drags smaller than this (display pixels, either side) are treated as clicks.
pub const MIN_BOX_SIZE: f32 = 5.0;

/// How long the "Copied!" indicator stays visible.
pub const COPIED_INDICATOR: Duration = Duration::from_secs(2);

/// Outline colour of stored boxes.
pub const STORED_BOX_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(204, 0, 0, 204);

/// Outline colour of the box currently being dragged.
pub const IN_PROGRESS_BOX_COLOR: egui::Color32 =
    egui::Color32::from_rgba_premultiplied(0, 204, 0, 204);

/// Stroke width of box outlines.
pub const BOX_STROKE_WIDTH: f32 = 2.0;

pub const APP_NAME: &str = "vidbox";
pub const WINDOW_TITLE: &str = "Video Bounding Box Labeling Tool";

/// Native window options.
pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    }
}
