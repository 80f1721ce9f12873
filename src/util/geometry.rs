// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transformations between the canvas
//! display space (on-screen pixels, varies with the window size) and the
//! fixed 1920x1080 space every stored box is expressed in.

use crate::config::{TARGET_HEIGHT, TARGET_WIDTH};
use crate::models::label::BoundingBox;

/// A point in canvas display space, relative to the canvas top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPoint {
    pub x: f32,
    pub y: f32,
}

impl DisplayPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    /// The rectangle spanning two drag endpoints, whichever corner came first.
    pub fn spanning(a: DisplayPoint, b: DisplayPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// True when both sides reach `min` pixels.
    pub fn is_at_least(&self, min: f32) -> bool {
        self.width >= min && self.height >= min
    }
}

/// Current pixel dimensions of the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

/// Scale a display rectangle into the fixed 1920x1080 space.
///
/// `xmax`/`ymax` are computed from `x + width` before rounding so the box
/// keeps its size under rounding. Callers must not pass an empty canvas.
pub fn to_normalized(rect: DisplayRect, canvas: CanvasSize) -> BoundingBox {
    let scale_x = TARGET_WIDTH / canvas.width as f64;
    let scale_y = TARGET_HEIGHT / canvas.height as f64;

    let (x, y) = (rect.x as f64, rect.y as f64);
    let (w, h) = (rect.width as f64, rect.height as f64);

    BoundingBox {
        xmin: (x * scale_x).round() as i32,
        ymin: (y * scale_y).round() as i32,
        xmax: ((x + w) * scale_x).round() as i32,
        ymax: ((y + h) * scale_y).round() as i32,
    }
}

/// Scale a stored box back onto a canvas of the given size.
pub fn to_display(bbox: &BoundingBox, canvas: CanvasSize) -> DisplayRect {
    let scale_x = canvas.width as f64 / TARGET_WIDTH;
    let scale_y = canvas.height as f64 / TARGET_HEIGHT;

    DisplayRect {
        x: (bbox.xmin as f64 * scale_x) as f32,
        y: (bbox.ymin as f64 * scale_y) as f32,
        width: (bbox.width() as f64 * scale_x) as f32,
        height: (bbox.height() as f64 * scale_y) as f32,
    }
}

/// Size the canvas for a video inside the available layout area.
///
/// The canvas takes the full available width and derives its height from
/// the video aspect ratio, falling back to fitting the height when the
/// result would not fit vertically.
pub fn fit_canvas(
    available_width: f32,
    available_height: f32,
    video_width: u32,
    video_height: u32,
) -> Option<CanvasSize> {
    if video_width == 0 || video_height == 0 || available_width < 1.0 || available_height < 1.0 {
        return None;
    }

    let (vw, vh) = (video_width as f32, video_height as f32);
    let fitted_height = available_width * vh / vw;
    let (width, height) = if fitted_height <= available_height {
        (available_width, fitted_height)
    } else {
        (available_height * vw / vh, available_height)
    };

    let size = CanvasSize {
        width: width.floor(),
        height: height.floor(),
    };
    (size.width >= 1.0 && size.height >= 1.0).then_some(size)
}
