// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label data structures.
//!
//! This module defines the bounding boxes and labels the user creates.
//! Boxes are always stored in the fixed 1920x1080 space.

use std::fmt;

/// A box in the fixed 1920x1080 space.
///
/// `xmin <= xmax` and `ymin <= ymax` hold because boxes are only built
/// from normalized display rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

impl BoundingBox {
    pub fn width(&self) -> i32 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> i32 {
        self.ymax - self.ymin
    }

    /// Coordinates in `[xmin, ymin, xmax, ymax]` order.
    pub fn to_array(&self) -> [i32; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }
}

/// Unique identifier of a label (an ISO-8601 creation timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelId(String);

impl LabelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bounding box bound to a single video frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: LabelId,
    /// Playback time in seconds when the box was drawn.
    pub timestamp: f64,
    pub bbox: BoundingBox,
}

impl Label {
    pub fn new(id: LabelId, timestamp: f64, bbox: BoundingBox) -> Self {
        Self {
            id,
            timestamp,
            bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_dimensions() {
        let bbox = BoundingBox {
            xmin: 200,
            ymin: 100,
            xmax: 600,
            ymax: 300,
        };
        assert_eq!(bbox.width(), 400);
        assert_eq!(bbox.height(), 200);
        assert_eq!(bbox.to_array(), [200, 100, 600, 300]);
    }

    #[test]
    fn test_label_id_display() {
        let id = LabelId::new("2025-10-09T08:53:20.000Z");
        assert_eq!(id.to_string(), id.as_str());
    }
}
