// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for video display and box annotation.
//!
//! This module shows the current video frame, overlays stored and
//! in-progress boxes, and turns pointer input into drag events for the
//! session. The overlay is rebuilt from the label store every frame.

use crate::config::{BOX_STROKE_WIDTH, IN_PROGRESS_BOX_COLOR, STORED_BOX_COLOR};
use crate::io::{export::format_time, player::VideoPlayer};
use crate::models::{label::Label, session::Session};
use crate::util::geometry::{self, CanvasSize, DisplayPoint, DisplayRect};

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    None,
    PointerDown(DisplayPoint),
    PointerMove(DisplayPoint),
    PointerUp(DisplayPoint),
    PointerLeave,
}

/// What the canvas reports back to the app each frame.
pub struct CanvasResponse {
    pub action: CanvasAction,
    /// Current canvas size, `None` while no video is shown.
    pub size: Option<CanvasSize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    Stored,
    InProgress,
}

/// A box to outline on the overlay, in display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayBox {
    pub rect: DisplayRect,
    pub style: BoxStyle,
}

/// Everything the overlay should show for the given state.
///
/// Nothing is shown outside labeling mode.
pub fn overlay_boxes(labels: &[Label], session: &Session, canvas: CanvasSize) -> Vec<OverlayBox> {
    if !session.is_labeling() {
        return Vec::new();
    }

    let mut boxes: Vec<OverlayBox> = labels
        .iter()
        .map(|label| OverlayBox {
            rect: geometry::to_display(&label.bbox, canvas),
            style: BoxStyle::Stored,
        })
        .collect();

    if let Some(rect) = session.in_progress_rect() {
        boxes.push(OverlayBox {
            rect,
            style: BoxStyle::InProgress,
        });
    }

    boxes
}

/// Display the main canvas area and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    player: Option<&VideoPlayer>,
    labels: &[Label],
    session: &Session,
    loading_message: Option<&str>,
    load_error: Option<&str>,
) -> CanvasResponse {
    let mut response = CanvasResponse {
        action: CanvasAction::None,
        size: None,
    };

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style())
        .fill(egui::Color32::BLACK)
        .show(ui, |ui| {
            ui.set_min_size(available_size);

            if let Some(message) = loading_message {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new(message)
                                .size(16.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                    });
                });
                return;
            }

            let Some(player) = player else {
                show_welcome(ui, load_error);
                return;
            };

            let meta = player.metadata();
            let available = ui.available_size();
            let Some(size) = geometry::fit_canvas(available.x, available.y, meta.width, meta.height)
            else {
                return;
            };
            response.size = Some(size);

            // Center the canvas
            let offset = (available - egui::vec2(size.width, size.height)) / 2.0;
            let canvas_rect = egui::Rect::from_min_size(
                ui.min_rect().min + offset,
                egui::vec2(size.width, size.height),
            );

            if let Some(texture) = player.texture() {
                ui.painter().image(
                    texture.id(),
                    canvas_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            let sense = if session.is_labeling() {
                egui::Sense::click_and_drag()
            } else {
                egui::Sense::hover()
            };
            let canvas_response = ui.allocate_rect(canvas_rect, sense);
            if session.is_labeling() {
                canvas_response.on_hover_cursor(egui::CursorIcon::Crosshair);
                response.action = pointer_action(ui, canvas_rect, session);
            }

            let painter = ui.painter_at(canvas_rect);
            for overlay in overlay_boxes(labels, session, size) {
                let color = match overlay.style {
                    BoxStyle::Stored => STORED_BOX_COLOR,
                    BoxStyle::InProgress => IN_PROGRESS_BOX_COLOR,
                };
                painter.rect_stroke(
                    to_screen(canvas_rect, overlay.rect),
                    0.0,
                    egui::Stroke::new(BOX_STROKE_WIDTH, color),
                );
            }

            draw_time_badge(&painter, canvas_rect, player.current_time());
        });

    response
}

/// Translate raw pointer state into drag events for the session.
fn pointer_action(ui: &egui::Ui, canvas_rect: egui::Rect, session: &Session) -> CanvasAction {
    let (pressed, released, latest) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
        )
    });
    let local = |pos: egui::Pos2| DisplayPoint::new(pos.x - canvas_rect.min.x, pos.y - canvas_rect.min.y);

    if session.is_dragging() {
        return match latest {
            Some(pos) if canvas_rect.contains(pos) => {
                if released {
                    CanvasAction::PointerUp(local(pos))
                } else {
                    CanvasAction::PointerMove(local(pos))
                }
            }
            _ => CanvasAction::PointerLeave,
        };
    }

    match latest {
        // A press and release in the same frame is a click, not a drag
        Some(pos) if pressed && !released && ui.rect_contains_pointer(canvas_rect) => {
            CanvasAction::PointerDown(local(pos))
        }
        _ => CanvasAction::None,
    }
}

fn to_screen(canvas_rect: egui::Rect, rect: DisplayRect) -> egui::Rect {
    egui::Rect::from_min_size(
        canvas_rect.min + egui::vec2(rect.x, rect.y),
        egui::vec2(rect.width, rect.height),
    )
}

/// Draw the `mm:ss` playback time in the bottom-right corner.
fn draw_time_badge(painter: &egui::Painter, canvas_rect: egui::Rect, seconds: f64) {
    let galley = painter.layout_no_wrap(
        format_time(seconds),
        egui::FontId::monospace(14.0),
        egui::Color32::WHITE,
    );
    let padding = egui::vec2(6.0, 3.0);
    let size = galley.size() + padding * 2.0;
    let badge = egui::Rect::from_min_size(
        canvas_rect.max - size - egui::vec2(8.0, 8.0),
        size,
    );
    painter.rect_filled(badge, 4.0, egui::Color32::from_black_alpha(128));
    painter.galley(badge.min + padding, galley, egui::Color32::WHITE);
}

fn show_welcome(ui: &mut egui::Ui, load_error: Option<&str>) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("Import Your Video")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new(
                    "Use the controls to activate labeling and draw boxes. \
                     Coordinates are scaled to 1920x1080.",
                )
                .size(14.0)
                .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("File → Open Video...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
            if let Some(error) = load_error {
                ui.add_space(10.0);
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::label::{BoundingBox, LabelId};

    const CANVAS: CanvasSize = CanvasSize {
        width: 960.0,
        height: 540.0,
    };

    fn labels() -> Vec<Label> {
        vec![Label::new(
            LabelId::new("a"),
            3.0,
            BoundingBox {
                xmin: 200,
                ymin: 100,
                xmax: 600,
                ymax: 300,
            },
        )]
    }

    #[test]
    fn test_overlay_blank_outside_labeling() {
        let session = Session::new();
        assert!(overlay_boxes(&labels(), &session, CANVAS).is_empty());
    }

    #[test]
    fn test_overlay_maps_stored_boxes() {
        let mut session = Session::new();
        session.toggle_labeling();

        let boxes = overlay_boxes(&labels(), &session, CANVAS);
        assert_eq!(
            boxes,
            vec![OverlayBox {
                rect: DisplayRect {
                    x: 100.0,
                    y: 50.0,
                    width: 200.0,
                    height: 100.0,
                },
                style: BoxStyle::Stored,
            }]
        );
    }

    #[test]
    fn test_overlay_in_progress_unmapped() {
        let mut session = Session::new();
        session.toggle_labeling();
        session.pointer_down(DisplayPoint::new(10.0, 10.0));
        session.pointer_move(DisplayPoint::new(30.0, 50.0));

        let boxes = overlay_boxes(&labels(), &session, CANVAS);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[1].style, BoxStyle::InProgress);
        assert_eq!(
            boxes[1].rect,
            DisplayRect {
                x: 10.0,
                y: 10.0,
                width: 20.0,
                height: 40.0,
            }
        );
    }

    #[test]
    fn test_overlay_follows_canvas_size() {
        let mut session = Session::new();
        session.toggle_labeling();
        let full = CanvasSize {
            width: 1920.0,
            height: 1080.0,
        };
        let boxes = overlay_boxes(&labels(), &session, full);
        assert_eq!(boxes[0].rect.x, 200.0);
        assert_eq!(boxes[0].rect.width, 400.0);
    }
}
