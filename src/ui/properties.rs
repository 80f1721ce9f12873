// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label list and JSON output panel.
//!
//! Shows the generated labels newest first with their timestamps and
//! coordinates, and the JSON export with a copy button.

use crate::io::export::format_time;
use crate::models::{label::LabelId, store::LabelStore};

/// Result of panel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesAction {
    None,
    DeleteLabel(LabelId),
    CopyJson,
}

const ACCENT: egui::Color32 = egui::Color32::from_rgb(34, 211, 238);

/// Display the label list and JSON output.
pub fn show(ui: &mut egui::Ui, store: &LabelStore, json: &str, copied: bool) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading(egui::RichText::new("Generated Labels").color(ACCENT));
    ui.separator();

    egui::ScrollArea::vertical()
        .id_source("labels")
        .max_height(ui.available_height() * 0.5)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            if store.is_empty() {
                ui.label(egui::RichText::new("No labels created yet.").weak());
                return;
            }

            for label in store.newest_first() {
                let bbox = &label.bbox;
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                egui::RichText::new(format!("Time: {}", format_time(label.timestamp)))
                                    .strong(),
                            );
                            ui.label(
                                egui::RichText::new(format!(
                                    "xywh: {}, {}, {}, {}",
                                    bbox.xmin,
                                    bbox.ymin,
                                    bbox.width(),
                                    bbox.height()
                                ))
                                .monospace()
                                .small(),
                            );
                            ui.label(
                                egui::RichText::new(format!(
                                    "minmax: {}, {}, {}, {}",
                                    bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax
                                ))
                                .monospace()
                                .small(),
                            );
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                            if ui.small_button("🗑").on_hover_text("Delete label").clicked() {
                                action = PropertiesAction::DeleteLabel(label.id.clone());
                            }
                        });
                    });
                });
            }
        });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("JSON Output (1920x1080)").strong().color(ACCENT));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let text = if copied { "✔ Copied!" } else { "📋 Copy" };
            if ui
                .add_enabled(!store.is_empty(), egui::Button::new(text))
                .clicked()
            {
                action = PropertiesAction::CopyJson;
            }
        });
    });

    egui::ScrollArea::both()
        .id_source("json")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(json)
                    .monospace()
                    .color(egui::Color32::from_rgb(134, 239, 172)),
            );
        });

    action
}
