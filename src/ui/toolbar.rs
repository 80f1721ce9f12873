// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the labeling toggle and video selection.

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    ToggleLabeling,
    OpenVideo,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, is_labeling: bool, file_name: Option<&str>) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let has_video = file_name.is_some();
        let toggle = ui
            .add_enabled(has_video, egui::SelectableLabel::new(is_labeling, "✏ Label"))
            .on_hover_text("Toggle labeling mode (L)");
        if toggle.clicked() {
            action = ToolbarAction::ToggleLabeling;
        }

        let open_text = if has_video { "📂 New" } else { "📂 Choose File" };
        if ui.button(open_text).clicked() {
            action = ToolbarAction::OpenVideo;
        }

        ui.separator();

        let hint = if is_labeling {
            "Seek to a frame and draw a box."
        } else {
            "Activate the label tool to start drawing."
        };
        ui.label(egui::RichText::new(hint).italics().weak());

        if let Some(name) = file_name {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(name).on_hover_text(name);
                ui.label(egui::RichText::new("Now playing:").strong());
            });
        }
    });

    action
}
