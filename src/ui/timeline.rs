// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline scrubber control.
//!
//! This module provides the play/pause button and the timeline scrubber
//! for navigating to the frame to annotate.

use crate::io::{export::format_time, player::VideoPlayer};

/// Result of timeline interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineAction {
    None,
    Play,
    Pause,
    Seek(f64),
}

/// Display the transport controls for `player`.
pub fn show(ui: &mut egui::Ui, player: &VideoPlayer, is_playing: bool) -> TimelineAction {
    let mut action = TimelineAction::None;
    let duration = player.duration();

    ui.horizontal(|ui| {
        let (icon, next) = if is_playing {
            ("⏸", TimelineAction::Pause)
        } else {
            ("▶", TimelineAction::Play)
        };
        if ui
            .add_enabled(player.is_playable(), egui::Button::new(icon))
            .on_hover_text("Play/pause (Space)")
            .clicked()
        {
            action = next;
        }

        ui.label(
            egui::RichText::new(format!(
                "{} / {}",
                format_time(player.current_time()),
                format_time(duration)
            ))
            .monospace(),
        );

        let mut position = player.current_time();
        ui.spacing_mut().slider_width = ui.available_width().max(50.0);
        let slider = egui::Slider::new(&mut position, 0.0..=duration.max(0.0))
            .show_value(false)
            .smart_aim(false);
        if ui.add_enabled(player.is_playable(), slider).changed() {
            action = TimelineAction::Seek(position);
        }
    });

    action
}
