// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! vidbox - Video Bounding Box Labeling Tool
//!
//! A desktop application for drawing bounding boxes on video frames and
//! exporting them as timestamped JSON coordinates scaled to 1920x1080.

mod app;
mod config;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::VidboxApp;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Optional video to open on startup
    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    // Run the application
    eframe::run_native(
        config::APP_NAME,
        config::native_options(),
        Box::new(|_cc| Ok(Box::new(VidboxApp::with_initial_file(initial_file)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
