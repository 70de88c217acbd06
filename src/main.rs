// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Pinnote
//!
//! A desktop application for pinning text comments onto images and the first
//! page of PDF documents, with a local library of saved, annotated images.

mod app;
mod io;
mod loader;
mod markers;
mod models;
mod session;
mod ui;
mod util;

use anyhow::Result;
use app::PinnoteApp;
use io::store::FileStore;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let store = FileStore::in_data_dir()?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([700.0, 500.0])
            .with_title("Pinnote"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Pinnote",
        options,
        Box::new(|_cc| Ok(Box::new(PinnoteApp::new(store)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
