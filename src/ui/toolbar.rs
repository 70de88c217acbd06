// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar: file picker, zoom controls, and save.

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    OpenFile(std::path::PathBuf),
    ZoomIn,
    ZoomOut,
    Save,
}

/// Display the toolbar. `loading` disables everything that would start a
/// conflicting operation while a decode is in flight.
pub fn show(ui: &mut egui::Ui, loading: bool, zoom_scale: f64) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui
            .add_enabled(!loading, egui::Button::new("Open..."))
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images and PDFs", &["jpg", "jpeg", "png", "bmp", "gif", "webp", "pdf"])
                .pick_file()
            {
                action = ToolbarAction::OpenFile(path);
            }
        }

        ui.separator();

        if ui.button("Zoom In").clicked() {
            action = ToolbarAction::ZoomIn;
        }
        if ui.button("Zoom Out").clicked() {
            action = ToolbarAction::ZoomOut;
        }
        ui.label(
            egui::RichText::new(format!("{:.0}%", zoom_scale * 100.0))
                .weak()
                .monospace(),
        );

        ui.separator();

        if ui
            .add_enabled(!loading, egui::Button::new("Save"))
            .clicked()
        {
            action = ToolbarAction::Save;
        }
    });

    action
}
