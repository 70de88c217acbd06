// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Saved-image list panel.
//!
//! One row per saved record; activating a row asks the session to reopen
//! that entry for further annotation.

use crate::models::library::Library;

/// Display the saved-entry list. Returns the index of an activated row.
pub fn show(ui: &mut egui::Ui, library: &Library, current_index: Option<usize>) -> Option<usize> {
    let mut activated = None;

    ui.heading("Saved images");
    ui.separator();

    if library.is_empty() {
        ui.label(egui::RichText::new("Nothing saved yet").weak());
        return None;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (index, label) in library.listing().into_iter().enumerate() {
            let selected = current_index == Some(index);
            if ui.selectable_label(selected, label).clicked() {
                activated = Some(index);
            }
        }
    });

    activated
}
