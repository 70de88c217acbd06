// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Main application: egui wiring over the session state.
//!
//! All decisions live in [`crate::session::Session`]; this module only turns
//! panels and clicks into session calls and keeps the display texture in
//! sync with the loader's backing raster.

use crate::io::store::FileStore;
use crate::models::annotation::LogicalPoint;
use crate::session::Session;
use crate::ui::{canvas, library_panel, toolbar};

/// A click waiting for its comment text.
struct CommentPrompt {
    position: LogicalPoint,
    text: String,
}

pub struct PinnoteApp {
    session: Session,
    store: FileStore,
    /// Texture for the loader's current backing raster.
    texture: Option<egui::TextureHandle>,
    prompt: Option<CommentPrompt>,
}

impl PinnoteApp {
    pub fn new(store: FileStore) -> Self {
        Self {
            session: Session::new(&store),
            store,
            texture: None,
            prompt: None,
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let Some(document) = self.session.loader.document() else {
            self.texture = None;
            return;
        };
        let size = [document.width as usize, document.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &document.pixels);
        self.texture = Some(ctx.load_texture("document", color_image, egui::TextureOptions::LINEAR));
    }

    /// Modal comment entry for a pending canvas click.
    fn show_comment_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };

        let mut commit = false;
        let mut cancel = false;

        egui::Window::new("Add comment")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut prompt.text)
                        .hint_text("Enter your comment")
                        .desired_width(260.0),
                );
                edit.request_focus();

                ui.horizontal(|ui| {
                    if ui.button("Add").clicked()
                        || (edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)))
                    {
                        commit = true;
                    }
                    if ui.button("Cancel").clicked()
                        || ui.input(|i| i.key_pressed(egui::Key::Escape))
                    {
                        cancel = true;
                    }
                });
            });

        if commit {
            if let Some(prompt) = self.prompt.take() {
                // empty text falls through to the session's silent no-op
                self.session.add_annotation(prompt.position, &prompt.text);
            }
        } else if cancel {
            self.prompt = None;
        }
    }
}

impl eframe::App for PinnoteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.poll_loader();
        if self.session.loader.is_loading() {
            ctx.request_repaint();
        }
        // keep the texture in sync with the loader's backing raster; a
        // failed load falls back to the previously open document
        if self.session.is_open() {
            if self.texture.is_none() {
                self.refresh_texture(ctx);
            }
        } else {
            self.texture = None;
            self.prompt = None;
        }

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    self.session.loader.is_loading(),
                    self.session.scale.zoom_scale,
                )
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::OpenFile(path) => self.session.open_file(path),
            toolbar::ToolbarAction::ZoomIn => self.session.zoom_in(),
            toolbar::ToolbarAction::ZoomOut => self.session.zoom_out(),
            toolbar::ToolbarAction::Save => self.session.save(&self.store),
            toolbar::ToolbarAction::None => {}
        }

        // Saved-entry list (left side)
        let activated = egui::SidePanel::left("library")
            .default_width(220.0)
            .show(ctx, |ui| {
                library_panel::show(ui, &self.session.library, self.session.current_index())
            })
            .inner;

        if let Some(index) = activated {
            self.session.open_entry(index);
        }

        // Canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, &mut self.session, &self.texture))
            .inner;

        if let canvas::CanvasAction::Clicked(screen) = canvas_action {
            if self.prompt.is_none() {
                if let Some(position) = self.session.click_position(screen) {
                    self.prompt = Some(CommentPrompt {
                        position,
                        text: String::new(),
                    });
                }
            }
        }

        self.show_comment_prompt(ctx);
    }
}
