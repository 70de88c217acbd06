// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas: document display, click capture, markers, and tooltip.
//!
//! The canvas allocates the document at `native * fit * zoom` pixels and
//! reports clicks in coordinates relative to that rect, which is exactly the
//! screen space the scale model inverts.

use crate::markers::MARKER_RADIUS;
use crate::session::Session;
use crate::util::scale::ScreenPoint;

const MARKER_COLOR: egui::Color32 = egui::Color32::from_rgb(0x5f, 0x44, 0xce);

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Click at canvas-relative screen coordinates.
    Clicked(ScreenPoint),
}

/// Display the canvas area and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    session: &mut Session,
    texture: &Option<egui::TextureHandle>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let document_size = session.loader.document().map(|d| d.display_size());
        match (texture, document_size) {
            (Some(texture), Some((width, height))) => {
                let zoom = session.scale.zoom_scale;
                let size = egui::vec2((width * zoom) as f32, (height * zoom) as f32);

                egui::ScrollArea::both().show(ui, |ui| {
                    let (rect, response) =
                        ui.allocate_exact_size(size, egui::Sense::click());

                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );

                    // hover detection against current marker positions
                    let hovered = response.hover_pos().and_then(|pos| {
                        let rel = pos - rect.min;
                        session.markers.handles().iter().position(|handle| {
                            let screen = handle.screen();
                            let dx = rel.x - screen.x as f32;
                            let dy = rel.y - screen.y as f32;
                            (dx * dx + dy * dy).sqrt() <= MARKER_RADIUS
                        })
                    });
                    session.markers.set_hovered(hovered);

                    let painter = ui.painter();
                    for handle in session.markers.handles() {
                        let screen = handle.screen();
                        let center =
                            rect.min + egui::vec2(screen.x as f32, screen.y as f32);
                        painter.circle_filled(center, MARKER_RADIUS, MARKER_COLOR);
                        painter.circle_stroke(
                            center,
                            MARKER_RADIUS,
                            egui::Stroke::new(1.0, egui::Color32::WHITE),
                        );
                    }

                    if let Some((at, text)) = session.markers.tooltip() {
                        draw_tooltip(painter, rect.min, at, text);
                    }

                    // clicks on a marker show its tooltip, not a new prompt
                    if response.clicked() && hovered.is_none() {
                        if let Some(pos) = response.interact_pointer_pos() {
                            let rel = pos - rect.min;
                            action = CanvasAction::Clicked(ScreenPoint {
                                x: rel.x as f64,
                                y: rel.y as f64,
                            });
                        }
                    }
                });
            }
            _ => {
                if session.loader.is_loading() {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new("Loading document...")
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                } else {
                    show_welcome(ui);
                }
            }
        }
    });

    // Status line at the bottom
    ui.separator();
    ui.horizontal(|ui| {
        if session.is_open() {
            ui.label(format!("{} comments", session.annotations.len()));
            ui.separator();
            ui.label("Click the image to add a comment");
        } else {
            ui.label("No document open");
        }
        if let Some(status) = session.status() {
            ui.separator();
            ui.label(egui::RichText::new(status).color(egui::Color32::LIGHT_YELLOW));
        }
    });

    action
}

fn draw_tooltip(painter: &egui::Painter, origin: egui::Pos2, at: ScreenPoint, text: &str) {
    let pos = origin + egui::vec2(at.x as f32, at.y as f32);
    let galley = painter.layout_no_wrap(
        text.to_string(),
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
    let padding = egui::vec2(6.0, 4.0);
    let background = egui::Rect::from_min_size(pos, galley.size() + padding * 2.0);
    painter.rect_filled(background, 3.0, egui::Color32::from_black_alpha(220));
    painter.galley(pos + padding, galley, egui::Color32::WHITE);
}

fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("Pinnote")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Pin comments onto images and PDF pages")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open an image or PDF to begin")
                    .color(egui::Color32::from_gray(180)),
            );
        });
    });
}
