//! Viewer screen: top bar plus exactly one of spinner, page content, or the
//! error view with a retry control.

use super::App;
use crate::theme;
use crate::ui::components::{display_host, icon_button, loading_indicator, pill_button};
use crate::viewer::ViewerState;
use eframe::egui;
use tracing::warn;

impl App {
    pub fn render_viewer(&mut self, ui: &mut egui::Ui) {
        let mut go_back = false;
        let mut reload = false;
        let mut open_external = false;

        // Top bar
        egui::Frame::new()
            .fill(theme::BG_ELEVATED)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if !self.kiosk {
                        let response = icon_button(ui, egui_phosphor::regular::ARROW_LEFT, 28.0);
                        if response.on_hover_text("Back (Escape)").clicked() {
                            go_back = true;
                        }
                        ui.add_space(4.0);
                    }

                    if let Some(destination) = self.viewer.selected() {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&destination.name)
                                    .size(14.0)
                                    .color(theme::TEXT_PRIMARY),
                            )
                            .selectable(false),
                        );
                        ui.add_space(6.0);
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(display_host(&destination.url))
                                    .size(11.0)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let response =
                            icon_button(ui, egui_phosphor::regular::ARROW_SQUARE_OUT, 28.0);
                        if response.on_hover_text("Open in browser").clicked() {
                            open_external = true;
                        }
                        let response =
                            icon_button(ui, egui_phosphor::regular::ARROW_CLOCKWISE, 28.0);
                        if response.on_hover_text("Reload").clicked() {
                            reload = true;
                        }
                    });
                });
            });

        // Content region - the three states are mutually exclusive.
        match self.viewer.state() {
            ViewerState::Loading => loading_indicator(ui, "Loading..."),
            ViewerState::Loaded => self.render_document(ui),
            ViewerState::Failed => {
                if self.render_error(ui) {
                    reload = true;
                }
            }
            ViewerState::Idle => {}
        }

        if open_external {
            if let Some(destination) = self.viewer.selected() {
                if let Err(e) = open::that(&destination.url) {
                    warn!(error = %e, url = %destination.url, "Failed to open external browser");
                }
            }
        }
        if reload {
            self.reload();
        }
        if go_back {
            self.go_back();
        }
    }

    fn render_document(&self, ui: &mut egui::Ui) {
        let Some(document) = &self.document else {
            // Loaded with no document only happens for an empty body.
            return;
        };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Frame::new()
                    .inner_margin(egui::Margin::symmetric(16, 12))
                    .show(ui, |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&document.final_url)
                                    .size(11.0)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                        ui.add_space(theme::SPACING_SM);
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&document.text)
                                    .size(13.0)
                                    .color(theme::TEXT_SECONDARY),
                            )
                            .wrap(),
                        );
                        if document.truncated {
                            ui.add_space(theme::SPACING_SM);
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new("Document truncated.")
                                        .size(11.0)
                                        .color(theme::TEXT_DIM)
                                        .italics(),
                                )
                                .selectable(false),
                            );
                        }
                    });
            });
    }

    /// Returns true when the user clicked Retry.
    fn render_error(&self, ui: &mut egui::Ui) -> bool {
        let mut retry = false;
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.35);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(egui_phosphor::regular::WARNING)
                        .size(34.0)
                        .color(theme::STATUS_ERROR),
                )
                .selectable(false),
            );
            ui.add_space(theme::SPACING_SM);
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Failed to load the page.")
                        .size(15.0)
                        .color(theme::STATUS_ERROR),
                )
                .selectable(false),
            );
            ui.add_space(theme::SPACING_MD);
            let label = format!("{} Retry", egui_phosphor::regular::ARROW_CLOCKWISE);
            if pill_button(
                ui,
                &label,
                egui::vec2(120.0, 32.0),
                theme::BTN_ACCENT,
                theme::BTN_ACCENT_TEXT,
            )
            .clicked()
            {
                retry = true;
            }
        });
        retry
    }
}
