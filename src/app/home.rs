//! Home screen: the destination list

use super::App;
use crate::theme;
use crate::ui::components::display_host;
use eframe::egui;

impl App {
    pub fn render_home(&mut self, ui: &mut egui::Ui) {
        let mut picked = None;

        ui.add_space(theme::SPACING_MD * 2.0);
        ui.vertical_centered(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("SITEDECK")
                        .size(22.0)
                        .color(theme::TEXT_PRIMARY)
                        .strong(),
                )
                .selectable(false),
            );
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Pick a destination")
                        .size(12.0)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        });
        ui.add_space(theme::SPACING_MD);

        let list_width = (ui.available_width() - 2.0 * theme::SPACING_MD).min(520.0);
        let left = (ui.available_width() - list_width) / 2.0;

        egui::ScrollArea::vertical().show(ui, |ui| {
            for destination in &self.destinations {
                let (rect, response) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), 56.0),
                    egui::Sense::click(),
                );
                let row_rect = egui::Rect::from_min_size(
                    egui::pos2(rect.left() + left, rect.top() + 2.0),
                    egui::vec2(list_width, 52.0),
                );
                if response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if ui.is_rect_visible(row_rect) {
                    let fill = if response.hovered() {
                        theme::BG_HOVER
                    } else {
                        theme::BG_ELEVATED
                    };
                    ui.painter().rect_filled(row_rect, 6.0, fill);
                    ui.painter().rect_stroke(
                        row_rect,
                        6.0,
                        egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
                        egui::StrokeKind::Inside,
                    );

                    let text_x = row_rect.left() + 14.0;
                    ui.painter().text(
                        egui::pos2(text_x, row_rect.center().y - 9.0),
                        egui::Align2::LEFT_CENTER,
                        &destination.name,
                        egui::FontId::proportional(15.0),
                        theme::TEXT_PRIMARY,
                    );
                    ui.painter().text(
                        egui::pos2(text_x, row_rect.center().y + 10.0),
                        egui::Align2::LEFT_CENTER,
                        display_host(&destination.url),
                        egui::FontId::proportional(11.0),
                        theme::TEXT_DIM,
                    );
                    ui.painter().text(
                        egui::pos2(row_rect.right() - 14.0, row_rect.center().y),
                        egui::Align2::RIGHT_CENTER,
                        egui_phosphor::regular::CARET_RIGHT,
                        egui::FontId::proportional(16.0),
                        if response.hovered() {
                            theme::ACCENT
                        } else {
                            theme::TEXT_DIM
                        },
                    );
                }
                if response.clicked() {
                    picked = Some(destination.clone());
                }
            }
        });

        if let Some(destination) = picked {
            self.open_destination(destination);
        }
    }
}
