//! Reusable UI components
//!
//! Standalone widgets shared by the home and viewer screens.

use crate::theme;
use eframe::egui;

/// Custom-painted rectangular button with an icon + label.
pub fn pill_button(
    ui: &mut egui::Ui,
    text: &str,
    size: egui::Vec2,
    fill: egui::Color32,
    text_color: egui::Color32,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = theme::button_visual(&response, fill, rect);
        ui.painter().rect_filled(draw_rect, 4.0, fill);
        ui.painter().text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(13.0),
            text_color,
        );
    }
    response
}

/// Square icon-only button (top bar controls).
pub fn icon_button(ui: &mut egui::Ui, icon: &str, size: f32) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
    let color = if response.hovered() {
        ui.painter().rect_filled(rect, 4.0, theme::BG_SURFACE);
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        theme::TEXT_PRIMARY
    } else {
        theme::TEXT_MUTED
    };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(size * 0.66),
        color,
    );
    response
}

/// Centered spinner + label, filling the available region.
pub fn loading_indicator(ui: &mut egui::Ui, label: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.add(egui::Spinner::new().size(36.0).color(theme::ACCENT));
        ui.add_space(theme::SPACING_SM);
        ui.add(
            egui::Label::new(egui::RichText::new(label).color(theme::TEXT_MUTED).size(13.0))
                .selectable(false),
        );
    });
}

/// Host portion of a URL for compact display ("https://www.wikipedia.org/x"
/// becomes "www.wikipedia.org").
pub fn display_host(url: &str) -> &str {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    let end = rest
        .find(['/', '?', '#'])
        .unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_host_strips_scheme_and_path() {
        assert_eq!(display_host("https://www.wikipedia.org"), "www.wikipedia.org");
        assert_eq!(display_host("https://ddnet.org/maps?x=1"), "ddnet.org");
        assert_eq!(display_host("http://a.example/b#c"), "a.example");
    }

    #[test]
    fn display_host_tolerates_schemeless_input() {
        assert_eq!(display_host("news.ycombinator.com/item"), "news.ycombinator.com");
        assert_eq!(display_host(""), "");
    }
}
