use eframe::egui::{self, Align2, FontId, Sense};

use crate::deck::{NavButton, Stage};
use crate::input::{ClickZone, DeckEvent};
use crate::theme::Theme;

/// Fraction of the slide width covered by each side click zone.
const ZONE_WIDTH: f32 = 0.2;
const BUTTON_SIZE: f32 = 56.0;
const BUTTON_GAP: f32 = 14.0;

/// Left and right click zones, full height.
pub fn zone_rects(rect: egui::Rect) -> [(ClickZone, egui::Rect); 2] {
    let w = rect.width() * ZONE_WIDTH;
    [
        (
            ClickZone::Left,
            egui::Rect::from_min_size(rect.min, egui::vec2(w, rect.height())),
        ),
        (
            ClickZone::Right,
            egui::Rect::from_min_size(
                egui::pos2(rect.right() - w, rect.top()),
                egui::vec2(w, rect.height()),
            ),
        ),
    ]
}

/// Navigation bar at the bottom centre: `« ‹ current / total › »`.
/// Buttons missing from the stage leave their slot empty.
pub fn button_rects(rect: egui::Rect, scale: f32) -> [(NavButton, egui::Rect); 4] {
    let size = BUTTON_SIZE * scale;
    let gap = BUTTON_GAP * scale;
    let indicator = 160.0 * scale;
    let total = size * 4.0 + gap * 4.0 + indicator;
    let y = rect.bottom() - 40.0 * scale - size;
    let left = rect.center().x - total / 2.0;

    let at = |x: f32| egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(size, size));
    let right_half = left + size * 2.0 + gap * 3.0 + indicator;
    [
        (NavButton::First, at(left)),
        (NavButton::Prev, at(left + size + gap)),
        (NavButton::Next, at(right_half)),
        (NavButton::Last, at(right_half + size + gap)),
    ]
}

/// Draw the chrome over the slide and return the clicks it received.
///
/// Zones are registered before the buttons so a click on a button never
/// also counts as a zone click.
pub fn draw_chrome(
    ui: &egui::Ui,
    stage: &Stage,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> Vec<DeckEvent> {
    let mut events = Vec::new();

    for (zone, zone_rect) in zone_rects(rect) {
        let response = ui.interact(zone_rect, ui.id().with(zone.element_id()), Sense::click());
        if response.clicked() {
            events.push(DeckEvent::ZoneClicked(zone));
        }
    }

    for (button, button_rect) in button_rects(rect, scale) {
        let Some(element) = stage.button(button) else {
            continue;
        };
        let sense = if element.disabled {
            Sense::hover()
        } else {
            Sense::click()
        };
        let response = ui.interact(button_rect, ui.id().with(button.element_id()), sense);
        if !element.disabled && response.clicked() {
            events.push(DeckEvent::ButtonClicked(button));
        }

        let opacity = if element.disabled {
            0.3
        } else if response.hovered() {
            1.0
        } else {
            0.75
        };
        let fill = if !element.disabled && response.hovered() {
            Theme::with_opacity(theme.accent, 0.9)
        } else {
            Theme::with_opacity(theme.panel, opacity)
        };
        let text = if !element.disabled && response.hovered() {
            egui::Color32::WHITE
        } else {
            Theme::with_opacity(theme.foreground, opacity)
        };
        ui.painter()
            .circle_filled(button_rect.center(), button_rect.width() / 2.0, fill);
        ui.painter().text(
            button_rect.center(),
            Align2::CENTER_CENTER,
            button.label(),
            FontId::proportional(theme.chrome_size * 1.4 * scale),
            text,
        );
    }

    if let Some(label) = page_label(stage) {
        let [_, (_, prev), (_, next), _] = button_rects(rect, scale);
        let center = egui::pos2((prev.right() + next.left()) / 2.0, prev.center().y);
        ui.painter().text(
            center,
            Align2::CENTER_CENTER,
            label,
            FontId::monospace(theme.chrome_size * scale),
            Theme::with_opacity(theme.foreground, 0.7),
        );
    }

    events
}

/// Page indicator text from whichever indicator elements exist.
pub fn page_label(stage: &Stage) -> Option<String> {
    match (stage.current_page(), stage.total_pages()) {
        (Some(current), Some(total)) => Some(format!("{current} / {total}")),
        (Some(current), None) => Some(current.to_string()),
        (None, Some(total)) => Some(format!("/ {total}")),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_hd() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1920.0, 1080.0))
    }

    #[test]
    fn test_zones_cover_the_edges() {
        let [(left, l), (right, r)] = zone_rects(full_hd());
        assert_eq!(left, ClickZone::Left);
        assert_eq!(right, ClickZone::Right);
        assert_eq!(l.left(), 0.0);
        assert_eq!(r.right(), 1920.0);
        assert_eq!(l.height(), 1080.0);
        assert!(!l.intersects(r));
    }

    #[test]
    fn test_buttons_in_order_and_on_screen() {
        let rects = button_rects(full_hd(), 1.0);
        let order: Vec<_> = rects.iter().map(|(b, _)| *b).collect();
        assert_eq!(order, NavButton::all().to_vec());
        for pair in rects.windows(2) {
            assert!(pair[0].1.right() < pair[1].1.left());
        }
        for (_, r) in rects {
            assert!(full_hd().contains_rect(r));
        }
    }

    #[test]
    fn test_page_label() {
        let stage = Stage::standard();
        assert_eq!(page_label(&stage).as_deref(), Some("1 / 14"));
        assert_eq!(page_label(&Stage::empty()), None);
    }
}
