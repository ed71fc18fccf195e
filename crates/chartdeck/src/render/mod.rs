pub mod chart;
pub mod chrome;
pub mod transition;

use eframe::egui::{self, Align2, FontId, Pos2};

use crate::deck::content::{SlideContent, SlideLayout};
use crate::theme::Theme;

use chart::PaintedChart;

/// Layout is authored against a 1920x1080 slide and scaled to fit.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    (rect.width() / 1920.0).min(rect.height() / 1080.0)
}

/// Where the chart sits on a chart slide. Every chart slide uses the same
/// frame, so one measurement covers all chart surfaces.
pub fn chart_rect(rect: egui::Rect, theme: &Theme, scale: f32) -> egui::Rect {
    let padding = 80.0 * scale;
    let header = (theme.h2_size * 1.25 + theme.body_size * 0.6 * 1.6 + 30.0) * scale;
    let footer = 60.0 * scale;
    egui::Rect::from_min_max(
        egui::pos2(rect.left() + padding, rect.top() + padding + header),
        egui::pos2(rect.right() - padding, rect.bottom() - padding - footer),
    )
}

/// Render one slide. `chart` is the chart instance for chart slides, when
/// it has been created.
#[allow(clippy::too_many_arguments)]
pub fn render_slide(
    ui: &egui::Ui,
    slide: &SlideContent,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
    chart: Option<&PaintedChart>,
    pointer: Option<Pos2>,
) {
    match slide.layout {
        SlideLayout::Title => render_title(ui, slide, theme, rect, opacity, scale),
        SlideLayout::Bullets => render_bullets(ui, slide, theme, rect, opacity, scale),
        SlideLayout::Chart(_) => {
            render_header(ui, slide, theme, rect, opacity, scale);
            let frame = chart_rect(rect, theme, scale);
            match chart {
                Some(chart) => chart.paint(ui.painter(), frame.min, theme, opacity, pointer),
                None => {
                    // Reserve the frame so the slide doesn't jump when the
                    // chart arrives.
                    ui.painter().rect_filled(
                        frame,
                        8.0 * scale,
                        Theme::with_opacity(theme.panel, opacity * 0.5),
                    );
                }
            }
        }
    }
}

fn render_title(
    ui: &egui::Ui,
    slide: &SlideContent,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    let heading_color = Theme::with_opacity(theme.heading_color, opacity);
    let accent = Theme::with_opacity(theme.accent, opacity);

    let heading = ui.painter().layout(
        slide.heading.to_string(),
        FontId::proportional(theme.h1_size * scale),
        heading_color,
        content_rect.width(),
    );
    let subtitle = slide.subtitle.map(|s| {
        ui.painter().layout(
            s.to_string(),
            FontId::proportional(theme.body_size * scale),
            Theme::with_opacity(theme.foreground, opacity),
            content_rect.width() * 0.8,
        )
    });

    let gap = 40.0 * scale;
    let total = heading.rect.height()
        + subtitle
            .as_ref()
            .map(|g| g.rect.height() + gap)
            .unwrap_or(0.0);
    let mut y = content_rect.center().y - total / 2.0;

    let heading_x = content_rect.center().x - heading.rect.width() / 2.0;
    let heading_height = heading.rect.height();
    ui.painter()
        .galley(egui::pos2(heading_x, y), heading, heading_color);
    y += heading_height;

    let bar_width = 160.0 * scale;
    ui.painter().rect_filled(
        egui::Rect::from_center_size(
            egui::pos2(content_rect.center().x, y + gap / 2.0),
            egui::vec2(bar_width, 6.0 * scale),
        ),
        3.0 * scale,
        accent,
    );
    y += gap;

    if let Some(subtitle) = subtitle {
        let x = content_rect.center().x - subtitle.rect.width() / 2.0;
        ui.painter()
            .galley(egui::pos2(x, y), subtitle, theme.foreground);
    }
}

/// Heading plus optional subtitle at the top of the slide. Returns the y
/// coordinate below them.
fn render_header(
    ui: &egui::Ui,
    slide: &SlideContent,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) -> f32 {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    let heading_color = Theme::with_opacity(theme.heading_color, opacity);

    let heading = ui.painter().layout(
        slide.heading.to_string(),
        FontId::proportional(theme.h2_size * scale),
        heading_color,
        content_rect.width(),
    );
    let mut y = content_rect.top();
    let heading_height = heading.rect.height();
    ui.painter()
        .galley(egui::pos2(content_rect.left(), y), heading, heading_color);
    y += heading_height + 10.0 * scale;

    if let Some(subtitle) = slide.subtitle {
        let color = Theme::with_opacity(theme.muted, opacity);
        let rect = ui.painter().text(
            egui::pos2(content_rect.left(), y),
            Align2::LEFT_TOP,
            subtitle,
            FontId::proportional(theme.body_size * 0.6 * scale),
            color,
        );
        y = rect.bottom();
    }
    y + 20.0 * scale
}

fn render_bullets(
    ui: &egui::Ui,
    slide: &SlideContent,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let mut y = render_header(ui, slide, theme, rect, opacity, scale) + 30.0 * scale;

    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    let color = Theme::with_opacity(theme.foreground, opacity);
    let accent = Theme::with_opacity(theme.accent, opacity);
    let font = FontId::proportional(theme.body_size * scale);
    let indent = 48.0 * scale;

    for bullet in slide.bullets {
        let galley = ui.painter().layout(
            bullet.to_string(),
            font.clone(),
            color,
            content_rect.width() - indent,
        );
        let first_line = theme.body_size * scale * 0.6;
        ui.painter().circle_filled(
            egui::pos2(content_rect.left() + 12.0 * scale, y + first_line),
            7.0 * scale,
            accent,
        );
        let height = galley.rect.height();
        ui.painter()
            .galley(egui::pos2(content_rect.left() + indent, y), galley, color);
        y += height + 28.0 * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_fits_smaller_dimension() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1920.0, 1080.0));
        assert_eq!(compute_scale(rect), 1.0);
        let tall = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(960.0, 1080.0));
        assert_eq!(compute_scale(tall), 0.5);
    }

    #[test]
    fn test_chart_rect_inside_slide() {
        let theme = Theme::light();
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1920.0, 1080.0));
        let frame = chart_rect(rect, &theme, 1.0);
        assert!(rect.contains_rect(frame));
        assert!(frame.width() > 1000.0);
        assert!(frame.height() > 500.0);
    }

    #[test]
    fn test_chart_rect_follows_translation() {
        let theme = Theme::dark();
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1280.0, 720.0));
        let scale = compute_scale(rect);
        let moved = rect.translate(egui::vec2(300.0, 0.0));
        let a = chart_rect(rect, &theme, scale);
        let b = chart_rect(moved, &theme, scale);
        assert_eq!(a.size(), b.size());
        assert_eq!(b.min.x - a.min.x, 300.0);
    }
}
