use eframe::egui::{self, Align2, Color32, FontId, Pos2, Stroke};
use tracing::trace;

use crate::charts::geometry::{ArcLayout, BodyLayout, ChartLayout, LineLayout, arc_points};
use crate::charts::{ChartBackend, ChartConfig, ChartError, ChartHandle, ChartKind, ChartResult};
use crate::deck::ChartSurface;
use crate::theme::Theme;

const HOVER_POINT_RADIUS: f32 = 8.0;
const HOVER_BORDER_WIDTH: f32 = 3.0;

/// Backend that paints charts with egui shapes.
#[derive(Debug, Default)]
pub struct PaintedChartBackend;

#[derive(Debug)]
pub struct PaintedChart {
    config: ChartConfig,
    layout: Option<ChartLayout>,
    destroyed: bool,
}

impl ChartBackend for PaintedChartBackend {
    type Handle = PaintedChart;

    fn create(&mut self, surface: &ChartSurface, config: ChartConfig) -> ChartResult<PaintedChart> {
        if surface.key != config.key {
            return Err(ChartError::Backend(format!(
                "surface {} cannot host chart {}",
                surface.element_id(),
                config.key.name()
            )));
        }
        config.validate()?;
        let layout = surface.size.map(|size| ChartLayout::compute(&config, size));
        trace!(
            surface = surface.element_id(),
            kind = config.kind.name(),
            measured = layout.is_some(),
            "painted chart created"
        );
        Ok(PaintedChart {
            config,
            layout,
            destroyed: false,
        })
    }
}

impl ChartHandle for PaintedChart {
    fn resize(&mut self, size: Option<egui::Vec2>) -> ChartResult<()> {
        if self.destroyed {
            return Err(ChartError::Destroyed(self.config.key.name()));
        }
        let size = size.ok_or(ChartError::Unmeasured(self.config.key.surface_id()))?;
        if self.layout.as_ref().is_some_and(|l| l.size == size) {
            return Ok(());
        }
        self.layout = Some(ChartLayout::compute(&self.config, size));
        Ok(())
    }

    fn destroy(&mut self) -> ChartResult<()> {
        if self.destroyed {
            return Err(ChartError::Destroyed(self.config.key.name()));
        }
        self.destroyed = true;
        self.layout = None;
        Ok(())
    }
}

impl PaintedChart {
    #[cfg(test)]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn layout(&self) -> Option<&ChartLayout> {
        self.layout.as_ref()
    }

    #[cfg(test)]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Data index under a screen position, for a chart drawn at `origin`.
    pub fn hovered_index(&self, origin: Pos2, pointer: Option<Pos2>) -> Option<usize> {
        let layout = self.layout.as_ref()?;
        let local = pointer? - origin.to_vec2();
        layout.hit_test(local)
    }

    /// Paint at `origin`, the top left corner of the chart's surface. The
    /// chart keeps the size it was last resized to.
    pub fn paint(
        &self,
        painter: &egui::Painter,
        origin: Pos2,
        theme: &Theme,
        opacity: f32,
        pointer: Option<Pos2>,
    ) {
        let Some(layout) = &self.layout else { return };
        let canvas = Canvas {
            painter,
            origin,
            opacity,
        };
        let hovered = if opacity >= 1.0 {
            self.hovered_index(origin, pointer)
        } else {
            None
        };

        canvas.text(
            layout.title_pos,
            Align2::CENTER_CENTER,
            &self.config.title,
            layout.title_size(),
            self.config.title_color,
        );

        match &layout.body {
            BodyLayout::Line(line) => self.paint_line(&canvas, layout, line, theme, hovered),
            BodyLayout::Arc(arc) => self.paint_arc(&canvas, arc, hovered),
        }
        self.paint_legend(&canvas, layout, theme);

        if let (Some(index), Some(pointer)) = (hovered, pointer) {
            paint_tooltip(
                painter,
                pointer,
                &self.config.tooltip_lines(index),
                self.config.color(index),
                layout.legend_size(),
            );
        }
    }

    fn paint_line(
        &self,
        canvas: &Canvas<'_>,
        layout: &ChartLayout,
        line: &LineLayout,
        theme: &Theme,
        hovered: Option<usize>,
    ) {
        let fs = layout.font_scale;
        let plot = line.plot;
        let grid = Stroke::new(1.0, canvas.fade(theme.grid));
        let tick_size = layout.tick_size();

        for tick in &line.y_ticks {
            canvas.segment(
                Pos2::new(plot.left(), tick.pos),
                Pos2::new(plot.right(), tick.pos),
                grid,
            );
            canvas.text(
                Pos2::new(plot.left() - 8.0 * fs, tick.pos),
                Align2::RIGHT_CENTER,
                &tick.label,
                tick_size,
                theme.muted,
            );
        }
        for tick in &line.x_ticks {
            canvas.segment(
                Pos2::new(tick.pos, plot.top()),
                Pos2::new(tick.pos, plot.bottom()),
                grid,
            );
            canvas.text(
                Pos2::new(tick.pos, plot.bottom() + 6.0 * fs),
                Align2::CENTER_TOP,
                &tick.label,
                tick_size,
                theme.muted,
            );
        }
        if let Some(axis) = &self.config.y_axis {
            canvas.text(
                line.y_title_pos,
                Align2::LEFT_CENTER,
                &axis.title,
                tick_size,
                theme.foreground,
            );
        }
        if let Some(axis) = &self.config.x_axis {
            canvas.text(
                line.x_title_pos,
                Align2::CENTER_CENTER,
                &axis.title,
                tick_size,
                theme.foreground,
            );
        }

        let color = self.config.color(0);
        let fill = matches!(self.config.kind, ChartKind::Line { fill: true, .. });
        if let (true, Some(fill_color)) = (fill, self.config.fill_color) {
            let mut mesh = egui::Mesh::default();
            let fill_color = canvas.fade(fill_color);
            for pair in line.path.windows(2) {
                let base = mesh.vertices.len() as u32;
                mesh.colored_vertex(canvas.at(pair[0]), fill_color);
                mesh.colored_vertex(canvas.at(pair[1]), fill_color);
                mesh.colored_vertex(canvas.at(Pos2::new(pair[1].x, plot.bottom())), fill_color);
                mesh.colored_vertex(canvas.at(Pos2::new(pair[0].x, plot.bottom())), fill_color);
                mesh.add_triangle(base, base + 1, base + 2);
                mesh.add_triangle(base, base + 2, base + 3);
            }
            canvas.painter.add(egui::Shape::mesh(mesh));
        }

        let path: Vec<Pos2> = line.path.iter().map(|p| canvas.at(*p)).collect();
        canvas.painter.add(egui::Shape::line(
            path,
            Stroke::new(self.config.border_width * fs, canvas.fade(color)),
        ));

        for (i, point) in line.points.iter().enumerate() {
            let radius = fs
                * if hovered == Some(i) {
                    HOVER_POINT_RADIUS
                } else {
                    self.config.point_radius
                };
            canvas.painter.circle_filled(canvas.at(*point), radius, canvas.fade(color));
            canvas.painter.circle_stroke(
                canvas.at(*point),
                radius,
                Stroke::new(2.0 * fs, canvas.fade(self.config.border_color)),
            );
        }
    }

    fn paint_arc(&self, canvas: &Canvas<'_>, arc: &ArcLayout, hovered: Option<usize>) {
        let center = canvas.at(arc.center);
        for wedge in &arc.wedges {
            if wedge.sweep <= 0.0 {
                continue;
            }
            let color = canvas.fade(self.config.color(wedge.index));
            let outer = arc_points(center, arc.outer, wedge.start, wedge.sweep);
            let mut mesh = egui::Mesh::default();

            if arc.inner <= 0.0 {
                mesh.colored_vertex(center, color);
                for p in &outer {
                    mesh.colored_vertex(*p, color);
                }
                for i in 1..outer.len() as u32 {
                    mesh.add_triangle(0, i, i + 1);
                }
            } else {
                let inner = arc_points(center, arc.inner, wedge.start, wedge.sweep);
                for (o, i) in outer.iter().zip(&inner) {
                    mesh.colored_vertex(*o, color);
                    mesh.colored_vertex(*i, color);
                }
                for k in 0..outer.len().saturating_sub(1) as u32 {
                    let base = k * 2;
                    mesh.add_triangle(base, base + 1, base + 2);
                    mesh.add_triangle(base + 1, base + 3, base + 2);
                }
            }
            canvas.painter.add(egui::Shape::mesh(mesh));

            if hovered == Some(wedge.index) {
                let mut outline = outer.clone();
                if arc.inner <= 0.0 {
                    outline.push(center);
                } else {
                    let mut inner = arc_points(center, arc.inner, wedge.start, wedge.sweep);
                    inner.reverse();
                    outline.extend(inner);
                }
                canvas.painter.add(egui::Shape::closed_line(
                    outline,
                    Stroke::new(HOVER_BORDER_WIDTH, canvas.fade(self.config.border_color)),
                ));
            }
        }

        // Separators between wedges.
        let border = Stroke::new(self.config.border_width, canvas.fade(self.config.border_color));
        if arc.wedges.iter().filter(|w| w.sweep > 0.0).count() > 1 {
            for wedge in &arc.wedges {
                canvas.painter.line_segment(
                    [
                        canvas.at(arc.point_at(wedge.start, arc.inner)),
                        canvas.at(arc.point_at(wedge.start, arc.outer)),
                    ],
                    border,
                );
            }
        }
    }

    fn paint_legend(&self, canvas: &Canvas<'_>, layout: &ChartLayout, theme: &Theme) {
        let entries = self.config.legend_entries();
        for item in &layout.legend {
            let Some((label, color)) = entries.get(item.index) else {
                continue;
            };
            let swatch = item.swatch.translate(canvas.origin.to_vec2());
            if self.config.kind.is_arc() {
                canvas
                    .painter
                    .circle_filled(swatch.center(), swatch.width() / 2.0, canvas.fade(*color));
            } else {
                canvas.painter.rect_filled(swatch, 2.0, canvas.fade(*color));
            }
            canvas.text(
                item.text_pos,
                Align2::LEFT_CENTER,
                label,
                layout.legend_size(),
                theme.foreground,
            );
        }
    }
}

/// Painter bound to a chart's origin and opacity.
struct Canvas<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
    opacity: f32,
}

impl Canvas<'_> {
    fn at(&self, local: Pos2) -> Pos2 {
        self.origin + local.to_vec2()
    }

    fn fade(&self, color: Color32) -> Color32 {
        Theme::with_opacity(color, self.opacity)
    }

    fn segment(&self, a: Pos2, b: Pos2, stroke: Stroke) {
        self.painter.line_segment([self.at(a), self.at(b)], stroke);
    }

    fn text(&self, local: Pos2, anchor: Align2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            self.at(local),
            anchor,
            text,
            FontId::proportional(size),
            self.fade(color),
        );
    }
}

fn paint_tooltip(
    painter: &egui::Painter,
    pointer: Pos2,
    lines: &[String],
    swatch: Color32,
    size: f32,
) {
    if lines.is_empty() {
        return;
    }
    let padding = size * 0.6;
    let font = FontId::proportional(size);
    let galleys: Vec<_> = lines
        .iter()
        .map(|l| painter.layout_no_wrap(l.clone(), font.clone(), Color32::WHITE))
        .collect();
    let swatch_size = size * 0.8;
    let text_width = galleys.iter().map(|g| g.rect.width()).fold(0.0_f32, f32::max);
    let line_height = size * 1.3;
    let width = swatch_size + padding * 3.0 + text_width;
    let height = line_height * galleys.len() as f32 + padding * 2.0;

    let clip = painter.clip_rect();
    let mut min = pointer + egui::vec2(14.0, -height / 2.0);
    if min.x + width > clip.right() {
        min.x = pointer.x - 14.0 - width;
    }
    min.y = min.y.clamp(clip.top(), (clip.bottom() - height).max(clip.top()));
    let rect = egui::Rect::from_min_size(min, egui::vec2(width, height));

    painter.rect_filled(rect, 6.0, Color32::from_rgba_unmultiplied(0, 0, 0, 204));
    let swatch_rect = egui::Rect::from_min_size(
        rect.min + egui::vec2(padding, padding + (line_height - swatch_size) / 2.0),
        egui::vec2(swatch_size, swatch_size),
    );
    painter.rect_filled(swatch_rect, 2.0, swatch);

    let text_x = swatch_rect.right() + padding;
    for (i, galley) in galleys.into_iter().enumerate() {
        let y = rect.top()
            + padding
            + line_height * i as f32
            + (line_height - galley.rect.height()) / 2.0;
        painter.galley(Pos2::new(text_x, y), galley, Color32::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKey;
    use eframe::egui::vec2;

    fn surface(key: ChartKey, size: Option<egui::Vec2>) -> ChartSurface {
        ChartSurface { key, size }
    }

    #[test]
    fn test_create_measured_surface_has_layout() {
        let key = ChartKey::StartupCosts;
        let chart = PaintedChartBackend
            .create(&surface(key, Some(vec2(800.0, 450.0))), key.config())
            .unwrap();
        assert_eq!(chart.layout().map(|l| l.size), Some(vec2(800.0, 450.0)));
        assert!(!chart.is_destroyed());
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let key = ChartKey::RevenueDistribution;
        let mut config = key.config();
        config.colors.clear();
        let result = PaintedChartBackend.create(&surface(key, None), config);
        assert!(matches!(result, Err(ChartError::InvalidData(_))));
    }

    #[test]
    fn test_create_rejects_foreign_surface() {
        let result = PaintedChartBackend.create(
            &surface(ChartKey::MarketGrowth, None),
            ChartKey::StartupCosts.config(),
        );
        assert!(matches!(result, Err(ChartError::Backend(_))));
    }

    #[test]
    fn test_resize_recomputes_layout() {
        let key = ChartKey::MarketGrowth;
        let mut chart = PaintedChartBackend
            .create(&surface(key, None), key.config())
            .unwrap();
        assert!(chart.layout().is_none());

        chart.resize(Some(vec2(640.0, 360.0))).unwrap();
        assert_eq!(chart.layout().map(|l| l.size), Some(vec2(640.0, 360.0)));
        chart.resize(Some(vec2(1280.0, 720.0))).unwrap();
        assert_eq!(chart.layout().map(|l| l.size), Some(vec2(1280.0, 720.0)));
    }

    #[test]
    fn test_resize_unmeasured_is_error() {
        let key = ChartKey::MarketGrowth;
        let mut chart = PaintedChartBackend
            .create(&surface(key, None), key.config())
            .unwrap();
        assert!(matches!(chart.resize(None), Err(ChartError::Unmeasured(_))));
    }

    #[test]
    fn test_destroyed_chart_rejects_calls() {
        let key = ChartKey::StartupCosts;
        let mut chart = PaintedChartBackend
            .create(&surface(key, Some(vec2(800.0, 450.0))), key.config())
            .unwrap();
        chart.destroy().unwrap();
        assert!(chart.is_destroyed());
        assert!(chart.layout().is_none());
        assert!(matches!(
            chart.resize(Some(vec2(1.0, 1.0))),
            Err(ChartError::Destroyed(_))
        ));
        assert!(chart.destroy().is_err());
    }

    #[test]
    fn test_hovered_index_uses_origin() {
        let key = ChartKey::StartupCosts;
        let chart = PaintedChartBackend
            .create(&surface(key, Some(vec2(960.0, 540.0))), key.config())
            .unwrap();
        let BodyLayout::Arc(arc) = &chart.layout().unwrap().body else {
            panic!("pie chart should have an arc layout");
        };
        let origin = Pos2::new(100.0, 50.0);
        let local = arc.point_at(-std::f32::consts::FRAC_PI_2 + 0.2, arc.outer / 2.0);
        let screen = origin + local.to_vec2();
        assert_eq!(chart.hovered_index(origin, Some(screen)), Some(0));
        assert_eq!(chart.hovered_index(origin, Some(Pos2::new(-500.0, -500.0))), None);
        assert_eq!(chart.hovered_index(origin, None), None);
    }
}
