//! Chart geometry in surface-local coordinates (origin at the surface's top
//! left). Layouts depend only on the surface size and the configuration, so
//! a chart recomputes them on resize and otherwise just translates them.

use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};

use super::{ChartConfig, ChartKind, LegendPosition};

/// Surface height at which the font sizes below apply unscaled.
const REFERENCE_HEIGHT: f32 = 540.0;
const TITLE_SIZE: f32 = 26.0;
const LEGEND_SIZE: f32 = 17.0;
const TICK_SIZE: f32 = 15.0;
const PADDING: f32 = 14.0;
/// Rough glyph advance as a fraction of the font size, used to reserve room
/// for labels before any text is laid out.
const GLYPH_ADVANCE: f32 = 0.55;
const SEGMENT_STEPS: usize = 16;

#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub size: Vec2,
    pub font_scale: f32,
    pub title_pos: Pos2,
    pub legend: Vec<LegendItem>,
    pub body: BodyLayout,
}

#[derive(Debug, Clone)]
pub struct LegendItem {
    pub index: usize,
    pub swatch: Rect,
    pub text_pos: Pos2,
}

#[derive(Debug, Clone)]
pub enum BodyLayout {
    Line(LineLayout),
    Arc(ArcLayout),
}

#[derive(Debug, Clone)]
pub struct AxisTick {
    pub pos: f32,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct LineLayout {
    pub plot: Rect,
    pub points: Vec<Pos2>,
    /// Smoothed outline through every point, ready to stroke or fill.
    pub path: Vec<Pos2>,
    pub y_ticks: Vec<AxisTick>,
    pub x_ticks: Vec<AxisTick>,
    pub y_title_pos: Pos2,
    pub x_title_pos: Pos2,
}

#[derive(Debug, Clone, Copy)]
pub struct Wedge {
    pub index: usize,
    /// Radians, clockwise in screen space, 0 pointing right.
    pub start: f32,
    pub sweep: f32,
}

#[derive(Debug, Clone)]
pub struct ArcLayout {
    pub center: Pos2,
    pub outer: f32,
    pub inner: f32,
    pub wedges: Vec<Wedge>,
}

impl ChartLayout {
    pub fn compute(config: &ChartConfig, size: Vec2) -> Self {
        let fs = (size.y / REFERENCE_HEIGHT).clamp(0.4, 3.0);
        let padding = PADDING * fs;

        let title_height = if config.title.is_empty() {
            0.0
        } else {
            TITLE_SIZE * fs * 1.6
        };
        let title_pos = pos2(size.x / 2.0, padding + title_height / 2.0);
        let top = padding + title_height;

        let entries: Vec<String> = config
            .legend_entries()
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        let area = Rect::from_min_max(pos2(padding, top), pos2(size.x - padding, size.y - padding));
        let (legend, body_area) = layout_legend(&entries, config.legend, area, fs);

        let body = match config.kind {
            ChartKind::Line { tension, .. } => {
                BodyLayout::Line(layout_line(config, body_area, tension, fs))
            }
            ChartKind::Doughnut { cutout } => {
                BodyLayout::Arc(layout_arc(config, body_area, cutout))
            }
            ChartKind::Pie => BodyLayout::Arc(layout_arc(config, body_area, 0.0)),
        };

        Self {
            size,
            font_scale: fs,
            title_pos,
            legend,
            body,
        }
    }

    pub fn title_size(&self) -> f32 {
        TITLE_SIZE * self.font_scale
    }

    pub fn legend_size(&self) -> f32 {
        LEGEND_SIZE * self.font_scale
    }

    pub fn tick_size(&self) -> f32 {
        TICK_SIZE * self.font_scale
    }

    /// Data index under a surface-local position, if any.
    pub fn hit_test(&self, pos: Pos2) -> Option<usize> {
        match &self.body {
            BodyLayout::Line(line) => line.nearest_index(pos),
            BodyLayout::Arc(arc) => arc.wedge_at(pos),
        }
    }
}

fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * GLYPH_ADVANCE
}

/// Place legend rows and return the area left for the chart body.
fn layout_legend(
    entries: &[String],
    position: LegendPosition,
    area: Rect,
    fs: f32,
) -> (Vec<LegendItem>, Rect) {
    if entries.is_empty() {
        return (Vec::new(), area);
    }

    let font = LEGEND_SIZE * fs;
    let swatch = font * 0.8;
    let gap = font * 0.5;
    let row_height = font * 1.8;
    let item_width = |label: &str| swatch + gap + estimate_text_width(label, font) + font;

    match position {
        LegendPosition::Right => {
            let widest = entries
                .iter()
                .map(|e| item_width(e))
                .fold(0.0_f32, f32::max)
                .min(area.width() * 0.45);
            let column_height = row_height * entries.len() as f32;
            let left = area.right() - widest;
            let top = area.center().y - column_height / 2.0;
            let items = entries
                .iter()
                .enumerate()
                .map(|(index, _)| {
                    let y = top + row_height * (index as f32 + 0.5);
                    LegendItem {
                        index,
                        swatch: Rect::from_center_size(
                            pos2(left + swatch / 2.0, y),
                            vec2(swatch, swatch),
                        ),
                        text_pos: pos2(left + swatch + gap, y),
                    }
                })
                .collect();
            let body = Rect::from_min_max(area.min, pos2(left - gap * 2.0, area.max.y));
            (items, body)
        }
        LegendPosition::Bottom => {
            // Flow items into rows, then center each row.
            let mut rows: Vec<Vec<(usize, f32)>> = vec![Vec::new()];
            let mut row_width = 0.0;
            for (index, entry) in entries.iter().enumerate() {
                let w = item_width(entry);
                if row_width + w > area.width() && !rows.last().is_some_and(|r| r.is_empty()) {
                    rows.push(Vec::new());
                    row_width = 0.0;
                }
                if let Some(row) = rows.last_mut() {
                    row.push((index, w));
                }
                row_width += w;
            }

            let legend_height = row_height * rows.len() as f32;
            let legend_top = area.bottom() - legend_height;
            let mut items = Vec::with_capacity(entries.len());
            for (row_index, row) in rows.iter().enumerate() {
                let total: f32 = row.iter().map(|(_, w)| w).sum();
                let mut x = area.center().x - total / 2.0;
                let y = legend_top + row_height * (row_index as f32 + 0.5);
                for &(index, w) in row {
                    items.push(LegendItem {
                        index,
                        swatch: Rect::from_center_size(
                            pos2(x + swatch / 2.0, y),
                            vec2(swatch, swatch),
                        ),
                        text_pos: pos2(x + swatch + gap, y),
                    });
                    x += w;
                }
            }
            let body = Rect::from_min_max(area.min, pos2(area.max.x, legend_top - gap));
            (items, body)
        }
    }
}

fn layout_line(config: &ChartConfig, area: Rect, tension: f32, fs: f32) -> LineLayout {
    let tick_font = TICK_SIZE * fs;
    let line_height = tick_font * 1.6;

    let (data_min, data_max) = config
        .values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let axis = config.y_axis.as_ref();
    let mut min = axis.and_then(|a| a.min).unwrap_or(data_min);
    let mut max = axis.and_then(|a| a.max).unwrap_or(data_max);
    if (max - min).abs() < f64::EPSILON {
        min -= 1.0;
        max += 1.0;
    }

    let (tick_values, step) = nice_ticks(min, max, 5);
    let tick_labels: Vec<String> = tick_values.iter().map(|v| tick_label(*v, step)).collect();
    let label_width = tick_labels
        .iter()
        .map(|l| estimate_text_width(l, tick_font))
        .fold(0.0_f32, f32::max)
        + tick_font;

    let y_title_height = if config.y_axis.is_some() { line_height } else { 0.0 };
    let x_title_height = if config.x_axis.is_some() { line_height } else { 0.0 };

    let plot = Rect::from_min_max(
        pos2(area.left() + label_width, area.top() + y_title_height + tick_font * 0.5),
        pos2(
            area.right() - tick_font,
            area.bottom() - line_height - x_title_height,
        ),
    );

    let value_to_y = |v: f64| -> f32 {
        let t = ((v - min) / (max - min)) as f32;
        plot.bottom() - t * plot.height()
    };
    let count = config.values.len();
    let index_to_x = |i: usize| -> f32 {
        if count <= 1 {
            plot.center().x
        } else {
            plot.left() + plot.width() * i as f32 / (count - 1) as f32
        }
    };

    let points: Vec<Pos2> = config
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| pos2(index_to_x(i), value_to_y(*v)))
        .collect();
    let path = smooth_path(&points, tension, plot);

    let y_ticks = tick_values
        .iter()
        .zip(tick_labels)
        .map(|(v, label)| AxisTick {
            pos: value_to_y(*v),
            label,
        })
        .collect();
    let x_ticks = config
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| AxisTick {
            pos: index_to_x(i),
            label: label.clone(),
        })
        .collect();

    LineLayout {
        plot,
        points,
        path,
        y_ticks,
        x_ticks,
        y_title_pos: pos2(area.left(), area.top() + y_title_height / 2.0),
        x_title_pos: pos2(plot.center().x, area.bottom() - x_title_height / 2.0),
    }
}

impl LineLayout {
    /// Index mode: the point whose x is closest, anywhere inside the plot.
    pub fn nearest_index(&self, pos: Pos2) -> Option<usize> {
        if !self.plot.expand(8.0).contains(pos) {
            return None;
        }
        self.points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (a.x - pos.x).abs().total_cmp(&(b.x - pos.x).abs()))
            .map(|(i, _)| i)
    }
}

fn layout_arc(config: &ChartConfig, area: Rect, cutout: f32) -> ArcLayout {
    let outer = (area.width().min(area.height()) / 2.0 - config.border_width).max(0.0);
    let inner = outer * cutout.clamp(0.0, 0.95);
    let total = config.total() as f32;

    let mut start = -FRAC_PI_2;
    let wedges = config
        .values
        .iter()
        .enumerate()
        .map(|(index, v)| {
            let sweep = if total > 0.0 {
                *v as f32 / total * TAU
            } else {
                0.0
            };
            let wedge = Wedge {
                index,
                start,
                sweep,
            };
            start += sweep;
            wedge
        })
        .collect();

    ArcLayout {
        center: area.center(),
        outer,
        inner,
        wedges,
    }
}

impl ArcLayout {
    pub fn wedge_at(&self, pos: Pos2) -> Option<usize> {
        let d = pos - self.center;
        let r = d.length();
        if r > self.outer || r < self.inner {
            return None;
        }
        let origin = self.wedges.first()?.start;
        let angle = (d.y.atan2(d.x) - origin).rem_euclid(TAU);
        self.wedges
            .iter()
            .find(|w| {
                let rel = w.start - origin;
                angle >= rel && angle < rel + w.sweep
            })
            .map(|w| w.index)
    }

    /// Point on the circle of radius `r` at `angle`.
    pub fn point_at(&self, angle: f32, r: f32) -> Pos2 {
        self.center + vec2(angle.cos(), angle.sin()) * r
    }
}

/// Sample points along an arc, both ends included.
pub fn arc_points(center: Pos2, radius: f32, start: f32, sweep: f32) -> Vec<Pos2> {
    let steps = ((sweep.abs() / TAU) * 96.0).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| {
            let a = start + sweep * i as f32 / steps as f32;
            center + vec2(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// Cubic spline through `points`, with control points spaced by `tension`
/// and kept inside `bounds` vertically. Every input point appears in the
/// output.
pub fn smooth_path(points: &[Pos2], tension: f32, bounds: Rect) -> Vec<Pos2> {
    if points.len() < 3 || tension <= 0.0 {
        return points.to_vec();
    }

    let n = points.len();
    let mut before = Vec::with_capacity(n);
    let mut after = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[i.saturating_sub(1)];
        let cur = points[i];
        let next = points[(i + 1).min(n - 1)];

        let d01 = prev.distance(cur);
        let d12 = cur.distance(next);
        let total = d01 + d12;
        let (fa, fb) = if total > 0.0 {
            (tension * d01 / total, tension * d12 / total)
        } else {
            (0.0, 0.0)
        };
        let span = next - prev;
        let clamp = |p: Pos2| pos2(p.x, p.y.clamp(bounds.top(), bounds.bottom()));
        before.push(clamp(cur - span * fa));
        after.push(clamp(cur + span * fb));
    }

    let mut path = Vec::with_capacity((n - 1) * SEGMENT_STEPS + 1);
    path.push(points[0]);
    for i in 0..n - 1 {
        let (p0, c1, c2, p3) = (points[i], after[i], before[i + 1], points[i + 1]);
        for step in 1..=SEGMENT_STEPS {
            let t = step as f32 / SEGMENT_STEPS as f32;
            let u = 1.0 - t;
            let p = p0.to_vec2() * (u * u * u)
                + c1.to_vec2() * (3.0 * u * u * t)
                + c2.to_vec2() * (3.0 * u * t * t)
                + p3.to_vec2() * (t * t * t);
            path.push(p.to_pos2());
        }
    }
    path
}

/// "Nice" tick values covering `[min, max]` with roughly `target` steps.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> (Vec<f64>, f64) {
    let range = max - min;
    if range.abs() < 1e-10 || target == 0 {
        return (vec![min], 1.0);
    }
    let rough = range / target as f64;
    let mag = 10.0_f64.powi(rough.log10().floor() as i32);
    let normalized = rough / mag;
    let step = if normalized < 1.5 {
        mag
    } else if normalized < 3.5 {
        mag * 2.0
    } else if normalized < 7.5 {
        mag * 5.0
    } else {
        mag * 10.0
    };

    let mut ticks = Vec::new();
    let mut v = (min / step - 1e-9).ceil() * step;
    while v <= max + step * 0.01 {
        // `+ 0.0` turns a negative zero into zero
        ticks.push(v + 0.0);
        v += step;
    }
    (ticks, step)
}

pub fn tick_label(v: f64, step: f64) -> String {
    if step >= 0.95 {
        format!("{v:.0}")
    } else if step >= 0.095 {
        format!("{v:.1}")
    } else {
        format!("{v:.2}")
    }
}
