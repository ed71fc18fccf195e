use std::time::Instant;

use eframe::egui;

use crate::input::Direction;

pub const TRANSITION_DURATION: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Fade,
    SlideHorizontal,
    None,
}

impl TransitionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "fade" => Self::Fade,
            "none" => Self::None,
            _ => Self::SlideHorizontal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::SlideHorizontal => "slide",
            Self::None => "none",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::SlideHorizontal => Self::Fade,
            Self::Fade => Self::None,
            Self::None => Self::SlideHorizontal,
        }
    }
}

/// A purely visual crossover between two slides. The controller has already
/// switched slides by the time one of these starts.
#[derive(Debug, Clone, Copy)]
pub struct ActiveTransition {
    pub from: usize,
    pub to: usize,
    pub kind: TransitionKind,
    pub direction: Direction,
    pub start: Instant,
}

impl ActiveTransition {
    pub fn new(from: usize, to: usize, kind: TransitionKind, start: Instant) -> Self {
        let direction = if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Self {
            from,
            to,
            kind,
            direction,
            start,
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        let raw = (now.saturating_duration_since(self.start).as_secs_f32() / TRANSITION_DURATION)
            .clamp(0.0, 1.0);
        ease_in_out(raw)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.kind == TransitionKind::None
            || now.saturating_duration_since(self.start).as_secs_f32() >= TRANSITION_DURATION
    }

    /// Rects and opacities for the outgoing and incoming slide.
    pub fn frames(&self, rect: egui::Rect, now: Instant) -> [(usize, egui::Rect, f32); 2] {
        let progress = self.progress(now);
        match self.kind {
            TransitionKind::Fade | TransitionKind::None => [
                (self.from, rect, 1.0 - progress),
                (self.to, rect, progress),
            ],
            TransitionKind::SlideHorizontal => {
                let w = rect.width();
                let sign = match self.direction {
                    Direction::Forward => -1.0,
                    Direction::Backward => 1.0,
                };
                let from_offset = sign * progress * w;
                let to_offset = from_offset - sign * w;
                [
                    (self.from, rect.translate(egui::vec2(from_offset, 0.0)), 1.0),
                    (self.to, rect.translate(egui::vec2(to_offset, 0.0)), 1.0),
                ]
            }
        }
    }
}

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
