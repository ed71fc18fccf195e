use eframe::egui;
use std::time::Instant;
use tracing::{debug, info};

use crate::charts::ChartKey;
use crate::controller::PresentationController;
use crate::deck::Stage;
use crate::deck::content::{self, DECK_TITLE};
use crate::input::{self, DeckEvent};
use crate::render;
use crate::render::chart::PaintedChartBackend;
use crate::render::chrome;
use crate::render::transition::{ActiveTransition, TransitionKind};
use crate::session::DeckSession;
use crate::theme::Theme;

const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start).as_secs_f32() >= TOAST_DURATION
    }
}

struct ViewerApp {
    session: DeckSession<PaintedChartBackend>,
    theme: Theme,
    transition_kind: TransitionKind,
    transition: Option<ActiveTransition>,
    toast: Option<Toast>,
    /// Slide area size from the last frame, to notice window resizes
    last_size: Option<egui::Vec2>,
}

impl ViewerApp {
    fn new(start_slide: usize, theme: Theme, transition_kind: TransitionKind) -> Self {
        let controller =
            PresentationController::new(Stage::standard(), PaintedChartBackend, start_slide);
        Self {
            session: DeckSession::new(controller),
            theme,
            transition_kind,
            transition: None,
            toast: None,
            last_size: None,
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        debug!(theme = %self.theme.name, "theme toggled");
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    fn cycle_transition(&mut self) {
        self.transition_kind = self.transition_kind.next();
        debug!(transition = self.transition_kind.name(), "transition changed");
        self.toast = Some(Toast::new(format!(
            "Transition: {}",
            self.transition_kind.name()
        )));
    }

    fn draw_slide(
        &self,
        ui: &egui::Ui,
        index: usize,
        rect: egui::Rect,
        opacity: f32,
        scale: f32,
        pointer: Option<egui::Pos2>,
    ) {
        let Some(slide) = content::slide(index) else {
            return;
        };
        let chart =
            ChartKey::for_slide(index).and_then(|key| self.session.controller().chart(key));
        render::render_slide(ui, slide, &self.theme, rect, opacity, scale, chart, pointer);
    }

    fn draw_presentation(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        scale: f32,
        now: Instant,
        pointer: Option<egui::Pos2>,
    ) {
        match &self.transition {
            Some(t) => {
                for (index, slide_rect, opacity) in t.frames(rect, now) {
                    self.draw_slide(ui, index, slide_rect, opacity, scale, None);
                }
            }
            None => {
                let current = self.session.controller().current();
                self.draw_slide(ui, current, rect, 1.0, scale, pointer);
            }
        }
    }

    fn draw_toast(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32, now: Instant) {
        let Some(toast) = &self.toast else { return };
        let opacity = toast.opacity(now);
        if opacity <= 0.0 {
            return;
        }
        let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(self.theme.panel, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(20.0 * scale),
            toast_color,
        );
        let padding = 16.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.top() + 40.0 * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
        let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
        ui.painter().galley(text_pos, galley, toast_color);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut events: Vec<DeckEvent> = Vec::new();
        let mut pointer = None;

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape) {
                self.session.close();
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::T) {
                self.toggle_theme();
            }
            if i.key_pressed(egui::Key::S) {
                self.cycle_transition();
            }
            events.extend(input::key_events(i));
            events.extend(input::touch_events(i));
            pointer = i.pointer.hover_pos();
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if self.transition.is_some_and(|t| t.is_finished(now)) {
            self.transition = None;
        }
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }

        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = render::compute_scale(rect);

                if self.last_size.is_some_and(|size| size != rect.size()) {
                    events.push(DeckEvent::Resized);
                }
                self.last_size = Some(rect.size());

                let chart_size = render::chart_rect(rect, &self.theme, scale).size();
                self.session
                    .controller_mut()
                    .stage_mut()
                    .measure_surfaces(chart_size);
                self.session.tick(now);
                if self.transition.is_none() {
                    self.session.layout_settled();
                }

                self.draw_presentation(ui, rect, scale, now, pointer);
                events.extend(chrome::draw_chrome(
                    ui,
                    self.session.controller().stage(),
                    &self.theme,
                    rect,
                    scale,
                ));
                self.draw_toast(ui, rect, scale, now);
            });

        let before = self.session.controller().current();
        let mut changed = false;
        for event in events {
            changed |= self.session.handle(event, now).is_some();
        }
        if changed {
            let after = self.session.controller().current();
            if after != before {
                self.transition = Some(ActiveTransition::new(
                    before,
                    after,
                    self.transition_kind,
                    now,
                ));
            }
            ctx.request_repaint();
        }

        // Input is bound once the first frame is on screen
        if !self.session.is_ready() {
            self.session.ready();
        }

        if self.transition.is_some() || self.toast.is_some() {
            ctx.request_repaint();
        }
        if let Some(deadline) = self.session.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

pub fn run(
    windowed: bool,
    start_slide: Option<usize>,
    theme: &str,
    transition: &str,
) -> anyhow::Result<()> {
    let start = start_slide.unwrap_or(1);
    let theme = Theme::from_name(theme);
    let transition_kind = TransitionKind::from_name(transition);
    info!(
        start,
        theme = %theme.name,
        transition = transition_kind.name(),
        windowed,
        "launching viewer"
    );

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(DECK_TITLE)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(DECK_TITLE)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        DECK_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(start, theme, transition_kind)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_toast_fades_out() {
        let toast = Toast::new("Theme: dark".to_string());
        let start = toast.start;
        assert_eq!(toast.opacity(start), 1.0);
        let mid = toast.opacity(start + Duration::from_millis(1250));
        assert!(mid > 0.0 && mid < 1.0);
        assert!(toast.is_expired(start + Duration::from_millis(1500)));
    }

    #[test]
    fn test_viewer_starts_on_clamped_slide() {
        let app = ViewerApp::new(99, Theme::light(), TransitionKind::Fade);
        assert_eq!(app.session.controller().current(), 14);
        assert!(!app.session.is_ready());
    }

    #[test]
    fn test_cycle_transition() {
        let mut app = ViewerApp::new(1, Theme::light(), TransitionKind::SlideHorizontal);
        app.cycle_transition();
        assert_eq!(app.transition_kind, TransitionKind::Fade);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Transition: fade")
        );
    }

    #[test]
    fn test_toggle_theme_shows_toast() {
        let mut app = ViewerApp::new(1, Theme::light(), TransitionKind::None);
        app.toggle_theme();
        assert_eq!(app.theme.name, "dark");
        assert_eq!(app.toast.as_ref().map(|t| t.message.as_str()), Some("Theme: dark"));
    }
}
