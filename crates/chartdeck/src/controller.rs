use std::collections::BTreeMap;

use tracing::{debug, error, info, trace, warn};

use crate::charts::{ChartBackend, ChartHandle, ChartKey};
use crate::deck::{NavButton, Stage, TOTAL_SLIDES};
use crate::input::{Direction, NavCommand};

/// Owns the current slide index, mutates the stage to match it and creates
/// charts the first time their slide has been laid out.
pub struct PresentationController<B: ChartBackend> {
    stage: Stage,
    backend: B,
    current: usize,
    total: usize,
    charts: BTreeMap<ChartKey, B::Handle>,
    /// Slides entered since the last layout-settled signal, in the order
    /// they were shown. Each one still gets its charts.
    awaiting_layout: Vec<usize>,
}

impl<B: ChartBackend> PresentationController<B> {
    /// Create the controller showing `start` (clamped into the deck). The
    /// stage is brought in line with it straight away.
    pub fn new(stage: Stage, backend: B, start: usize) -> Self {
        let total = TOTAL_SLIDES;
        let current = start.clamp(1, total);
        let mut controller = Self {
            stage,
            backend,
            current,
            total,
            charts: BTreeMap::new(),
            awaiting_layout: vec![current],
        };
        for ordinal in 1..=controller.stage.slide_count() {
            if let Some(slide) = controller.stage.slide_mut(ordinal) {
                slide.active = ordinal == current;
            }
        }
        controller.update_page_indicator();
        controller.update_navigation_buttons();
        info!(current, total, "presentation ready");
        controller
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn chart(&self, key: ChartKey) -> Option<&B::Handle> {
        self.charts.get(&key)
    }

    #[cfg(test)]
    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    #[cfg(test)]
    pub fn awaiting_layout(&self) -> &[usize] {
        &self.awaiting_layout
    }

    pub fn navigate(&mut self, command: NavCommand) -> bool {
        match command {
            NavCommand::Next => self.advance(Direction::Forward),
            NavCommand::Prev => self.advance(Direction::Backward),
            NavCommand::First => self.go_to(1),
            NavCommand::Last => self.go_to(self.total),
        }
    }

    /// Step one slide; does nothing at either end of the deck.
    pub fn advance(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Forward if self.current < self.total => self.go_to(self.current + 1),
            Direction::Backward if self.current > 1 => self.go_to(self.current - 1),
            _ => false,
        }
    }

    /// Jump to `index`. Out-of-range targets and the current slide are
    /// ignored. Returns whether the slide changed.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < 1 || index > self.total || index == self.current {
            trace!(index, current = self.current, "ignoring navigation");
            return false;
        }

        let previous = self.current;
        if let Some(slide) = self.stage.slide_mut(previous) {
            slide.active = false;
        }
        self.current = index;
        if let Some(slide) = self.stage.slide_mut(index) {
            slide.active = true;
        }

        self.update_page_indicator();
        self.update_navigation_buttons();
        if !self.awaiting_layout.contains(&index) {
            self.awaiting_layout.push(index);
        }
        debug!(from = previous, to = index, "slide changed");
        true
    }

    fn update_page_indicator(&mut self) {
        let current = self.current.to_string();
        let total = self.total.to_string();
        if let Some(el) = self.stage.current_page_mut() {
            el.text = current;
        }
        if let Some(el) = self.stage.total_pages_mut() {
            el.text = total;
        }
    }

    fn update_navigation_buttons(&mut self) {
        let at_first = self.current == 1;
        let at_last = self.current == self.total;
        for (button, disabled) in [
            (NavButton::Prev, at_first),
            (NavButton::First, at_first),
            (NavButton::Next, at_last),
            (NavButton::Last, at_last),
        ] {
            if let Some(el) = self.stage.button_mut(button) {
                el.disabled = disabled;
            }
        }
    }

    /// The viewer has finished laying out: create the charts of every slide
    /// entered since the last call, including ones already left behind.
    pub fn layout_settled(&mut self) {
        for index in std::mem::take(&mut self.awaiting_layout) {
            self.initialize_charts_for(index);
        }
    }

    pub fn initialize_charts_for(&mut self, index: usize) {
        if let Some(key) = ChartKey::for_slide(index) {
            self.create_chart(key);
        }
    }

    /// Build one chart unless its surface is missing or it already exists.
    fn create_chart(&mut self, key: ChartKey) {
        let Some(surface) = self.stage.surface(key) else {
            trace!(surface = key.surface_id(), "chart surface not present");
            return;
        };
        if self.charts.contains_key(&key) {
            return;
        }

        match self.backend.create(surface, key.config()) {
            Ok(handle) => {
                debug!(chart = key.name(), "chart created");
                self.charts.insert(key, handle);
            }
            Err(err) => error!(chart = key.name(), error = %err, "error creating chart"),
        }
    }

    /// Tell every live chart its surface may have changed size.
    pub fn resize(&mut self) {
        for (key, handle) in self.charts.iter_mut() {
            let size = self.stage.surface(*key).and_then(|s| s.size);
            if let Err(err) = handle.resize(size) {
                warn!(chart = key.name(), error = %err, "error resizing chart");
            }
        }
    }

    /// Destroy every chart. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.charts.is_empty() {
            return;
        }
        for (key, mut handle) in std::mem::take(&mut self.charts) {
            if let Err(err) = handle.destroy() {
                warn!(chart = key.name(), error = %err, "error destroying chart");
            }
        }
        debug!("charts torn down");
    }
}

impl<B: ChartBackend> Drop for PresentationController<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
