pub mod content;

use std::collections::BTreeMap;

use eframe::egui::Vec2;

use crate::charts::ChartKey;
use crate::input::NavCommand;

/// Number of slides in the deck.
pub const TOTAL_SLIDES: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NavButton {
    First,
    Prev,
    Next,
    Last,
}

impl NavButton {
    pub fn all() -> [NavButton; 4] {
        [Self::First, Self::Prev, Self::Next, Self::Last]
    }

    pub fn element_id(self) -> &'static str {
        match self {
            Self::First => "firstSlide",
            Self::Prev => "prevSlide",
            Self::Next => "nextSlide",
            Self::Last => "lastSlide",
        }
    }

    pub fn command(self) -> NavCommand {
        match self {
            Self::First => NavCommand::First,
            Self::Prev => NavCommand::Prev,
            Self::Next => NavCommand::Next,
            Self::Last => NavCommand::Last,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::First => "\u{ab}",
            Self::Prev => "\u{2039}",
            Self::Next => "\u{203a}",
            Self::Last => "\u{bb}",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SlideElement {
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ButtonElement {
    pub disabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TextElement {
    pub text: String,
}

/// A drawing area a chart can be attached to. `size` stays `None` until the
/// viewer has laid the area out at least once.
#[derive(Debug, Clone)]
pub struct ChartSurface {
    pub key: ChartKey,
    pub size: Option<Vec2>,
}

impl ChartSurface {
    pub fn element_id(&self) -> &'static str {
        self.key.surface_id()
    }
}

/// The retained element model the controller mutates and the viewer reads.
///
/// Every element lookup returns an `Option`; a stage may be built without
/// some elements and the controller simply skips what is not there.
#[derive(Debug, Clone)]
pub struct Stage {
    slides: Vec<SlideElement>,
    buttons: BTreeMap<NavButton, ButtonElement>,
    current_page: Option<TextElement>,
    total_pages: Option<TextElement>,
    surfaces: BTreeMap<ChartKey, ChartSurface>,
}

impl Default for Stage {
    fn default() -> Self {
        Self::standard()
    }
}

impl Stage {
    /// The full deck: every slide, all four buttons, the page indicator and
    /// the three chart surfaces. Slide 1 starts active.
    pub fn standard() -> Self {
        let mut slides = vec![SlideElement::default(); TOTAL_SLIDES];
        slides[0].active = true;
        Self {
            slides,
            buttons: NavButton::all()
                .into_iter()
                .map(|b| (b, ButtonElement::default()))
                .collect(),
            current_page: Some(TextElement::default()),
            total_pages: Some(TextElement::default()),
            surfaces: ChartKey::all()
                .into_iter()
                .map(|key| (key, ChartSurface { key, size: None }))
                .collect(),
        }
    }

    /// A stage with no elements at all.
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            slides: Vec::new(),
            buttons: BTreeMap::new(),
            current_page: None,
            total_pages: None,
            surfaces: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_slide_count(mut self, count: usize) -> Self {
        self.slides.resize(count, SlideElement::default());
        self
    }

    #[cfg(test)]
    pub fn without_button(mut self, button: NavButton) -> Self {
        self.buttons.remove(&button);
        self
    }

    #[cfg(test)]
    pub fn without_surface(mut self, key: ChartKey) -> Self {
        self.surfaces.remove(&key);
        self
    }

    #[cfg(test)]
    pub fn without_page_indicator(mut self) -> Self {
        self.current_page = None;
        self.total_pages = None;
        self
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide element by 1-based ordinal.
    pub fn slide(&self, ordinal: usize) -> Option<&SlideElement> {
        ordinal.checked_sub(1).and_then(|i| self.slides.get(i))
    }

    pub fn slide_mut(&mut self, ordinal: usize) -> Option<&mut SlideElement> {
        ordinal.checked_sub(1).and_then(|i| self.slides.get_mut(i))
    }

    /// Ordinals of every slide currently marked active.
    pub fn active_slides(&self) -> Vec<usize> {
        self.slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, _)| i + 1)
            .collect()
    }

    pub fn button(&self, button: NavButton) -> Option<&ButtonElement> {
        self.buttons.get(&button)
    }

    pub fn button_mut(&mut self, button: NavButton) -> Option<&mut ButtonElement> {
        self.buttons.get_mut(&button)
    }

    /// True when the button exists and is enabled.
    pub fn button_enabled(&self, button: NavButton) -> bool {
        self.button(button).is_some_and(|b| !b.disabled)
    }

    pub fn current_page(&self) -> Option<&str> {
        self.current_page.as_ref().map(|t| t.text.as_str())
    }

    pub fn current_page_mut(&mut self) -> Option<&mut TextElement> {
        self.current_page.as_mut()
    }

    pub fn total_pages(&self) -> Option<&str> {
        self.total_pages.as_ref().map(|t| t.text.as_str())
    }

    pub fn total_pages_mut(&mut self) -> Option<&mut TextElement> {
        self.total_pages.as_mut()
    }

    pub fn surface(&self, key: ChartKey) -> Option<&ChartSurface> {
        self.surfaces.get(&key)
    }

    /// Record the laid-out size of every chart surface. All chart slides share
    /// one layout, so a single measurement covers them.
    pub fn measure_surfaces(&mut self, size: Vec2) {
        for surface in self.surfaces.values_mut() {
            surface.size = Some(size);
        }
    }

    #[cfg(test)]
    pub fn measure_surface(&mut self, key: ChartKey, size: Vec2) {
        if let Some(surface) = self.surfaces.get_mut(&key) {
            surface.size = Some(size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_stage_elements() {
        let stage = Stage::standard();
        assert_eq!(stage.slide_count(), TOTAL_SLIDES);
        assert_eq!(stage.active_slides(), vec![1]);
        for button in NavButton::all() {
            assert!(stage.button(button).is_some());
        }
        for key in ChartKey::all() {
            assert!(stage.surface(key).is_some());
        }
    }

    #[test]
    fn test_slide_lookup_is_one_based() {
        let stage = Stage::standard();
        assert!(stage.slide(0).is_none());
        assert!(stage.slide(1).is_some());
        assert!(stage.slide(TOTAL_SLIDES).is_some());
        assert!(stage.slide(TOTAL_SLIDES + 1).is_none());
    }

    #[test]
    fn test_builders_remove_elements() {
        let stage = Stage::standard()
            .without_button(NavButton::Last)
            .without_surface(ChartKey::StartupCosts)
            .without_page_indicator()
            .with_slide_count(5);
        assert!(stage.button(NavButton::Last).is_none());
        assert!(!stage.button_enabled(NavButton::Last));
        assert!(stage.surface(ChartKey::StartupCosts).is_none());
        assert!(stage.current_page().is_none());
        assert_eq!(stage.slide_count(), 5);
    }

    #[test]
    fn test_measure_surfaces() {
        let mut stage = Stage::standard().without_surface(ChartKey::MarketGrowth);
        stage.measure_surfaces(Vec2::new(800.0, 450.0));
        assert_eq!(
            stage.surface(ChartKey::StartupCosts).and_then(|s| s.size),
            Some(Vec2::new(800.0, 450.0))
        );
        stage.measure_surface(ChartKey::MarketGrowth, Vec2::new(1.0, 1.0));
        assert!(stage.surface(ChartKey::MarketGrowth).is_none());
    }

    #[test]
    fn test_button_ids() {
        assert_eq!(NavButton::First.element_id(), "firstSlide");
        assert_eq!(NavButton::Last.command(), NavCommand::Last);
    }
}
