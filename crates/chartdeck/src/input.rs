use eframe::egui::{self, Pos2};

use crate::deck::NavButton;

/// Minimum horizontal travel, in points, for a touch to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    First,
    Last,
}

/// Full-height click areas at the slide edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickZone {
    Left,
    Right,
}

impl ClickZone {
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Left => "leftClick",
            Self::Right => "rightClick",
        }
    }

    pub fn command(self) -> NavCommand {
        match self {
            Self::Left => NavCommand::Prev,
            Self::Right => NavCommand::Next,
        }
    }
}

/// Everything the deck session reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeckEvent {
    Navigate(NavCommand),
    ButtonClicked(NavButton),
    ZoneClicked(ClickZone),
    TouchStart(Pos2),
    TouchEnd(Pos2),
    TouchCancel,
    Resized,
}

impl DeckEvent {
    /// Keys and clicks wait for the session to be bound; touch tracking and
    /// resizes do not.
    pub fn needs_binding(self) -> bool {
        matches!(
            self,
            Self::Navigate(_) | Self::ButtonClicked(_) | Self::ZoneClicked(_)
        )
    }
}

pub fn command_for_key(key: egui::Key) -> Option<NavCommand> {
    match key {
        egui::Key::ArrowRight | egui::Key::Space => Some(NavCommand::Next),
        egui::Key::ArrowLeft => Some(NavCommand::Prev),
        egui::Key::Home => Some(NavCommand::First),
        egui::Key::End => Some(NavCommand::Last),
        _ => None,
    }
}

/// Collect navigation key presses from this frame, in the order they arrived.
pub fn key_events(input: &egui::InputState) -> Vec<DeckEvent> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } if modifiers.is_none() => command_for_key(*key).map(DeckEvent::Navigate),
            _ => None,
        })
        .collect()
}

/// Collect touch start/end events from this frame.
pub fn touch_events(input: &egui::InputState) -> Vec<DeckEvent> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Touch { phase, pos, .. } => match phase {
                egui::TouchPhase::Start => Some(DeckEvent::TouchStart(*pos)),
                egui::TouchPhase::End => Some(DeckEvent::TouchEnd(*pos)),
                egui::TouchPhase::Cancel => Some(DeckEvent::TouchCancel),
                egui::TouchPhase::Move => None,
            },
            _ => None,
        })
        .collect()
}

/// Turns a touch start/end pair into a horizontal swipe.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<Pos2>,
}

impl SwipeTracker {
    pub fn begin(&mut self, pos: Pos2) {
        self.start = Some(pos);
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    #[cfg(test)]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Finish the gesture. Swiping left (finger moving towards smaller x)
    /// goes forward.
    pub fn finish(&mut self, end: Pos2) -> Option<NavCommand> {
        let start = self.start.take()?;
        let dx = start.x - end.x;
        let dy = start.y - end.y;

        if dx.abs() > dy.abs() && dx.abs() > SWIPE_THRESHOLD {
            if dx > 0.0 {
                Some(NavCommand::Next)
            } else {
                Some(NavCommand::Prev)
            }
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn swipe(from: Pos2, to: Pos2) -> Option<NavCommand> {
        let mut tracker = SwipeTracker::default();
        tracker.begin(from);
        tracker.finish(to)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(command_for_key(egui::Key::ArrowRight), Some(NavCommand::Next));
        assert_eq!(command_for_key(egui::Key::Space), Some(NavCommand::Next));
        assert_eq!(command_for_key(egui::Key::ArrowLeft), Some(NavCommand::Prev));
        assert_eq!(command_for_key(egui::Key::Home), Some(NavCommand::First));
        assert_eq!(command_for_key(egui::Key::End), Some(NavCommand::Last));
        assert_eq!(command_for_key(egui::Key::ArrowUp), None);
        assert_eq!(command_for_key(egui::Key::Enter), None);
    }

    #[test]
    fn test_swipe_left_goes_forward() {
        assert_eq!(
            swipe(pos2(300.0, 200.0), pos2(200.0, 210.0)),
            Some(NavCommand::Next)
        );
    }

    #[test]
    fn test_swipe_right_goes_back() {
        assert_eq!(
            swipe(pos2(100.0, 200.0), pos2(220.0, 180.0)),
            Some(NavCommand::Prev)
        );
    }

    #[test]
    fn test_short_swipe_ignored() {
        assert_eq!(swipe(pos2(100.0, 100.0), pos2(150.0, 100.0)), None);
        assert_eq!(swipe(pos2(100.0, 100.0), pos2(49.0, 100.0)), Some(NavCommand::Next));
    }

    #[test]
    fn test_vertical_swipe_ignored() {
        assert_eq!(swipe(pos2(100.0, 100.0), pos2(180.0, 300.0)), None);
    }

    #[test]
    fn test_swipe_from_origin_counts() {
        assert_eq!(swipe(pos2(0.0, 0.0), pos2(80.0, 0.0)), Some(NavCommand::Prev));
    }

    #[test]
    fn test_finish_without_begin() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.finish(pos2(0.0, 0.0)), None);
    }

    #[test]
    fn test_tracker_resets_after_finish_and_cancel() {
        let mut tracker = SwipeTracker::default();
        tracker.begin(pos2(300.0, 0.0));
        assert!(tracker.is_tracking());
        tracker.finish(pos2(0.0, 0.0));
        assert!(!tracker.is_tracking());

        tracker.begin(pos2(300.0, 0.0));
        tracker.cancel();
        assert_eq!(tracker.finish(pos2(0.0, 0.0)), None);
    }

    #[test]
    fn test_click_zones() {
        assert_eq!(ClickZone::Left.command(), NavCommand::Prev);
        assert_eq!(ClickZone::Right.command(), NavCommand::Next);
        assert_eq!(ClickZone::Right.element_id(), "rightClick");
    }

    #[test]
    fn test_only_keys_and_clicks_need_binding() {
        assert!(DeckEvent::Navigate(NavCommand::Next).needs_binding());
        assert!(DeckEvent::ButtonClicked(NavButton::Last).needs_binding());
        assert!(DeckEvent::ZoneClicked(ClickZone::Left).needs_binding());
        assert!(!DeckEvent::TouchStart(pos2(1.0, 1.0)).needs_binding());
        assert!(!DeckEvent::TouchEnd(pos2(1.0, 1.0)).needs_binding());
        assert!(!DeckEvent::TouchCancel.needs_binding());
        assert!(!DeckEvent::Resized.needs_binding());
    }
}
