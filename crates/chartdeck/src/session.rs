use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::charts::ChartBackend;
use crate::controller::PresentationController;
use crate::input::{DeckEvent, NavCommand, SwipeTracker};
use crate::schedule::Debouncer;

/// Quiet period after the last resize before charts are told about it.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Routes input events to the controller.
///
/// Key and click input is ignored until [`DeckSession::ready`] is called; the
/// viewer does that once its first frame is on screen. Touch and resize
/// events are handled from the start.
pub struct DeckSession<B: ChartBackend> {
    controller: PresentationController<B>,
    swipe: SwipeTracker,
    resize: Debouncer,
    ready: bool,
}

impl<B: ChartBackend> DeckSession<B> {
    pub fn new(controller: PresentationController<B>) -> Self {
        Self {
            controller,
            swipe: SwipeTracker::default(),
            resize: Debouncer::new(RESIZE_DEBOUNCE),
            ready: false,
        }
    }

    pub fn controller(&self) -> &PresentationController<B> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PresentationController<B> {
        &mut self.controller
    }

    pub fn ready(&mut self) {
        if !self.ready {
            debug!("input bound");
            self.ready = true;
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Handle one event. Returns the navigation it caused, if the slide
    /// actually changed.
    pub fn handle(&mut self, event: DeckEvent, now: Instant) -> Option<NavCommand> {
        if !self.ready && event.needs_binding() {
            trace!(?event, "input not bound yet");
            return None;
        }

        let command = match event {
            DeckEvent::Navigate(command) => Some(command),
            DeckEvent::ButtonClicked(button) => {
                if self.controller.stage().button_enabled(button) {
                    Some(button.command())
                } else {
                    trace!(button = button.element_id(), "button disabled or missing");
                    None
                }
            }
            DeckEvent::ZoneClicked(zone) => Some(zone.command()),
            DeckEvent::TouchStart(pos) => {
                self.swipe.begin(pos);
                None
            }
            DeckEvent::TouchEnd(pos) => self.swipe.finish(pos),
            DeckEvent::TouchCancel => {
                self.swipe.cancel();
                None
            }
            DeckEvent::Resized => {
                self.resize.trigger(now);
                None
            }
        }?;

        self.controller.navigate(command).then_some(command)
    }

    /// Run deferred work that has come due.
    pub fn tick(&mut self, now: Instant) {
        if self.resize.poll(now) {
            debug!("resizing charts");
            self.controller.resize();
        }
    }

    /// When the caller must next call [`DeckSession::tick`].
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    pub fn layout_settled(&mut self) {
        self.controller.layout_settled();
    }

    /// Drop pending work and destroy every chart. The viewer calls this on
    /// quit; dropping the session does the same for the charts.
    pub fn close(&mut self) {
        if self.resize.cancel() {
            debug!("pending resize dropped");
        }
        self.controller.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKey;
    use crate::charts::recording::{self, CallLog, RecordingBackend};
    use crate::deck::{NavButton, Stage};
    use crate::input::ClickZone;
    use eframe::egui::pos2;

    fn session() -> (DeckSession<RecordingBackend>, CallLog) {
        let (backend, log) = RecordingBackend::new();
        let controller = PresentationController::new(Stage::standard(), backend, 1);
        let mut session = DeckSession::new(controller);
        session.ready();
        (session, log)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_events_ignored_until_ready() {
        let (backend, _) = RecordingBackend::new();
        let controller = PresentationController::new(Stage::standard(), backend, 1);
        let mut session = DeckSession::new(controller);
        let now = Instant::now();

        assert_eq!(session.handle(DeckEvent::Navigate(NavCommand::Next), now), None);
        assert_eq!(
            session.handle(DeckEvent::ButtonClicked(NavButton::Next), now),
            None
        );
        assert_eq!(session.handle(DeckEvent::ZoneClicked(ClickZone::Right), now), None);
        assert_eq!(session.controller().current(), 1);

        session.ready();
        assert_eq!(
            session.handle(DeckEvent::Navigate(NavCommand::Next), now),
            Some(NavCommand::Next)
        );
        assert_eq!(session.controller().current(), 2);
    }

    #[test]
    fn test_touch_and_resize_handled_before_ready() {
        let (backend, log) = RecordingBackend::new();
        let controller = PresentationController::new(Stage::standard(), backend, 1);
        let mut session = DeckSession::new(controller);
        session.controller_mut().initialize_charts_for(3);
        let t0 = Instant::now();

        session.handle(DeckEvent::TouchStart(pos2(400.0, 300.0)), t0);
        assert_eq!(
            session.handle(DeckEvent::TouchEnd(pos2(200.0, 300.0)), t0),
            Some(NavCommand::Next)
        );
        assert_eq!(session.controller().current(), 2);

        session.handle(DeckEvent::Resized, t0);
        assert_eq!(session.next_deadline(), Some(t0 + RESIZE_DEBOUNCE));
        session.tick(t0 + RESIZE_DEBOUNCE);
        assert_eq!(recording::resized(&log), vec![ChartKey::MarketGrowth]);
        assert!(!session.is_ready());
    }

    #[test]
    fn test_buttons_and_zones() {
        let (mut s, _) = session();
        let now = Instant::now();

        s.handle(DeckEvent::ButtonClicked(NavButton::Last), now);
        assert_eq!(s.controller().current(), 14);
        // Next is disabled on the last slide.
        assert_eq!(s.handle(DeckEvent::ButtonClicked(NavButton::Next), now), None);

        s.handle(DeckEvent::ZoneClicked(ClickZone::Left), now);
        assert_eq!(s.controller().current(), 13);
        s.handle(DeckEvent::ZoneClicked(ClickZone::Right), now);
        assert_eq!(s.controller().current(), 14);
        s.handle(DeckEvent::ButtonClicked(NavButton::First), now);
        assert_eq!(s.controller().current(), 1);
    }

    #[test]
    fn test_boundary_navigation_reports_nothing() {
        let (mut s, _) = session();
        assert_eq!(
            s.handle(DeckEvent::Navigate(NavCommand::Prev), Instant::now()),
            None
        );
    }

    #[test]
    fn test_swipe_navigation() {
        let (mut s, _) = session();
        let now = Instant::now();

        s.handle(DeckEvent::TouchStart(pos2(400.0, 300.0)), now);
        s.handle(DeckEvent::TouchEnd(pos2(250.0, 320.0)), now);
        assert_eq!(s.controller().current(), 2);

        s.handle(DeckEvent::TouchStart(pos2(100.0, 300.0)), now);
        s.handle(DeckEvent::TouchEnd(pos2(130.0, 300.0)), now);
        assert_eq!(s.controller().current(), 2);

        s.handle(DeckEvent::TouchStart(pos2(100.0, 300.0)), now);
        s.handle(DeckEvent::TouchCancel, now);
        s.handle(DeckEvent::TouchEnd(pos2(400.0, 300.0)), now);
        assert_eq!(s.controller().current(), 2);

        s.handle(DeckEvent::TouchStart(pos2(100.0, 300.0)), now);
        s.handle(DeckEvent::TouchEnd(pos2(400.0, 300.0)), now);
        assert_eq!(s.controller().current(), 1);
    }

    #[test]
    fn test_held_key_serializes_transitions() {
        let (mut s, _) = session();
        let now = Instant::now();
        for _ in 0..20 {
            s.handle(DeckEvent::Navigate(NavCommand::Next), now);
        }
        assert_eq!(s.controller().current(), 14);
        assert_eq!(s.controller().stage().active_slides(), vec![14]);
    }

    #[test]
    fn test_resize_burst_fires_once() {
        let (mut s, log) = session();
        for index in [3, 5, 8] {
            s.controller_mut().initialize_charts_for(index);
        }

        let t0 = Instant::now();
        for step in 0..8 {
            let now = t0 + ms(step * 30);
            s.handle(DeckEvent::Resized, now);
            s.tick(now);
        }
        assert!(recording::resized(&log).is_empty());
        assert_eq!(s.next_deadline(), Some(t0 + ms(210) + RESIZE_DEBOUNCE));

        s.tick(t0 + ms(459));
        assert!(recording::resized(&log).is_empty());
        s.tick(t0 + ms(460));
        assert_eq!(
            recording::resized(&log),
            vec![
                ChartKey::MarketGrowth,
                ChartKey::RevenueDistribution,
                ChartKey::StartupCosts
            ]
        );

        s.tick(t0 + ms(2000));
        assert_eq!(recording::resized(&log).len(), 3);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_close_drops_pending_resize_and_charts() {
        let (mut s, log) = session();
        s.controller_mut().initialize_charts_for(5);
        let t0 = Instant::now();
        s.handle(DeckEvent::Resized, t0);
        s.close();
        assert_eq!(s.next_deadline(), None);
        s.tick(t0 + ms(1000));
        assert!(recording::resized(&log).is_empty());
        assert_eq!(recording::destroyed(&log), vec![ChartKey::RevenueDistribution]);
    }

    #[test]
    fn test_layout_settled_creates_chart() {
        let (mut s, log) = session();
        let now = Instant::now();
        s.handle(DeckEvent::Navigate(NavCommand::Last), now);
        s.handle(DeckEvent::Navigate(NavCommand::First), now);
        for _ in 0..2 {
            s.handle(DeckEvent::Navigate(NavCommand::Next), now);
        }
        s.layout_settled();
        assert_eq!(recording::created(&log), vec![ChartKey::MarketGrowth]);
    }
}
