//! A single time-range wheel: configuration, handles, gesture and reporting.

use kurbo::Point;

use crate::config::WheelConfig;
use crate::drag::{DragInteraction, DragStep, PointerEvent};
use crate::error::WheelResult;
use crate::geometry::{self, RingGeometry, Tick};
use crate::reporter::{
    ArcSpan, RangeListener, RangeReporter, TimeRangeInfo, compute_arc, compute_time_info,
};
use crate::widget::{Handle, HandleLabel, HandleSet, HandleState};

/// What a pointer event did to the wheel.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// The event was not part of a drag, or hit nothing.
    Ignored,
    /// A handle is captured but did not leave its segment.
    Unchanged,
    /// A handle moved; the host should redraw.
    Committed(TimeRangeInfo),
}

impl DragOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// One interactive wheel.
///
/// Owns its configuration and handles outright; two wheels never share
/// state.
#[derive(Debug)]
pub struct TimeRangeWheel {
    config: WheelConfig,
    geometry: RingGeometry,
    handles: HandleSet,
    drag: DragInteraction,
    reporter: RangeReporter,
    time_info: TimeRangeInfo,
}

impl TimeRangeWheel {
    /// Build a wheel without a change listener.
    pub fn new(config: WheelConfig) -> WheelResult<Self> {
        Self::build(config, RangeReporter::new())
    }

    /// Build a wheel that reports every range change to `listener`.
    ///
    /// The listener is called once with the initial range before this
    /// returns.
    pub fn with_listener(
        config: WheelConfig,
        listener: impl RangeListener + 'static,
    ) -> WheelResult<Self> {
        Self::build(config, RangeReporter::with_listener(listener))
    }

    fn build(config: WheelConfig, mut reporter: RangeReporter) -> WheelResult<Self> {
        config.validate()?;
        let handles =
            HandleSet::init_from_range(&config.data.start, &config.data.end, config.scale())?;
        let (start, end) = handles.angles()?;
        let time_info = compute_time_info(start, end);
        log::debug!(
            "wheel initialized: {} - {} ({})",
            time_info.start,
            time_info.end,
            time_info.duration
        );
        reporter.report(&time_info);

        Ok(Self {
            geometry: config.geometry(),
            config,
            handles,
            drag: DragInteraction::new(),
            reporter,
            time_info,
        })
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    pub fn handles(&self) -> &[Handle] {
        self.handles.all()
    }

    pub fn handle(&self, label: HandleLabel) -> WheelResult<&Handle> {
        self.handles.get(label)
    }

    /// The current range as text.
    pub fn time_info(&self) -> &TimeRangeInfo {
        &self.time_info
    }

    /// The accent arc for the current handles.
    pub fn arc(&self) -> WheelResult<ArcSpan> {
        let (start, end) = self.handles.angles()?;
        Ok(compute_arc(start, end))
    }

    /// Tick marks around the ring.
    pub fn ticks(&self) -> Vec<Tick> {
        geometry::ticks()
    }

    pub fn active_handle(&self) -> Option<HandleLabel> {
        self.drag.active()
    }

    pub fn hovered_handle(&self) -> Option<HandleLabel> {
        self.drag.hovered()
    }

    /// How `label` should be drawn right now.
    pub fn handle_state(&self, label: HandleLabel) -> HandleState {
        self.drag.handle_state(label)
    }

    /// Replace the listener.
    pub fn set_listener(&mut self, listener: Option<Box<dyn RangeListener>>) {
        self.reporter.set_listener(listener);
    }

    /// Handle glyph under a canvas point. The end handle is drawn last, so
    /// it wins when both overlap.
    pub fn hit_test(&self, point: Point) -> Option<HandleLabel> {
        self.handles
            .all()
            .iter()
            .rev()
            .find(|h| self.geometry.hit_test_handle(h.angle, point))
            .map(|h| h.label)
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> WheelResult<DragOutcome> {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_down(position);
                Ok(DragOutcome::Ignored)
            }
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up => {
                self.pointer_up();
                Ok(DragOutcome::Ignored)
            }
            PointerEvent::Leave => {
                self.pointer_leave();
                Ok(DragOutcome::Ignored)
            }
        }
    }

    /// Update hover highlighting for a pointer that is not dragging.
    pub fn pointer_hover(&mut self, point: Point) -> Option<HandleLabel> {
        let hovered = self.hit_test(point);
        self.drag.set_hovered(hovered);
        hovered
    }

    /// Pointer left the widget. A captured handle stays captured.
    pub fn pointer_leave(&mut self) {
        if self.drag.active().is_none() {
            self.drag.set_hovered(None);
        }
    }

    /// Press at a canvas point. Captures the handle under it, if any.
    pub fn pointer_down(&mut self, point: Point) -> Option<HandleLabel> {
        let label = self.hit_test(point)?;
        self.begin_drag(label).then_some(label)
    }

    /// Capture a handle directly, for hosts that do their own hit testing.
    pub fn begin_drag(&mut self, label: HandleLabel) -> bool {
        self.drag.begin(label)
    }

    /// Move the pointer. Drags the captured handle, or updates hover.
    pub fn pointer_move(&mut self, point: Point) -> WheelResult<DragOutcome> {
        if self.drag.active().is_none() {
            self.pointer_hover(point);
            return Ok(DragOutcome::Ignored);
        }

        let offset = self.geometry.to_ring(point);
        match self.drag.drag_to(&mut self.handles, offset)? {
            DragStep::Idle => Ok(DragOutcome::Ignored),
            DragStep::Unchanged => Ok(DragOutcome::Unchanged),
            DragStep::Moved { .. } => Ok(DragOutcome::Committed(self.refresh()?)),
        }
    }

    /// Release the pointer.
    pub fn pointer_up(&mut self) -> Option<HandleLabel> {
        let released = self.drag.end();
        self.drag.set_hovered(None);
        released
    }

    /// Reset both handles to a new `HH:MM` range and report it.
    ///
    /// Cancels any gesture in progress. On error the wheel is unchanged.
    pub fn set_range(&mut self, start: &str, end: &str) -> WheelResult<TimeRangeInfo> {
        let handles = HandleSet::init_from_range(start, end, self.config.scale())?;
        self.handles = handles;
        self.config.data.start = start.to_string();
        self.config.data.end = end.to_string();
        self.drag.end();
        self.refresh()
    }

    fn refresh(&mut self) -> WheelResult<TimeRangeInfo> {
        let (start, end) = self.handles.angles()?;
        self.time_info = compute_time_info(start, end);
        self.reporter.report(&self.time_info);
        Ok(self.time_info.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WheelError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(config: WheelConfig) -> (TimeRangeWheel, Rc<RefCell<Vec<TimeRangeInfo>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let wheel = TimeRangeWheel::with_listener(config, move |info: &TimeRangeInfo| {
            sink.borrow_mut().push(info.clone());
        })
        .unwrap();
        (wheel, seen)
    }

    /// Canvas point on the handle track at `angle`.
    fn on_track(wheel: &TimeRangeWheel, angle: f64) -> Point {
        wheel.geometry().handle_center(angle)
    }

    #[test]
    fn test_initial_report() {
        let (wheel, seen) = recording(WheelConfig::default().with_range("08:00", "17:00"));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].duration, "09:00");
        assert_eq!(wheel.time_info().start, "08:00");
    }

    #[test]
    fn test_bad_initial_range_fails() {
        let result = TimeRangeWheel::new(WheelConfig::default().with_range("8am", "17:00"));
        assert!(matches!(result, Err(WheelError::Parse(_))));
    }

    #[test]
    fn test_bad_config_fails() {
        let config = WheelConfig {
            range_total: -1.0,
            ..Default::default()
        };
        assert!(matches!(TimeRangeWheel::new(config), Err(WheelError::Config(_))));
    }

    #[test]
    fn test_full_gesture() {
        let (mut wheel, seen) = recording(WheelConfig::default().with_range("08:00", "17:00"));
        let start_point = on_track(&wheel, 120.0);
        assert_eq!(wheel.pointer_down(start_point), Some(HandleLabel::Start));
        assert_eq!(wheel.active_handle(), Some(HandleLabel::Start));

        // 06:00 is at 90°
        let outcome = wheel.pointer_move(on_track(&wheel, 90.3)).unwrap();
        match outcome {
            DragOutcome::Committed(info) => {
                assert_eq!(info.start, "06:00");
                assert_eq!(info.duration, "11:00");
            }
            other => panic!("expected commit, got {other:?}"),
        }

        // jitter inside the same segment
        let outcome = wheel.pointer_move(on_track(&wheel, 90.8)).unwrap();
        assert_eq!(outcome, DragOutcome::Unchanged);

        assert_eq!(wheel.pointer_up(), Some(HandleLabel::Start));
        assert_eq!(wheel.active_handle(), None);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_drag_across_midnight() {
        let (mut wheel, _) = recording(WheelConfig::default().with_range("20:00", "23:00"));
        let end_point = on_track(&wheel, 345.0);
        assert_eq!(wheel.pointer_down(end_point), Some(HandleLabel::End));
        // 02:00 is at 30°
        let outcome = wheel.pointer_move(on_track(&wheel, 30.5)).unwrap();
        let DragOutcome::Committed(info) = outcome else {
            panic!("expected commit");
        };
        assert_eq!(info.end, "02:00");
        assert_eq!(info.duration, "06:00");

        let arc = wheel.arc().unwrap();
        assert!((arc.start_angle + 60.0).abs() < 1e-9);
        assert!((arc.end_angle - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_move_without_capture_is_hover() {
        let (mut wheel, seen) = recording(WheelConfig::default().with_range("08:00", "17:00"));
        let over_end = on_track(&wheel, 255.0);
        assert_eq!(wheel.pointer_move(over_end).unwrap(), DragOutcome::Ignored);
        assert_eq!(wheel.hovered_handle(), Some(HandleLabel::End));
        assert_eq!(wheel.handle_state(HandleLabel::End), HandleState::Hovered);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_down_on_empty_space() {
        let mut wheel = TimeRangeWheel::new(WheelConfig::default()).unwrap();
        let center = wheel.geometry().center;
        assert_eq!(wheel.pointer_down(center), None);
        assert_eq!(wheel.pointer_move(center).unwrap(), DragOutcome::Ignored);
    }

    #[test]
    fn test_second_handle_not_captured_mid_drag() {
        let mut wheel =
            TimeRangeWheel::new(WheelConfig::default().with_range("08:00", "17:00")).unwrap();
        wheel.pointer_down(on_track(&wheel, 120.0));
        assert!(!wheel.begin_drag(HandleLabel::End));
        let before_end = *wheel.handle(HandleLabel::End).unwrap();
        wheel.pointer_move(on_track(&wheel, 200.0)).unwrap();
        assert_eq!(*wheel.handle(HandleLabel::End).unwrap(), before_end);
        assert!((wheel.handle(HandleLabel::Start).unwrap().angle - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_handles_pick_end() {
        let wheel =
            TimeRangeWheel::new(WheelConfig::default().with_range("10:00", "10:00")).unwrap();
        assert_eq!(wheel.hit_test(on_track(&wheel, 150.0)), Some(HandleLabel::End));
    }

    #[test]
    fn test_pointer_events() {
        let (mut wheel, seen) = recording(WheelConfig::default().with_range("08:00", "17:00"));
        let down = on_track(&wheel, 255.0);
        let target = on_track(&wheel, 270.0);
        wheel
            .handle_pointer_event(PointerEvent::Down { position: down })
            .unwrap();
        let outcome = wheel
            .handle_pointer_event(PointerEvent::Move { position: target })
            .unwrap();
        assert!(outcome.is_committed());
        wheel.handle_pointer_event(PointerEvent::Up).unwrap();
        assert_eq!(wheel.time_info().end, "18:00");
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_set_range() {
        let (mut wheel, seen) = recording(WheelConfig::default());
        let info = wheel.set_range("22:00", "02:00").unwrap();
        assert_eq!(info.duration, "04:00");
        assert_eq!(seen.borrow().len(), 2);
        assert!(wheel.set_range("22:00", "xx").is_err());
        assert_eq!(wheel.time_info().start, "22:00");
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_swap_listener_mid_gesture() {
        let (mut wheel, first) = recording(WheelConfig::default().with_range("08:00", "17:00"));
        assert_eq!(wheel.pointer_down(on_track(&wheel, 120.0)), Some(HandleLabel::Start));
        assert!(wheel.pointer_move(on_track(&wheel, 90.3)).unwrap().is_committed());
        assert_eq!(first.borrow().len(), 2);

        let second = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&second);
        wheel.set_listener(Some(Box::new(move |info: &TimeRangeInfo| {
            sink.borrow_mut().push(info.clone());
        })));
        // 05:00 is at 75°
        assert!(wheel.pointer_move(on_track(&wheel, 75.4)).unwrap().is_committed());
        wheel.pointer_up();

        assert_eq!(first.borrow().len(), 2);
        assert_eq!(second.borrow().len(), 1);
        assert_eq!(second.borrow()[0].start, "05:00");

        wheel.set_listener(None);
        wheel.set_range("01:00", "02:00").unwrap();
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a =
            TimeRangeWheel::new(WheelConfig::default().with_range("08:00", "17:00")).unwrap();
        let b = TimeRangeWheel::new(WheelConfig::default().with_range("01:00", "02:00")).unwrap();
        a.set_range("03:00", "04:00").unwrap();
        assert_eq!(b.time_info().start, "01:00");
        assert_eq!(b.config().data.start, "01:00");
    }
}
