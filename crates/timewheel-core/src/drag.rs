//! Drag interaction: turns pointer positions into snapped handle angles.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::WheelResult;
use crate::time::{normalize_angle, snap_angle};
use crate::widget::{DragState, HandleLabel, HandleSet, HandleState};

/// Snapped angles closer than this are treated as the same position.
const SAME_ANGLE_TOLERANCE: f64 = 1e-9;

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// Pointer left the widget.
    Leave,
}

/// Result of feeding one move to the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragStep {
    /// No handle is captured.
    Idle,
    /// The pointer stayed inside the handle's current segment.
    Unchanged,
    /// The captured handle moved to a new snapped angle.
    Moved { label: HandleLabel, angle: f64 },
}

/// Raw clock angle of a ring-relative pointer offset, in `[0, 360)`.
///
/// `atan2` measures from the positive x axis; adding 90° moves zero to
/// twelve o'clock.
pub fn pointer_angle(offset: Vec2) -> f64 {
    let angle = offset.y.atan2(offset.x).to_degrees() + 90.0;
    normalize_angle(if angle < 0.0 { angle + 360.0 } else { angle })
}

/// Drag state machine for the two handles.
///
/// Idle until a handle is captured, then every move snaps the captured
/// handle to the pointer until release. Only one handle can be captured per
/// gesture.
#[derive(Debug, Clone, Default)]
pub struct DragInteraction {
    state: DragState,
    hovered: Option<HandleLabel>,
}

impl DragInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The captured handle, if any.
    pub fn active(&self) -> Option<HandleLabel> {
        self.state.active()
    }

    pub fn hovered(&self) -> Option<HandleLabel> {
        self.hovered
    }

    /// Set the handle under the pointer. Purely visual.
    pub fn set_hovered(&mut self, label: Option<HandleLabel>) {
        self.hovered = label;
    }

    /// How `label` should be drawn right now.
    pub fn handle_state(&self, label: HandleLabel) -> HandleState {
        if self.active() == Some(label) {
            HandleState::Dragging
        } else if self.hovered == Some(label) {
            HandleState::Hovered
        } else {
            HandleState::Normal
        }
    }

    /// Capture `label` for dragging.
    ///
    /// Returns `false` and leaves the state alone if another handle is
    /// already captured.
    pub fn begin(&mut self, label: HandleLabel) -> bool {
        match self.state {
            DragState::Dragging(current) if current != label => {
                log::warn!("ignoring drag of {label} while {current} is captured");
                false
            }
            DragState::Dragging(_) => true,
            DragState::Idle => {
                log::debug!("drag started on {label}");
                self.state = DragState::Dragging(label);
                true
            }
        }
    }

    /// Move the captured handle toward a ring-relative pointer offset.
    ///
    /// The angle is snapped down to a five-minute boundary and only
    /// committed to `handles` when it differs from the handle's current
    /// angle.
    pub fn drag_to(&mut self, handles: &mut HandleSet, offset: Vec2) -> WheelResult<DragStep> {
        let Some(label) = self.active() else {
            return Ok(DragStep::Idle);
        };

        let angle = snap_angle(pointer_angle(offset));
        let current = handles.get(label)?.angle;
        if (angle - current).abs() < SAME_ANGLE_TOLERANCE {
            log::trace!("{label} stays at {angle}°");
            return Ok(DragStep::Unchanged);
        }

        handles.set_angle(label, angle)?;
        log::debug!("{label} moved to {angle}°");
        Ok(DragStep::Moved { label, angle })
    }

    /// Release the captured handle. Returns the handle that was released.
    pub fn end(&mut self) -> Option<HandleLabel> {
        let released = self.active();
        if let Some(label) = released {
            log::debug!("drag ended on {label}");
        }
        self.state = DragState::Idle;
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::AngleScale;

    fn handles() -> HandleSet {
        HandleSet::init_from_range("08:00", "17:00", AngleScale::default()).unwrap()
    }

    /// Ring-relative offset pointing at `angle` degrees.
    fn toward(angle: f64) -> Vec2 {
        crate::geometry::clock_direction(angle) * 100.0
    }

    #[test]
    fn test_pointer_angle_quadrants() {
        assert!(pointer_angle(Vec2::new(0.0, -10.0)).abs() < 1e-9);
        assert!((pointer_angle(Vec2::new(10.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((pointer_angle(Vec2::new(0.0, 10.0)) - 180.0).abs() < 1e-9);
        assert!((pointer_angle(Vec2::new(-10.0, 0.0)) - 270.0).abs() < 1e-9);
        assert!((pointer_angle(Vec2::new(-10.0, -10.0)) - 315.0).abs() < 1e-9);
    }

    #[test]
    fn test_idle_move_does_nothing() {
        let mut drag = DragInteraction::new();
        let mut set = handles();
        assert_eq!(drag.drag_to(&mut set, toward(10.0)).unwrap(), DragStep::Idle);
    }

    #[test]
    fn test_drag_snaps_down() {
        let mut drag = DragInteraction::new();
        let mut set = handles();
        assert!(drag.begin(HandleLabel::Start));
        let step = drag.drag_to(&mut set, toward(92.0)).unwrap();
        assert_eq!(
            step,
            DragStep::Moved {
                label: HandleLabel::Start,
                angle: 91.25
            }
        );
        let start = set.get(HandleLabel::Start).unwrap();
        assert!((start.value - 6.083_333_333_333_333).abs() < 1e-9);
    }

    #[test]
    fn test_same_segment_is_debounced() {
        let mut drag = DragInteraction::new();
        let mut set = handles();
        drag.begin(HandleLabel::End);
        assert!(matches!(
            drag.drag_to(&mut set, toward(200.3)).unwrap(),
            DragStep::Moved { .. }
        ));
        assert_eq!(
            drag.drag_to(&mut set, toward(200.9)).unwrap(),
            DragStep::Unchanged
        );
        assert!(matches!(
            drag.drag_to(&mut set, toward(201.3)).unwrap(),
            DragStep::Moved { .. }
        ));
    }

    #[test]
    fn test_drag_to_current_position_is_unchanged() {
        let mut drag = DragInteraction::new();
        let mut set = handles();
        drag.begin(HandleLabel::Start);
        // 08:00 sits at 120°
        assert_eq!(
            drag.drag_to(&mut set, toward(120.4)).unwrap(),
            DragStep::Unchanged
        );
    }

    #[test]
    fn test_drag_leaves_other_handle() {
        let mut drag = DragInteraction::new();
        let mut set = handles();
        let end_before = *set.get(HandleLabel::End).unwrap();
        drag.begin(HandleLabel::Start);
        drag.drag_to(&mut set, toward(10.0)).unwrap();
        assert_eq!(*set.get(HandleLabel::End).unwrap(), end_before);
    }

    #[test]
    fn test_second_capture_ignored() {
        let mut drag = DragInteraction::new();
        assert!(drag.begin(HandleLabel::Start));
        assert!(!drag.begin(HandleLabel::End));
        assert_eq!(drag.active(), Some(HandleLabel::Start));
        assert!(drag.begin(HandleLabel::Start));
        assert_eq!(drag.end(), Some(HandleLabel::Start));
        assert!(drag.begin(HandleLabel::End));
    }

    #[test]
    fn test_end_returns_to_idle() {
        let mut drag = DragInteraction::new();
        assert_eq!(drag.end(), None);
        drag.begin(HandleLabel::End);
        drag.end();
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_handle_state() {
        let mut drag = DragInteraction::new();
        drag.set_hovered(Some(HandleLabel::End));
        assert_eq!(drag.handle_state(HandleLabel::End), HandleState::Hovered);
        assert_eq!(drag.handle_state(HandleLabel::Start), HandleState::Normal);
        drag.begin(HandleLabel::End);
        assert_eq!(drag.handle_state(HandleLabel::End), HandleState::Dragging);
    }
}
