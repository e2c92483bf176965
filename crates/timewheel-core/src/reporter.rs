//! Arc and time-range derivation, and the change notification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::{
    FULL_TURN, MINUTES_PER_SEGMENT, SEGMENTS_PER_DAY, angle_to_segment, duration_to_time_string,
    minutes_to_time_string, segment_to_minutes,
};

/// Human-readable summary of the selected range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeInfo {
    /// Start time, `HH:MM`.
    pub start: String,
    /// End time, `HH:MM`.
    pub end: String,
    /// Length of the range, `HH:MM`. Never negative across midnight.
    pub duration: String,
}

/// Angular extent of the accent arc, in degrees clockwise from the top.
///
/// `start_angle` may be negative when the range crosses midnight; the arc
/// always sweeps forward from start to end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcSpan {
    /// Swept angle in degrees.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Arc between two handle angles, unwrapped so it sweeps forward.
pub fn compute_arc(start_angle: f64, end_angle: f64) -> ArcSpan {
    let start_angle = if start_angle > end_angle {
        start_angle - FULL_TURN
    } else {
        start_angle
    };
    ArcSpan {
        start_angle,
        end_angle,
    }
}

/// Start, end and duration strings for two handle angles.
pub fn compute_time_info(start_angle: f64, end_angle: f64) -> TimeRangeInfo {
    let start_segment = angle_to_segment(start_angle);
    let end_segment = angle_to_segment(end_angle);

    let mut duration = end_segment - start_segment;
    if duration < 0.0 {
        duration += f64::from(SEGMENTS_PER_DAY);
    }
    let duration_minutes = (duration * f64::from(MINUTES_PER_SEGMENT)).round() as i64;

    TimeRangeInfo {
        start: minutes_to_time_string(segment_to_minutes(start_segment)),
        end: minutes_to_time_string(segment_to_minutes(end_segment)),
        duration: duration_to_time_string(duration_minutes),
    }
}

/// Receives the range each time it changes.
///
/// Listeners run synchronously inside pointer handling and must not call
/// back into the wheel that notified them.
pub trait RangeListener {
    fn range_changed(&mut self, info: &TimeRangeInfo);
}

impl<F> RangeListener for F
where
    F: FnMut(&TimeRangeInfo),
{
    fn range_changed(&mut self, info: &TimeRangeInfo) {
        self(info)
    }
}

/// Delivers range changes to an optional listener.
#[derive(Default)]
pub struct RangeReporter {
    listener: Option<Box<dyn RangeListener>>,
}

impl fmt::Debug for RangeReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeReporter")
            .field("has_listener", &self.has_listener())
            .finish()
    }
}

impl RangeReporter {
    /// A reporter with nobody listening.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that forwards to `listener`.
    pub fn with_listener(listener: impl RangeListener + 'static) -> Self {
        Self {
            listener: Some(Box::new(listener)),
        }
    }

    /// Replace the listener.
    pub fn set_listener(&mut self, listener: Option<Box<dyn RangeListener>>) {
        self.listener = listener;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Notify the listener. Without one this does nothing.
    pub fn report(&mut self, info: &TimeRangeInfo) {
        if let Some(listener) = self.listener.as_mut() {
            listener.range_changed(info);
        }
    }
}
