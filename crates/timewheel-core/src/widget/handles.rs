//! The two draggable range handles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{WheelError, WheelResult};
use crate::time::{AngleScale, normalize_angle, segment_to_angle, time_string_to_segment};

/// Which end of the range a handle marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleLabel {
    Start,
    End,
}

impl HandleLabel {
    /// Both labels in paint/iteration order.
    pub const ALL: [HandleLabel; 2] = [HandleLabel::Start, HandleLabel::End];

    pub fn as_str(self) -> &'static str {
        match self {
            HandleLabel::Start => "start",
            HandleLabel::End => "end",
        }
    }
}

impl fmt::Display for HandleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandleLabel {
    type Err = WheelError;

    /// Accepts `start`/`end` and the short forms `a`/`e`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" | "a" => Ok(HandleLabel::Start),
            "end" | "e" => Ok(HandleLabel::End),
            other => Err(WheelError::NotFound(other.to_string())),
        }
    }
}

/// A range endpoint on the wheel.
///
/// `angle` and `value` always describe the same position: after a drag the
/// snapped angle is authoritative and `value` is derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub label: HandleLabel,
    /// Decimal hours in `[0, range_total)`.
    pub value: f64,
    /// Degrees in `[0, 360)`.
    pub angle: f64,
}

impl Handle {
    /// Create a handle at `angle`, normalizing it and deriving its value.
    pub fn from_angle(label: HandleLabel, angle: f64, scale: &AngleScale) -> Self {
        let angle = normalize_angle(angle);
        Self {
            label,
            value: scale.angle_to_value(angle),
            angle,
        }
    }

    /// Create a handle at an `HH:MM` time.
    pub fn from_time(label: HandleLabel, time: &str, scale: &AngleScale) -> WheelResult<Self> {
        let segment = time_string_to_segment(time)?;
        Ok(Self::from_angle(label, segment_to_angle(segment), scale))
    }
}

/// The start and end handles of one wheel.
#[derive(Debug, Clone)]
pub struct HandleSet {
    handles: Vec<Handle>,
    scale: AngleScale,
}

impl HandleSet {
    /// Build both handles from `HH:MM` boundaries.
    ///
    /// Both strings are parsed before anything is stored, so a bad end time
    /// never leaves a half-built set behind.
    pub fn init_from_range(start: &str, end: &str, scale: AngleScale) -> WheelResult<Self> {
        let start = Handle::from_time(HandleLabel::Start, start, &scale)?;
        let end = Handle::from_time(HandleLabel::End, end, &scale)?;
        Ok(Self {
            handles: vec![start, end],
            scale,
        })
    }

    /// Look up a handle by label.
    pub fn get(&self, label: HandleLabel) -> WheelResult<&Handle> {
        self.handles
            .iter()
            .find(|h| h.label == label)
            .ok_or_else(|| WheelError::NotFound(label.to_string()))
    }

    /// Look up a handle by its textual label (`start`, `end`, `a`, `e`).
    pub fn find(&self, name: &str) -> WheelResult<&Handle> {
        self.get(name.parse()?)
    }

    /// Move one handle to `angle`. The other handle is untouched.
    pub fn set_angle(&mut self, label: HandleLabel, angle: f64) -> WheelResult<()> {
        let scale = self.scale;
        let handle = self
            .handles
            .iter_mut()
            .find(|h| h.label == label)
            .ok_or_else(|| WheelError::NotFound(label.to_string()))?;
        *handle = Handle::from_angle(label, angle, &scale);
        Ok(())
    }

    /// Both handles, start first.
    pub fn all(&self) -> &[Handle] {
        &self.handles
    }

    /// Angles of the start and end handles.
    pub fn angles(&self) -> WheelResult<(f64, f64)> {
        Ok((
            self.get(HandleLabel::Start)?.angle,
            self.get(HandleLabel::End)?.angle,
        ))
    }
}
