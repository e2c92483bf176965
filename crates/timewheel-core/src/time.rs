//! Conversions between clock angles, five-minute segments, decimal hours and
//! `HH:MM` strings.
//!
//! Angles are in degrees with 0 at the top of the clock face, growing
//! clockwise. A day is split into [`SEGMENTS_PER_DAY`] five-minute segments,
//! which is the unit used for snapping and duration math.

use thiserror::Error;

/// Number of five-minute segments in 24 hours.
pub const SEGMENTS_PER_DAY: u32 = 288;
/// Number of five-minute segments in one hour.
pub const SEGMENTS_PER_HOUR: u32 = 12;
/// Length of one segment in minutes.
pub const MINUTES_PER_SEGMENT: u32 = 5;
/// Minutes in a day.
pub const MINUTES_PER_DAY: i64 = 1440;
/// Degrees in a full turn of the wheel.
pub const FULL_TURN: f64 = 360.0;
/// Angular size of one segment (1.25°).
pub const SEGMENT_ANGLE: f64 = FULL_TURN / SEGMENTS_PER_DAY as f64;

/// Tolerance absorbed before flooring, so values a hair below a boundary
/// land on it.
const SNAP_EPSILON: f64 = 1e-9;

/// Error for a malformed `HH:MM` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected HH:MM, got {0:?}")]
    MissingSeparator(String),
    #[error("invalid number {component:?} in {input:?}")]
    InvalidNumber { input: String, component: String },
    #[error("hour out of range in {0:?}")]
    HourOutOfRange(String),
    #[error("minute out of range in {0:?}")]
    MinuteOutOfRange(String),
}

/// Linear scale between decimal hour values and clock angles.
///
/// `range_total` hours cover one full turn (24 by default).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleScale {
    range_total: f64,
}

impl Default for AngleScale {
    fn default() -> Self {
        Self { range_total: 24.0 }
    }
}

impl AngleScale {
    /// Create a scale where `range_total` hours make a full turn.
    pub fn new(range_total: f64) -> Self {
        Self { range_total }
    }

    /// Hours covered by one full turn.
    pub fn range_total(&self) -> f64 {
        self.range_total
    }

    /// Convert a decimal hour value to an angle in degrees.
    pub fn value_to_angle(&self, value: f64) -> f64 {
        value * FULL_TURN / self.range_total
    }

    /// Convert an angle in degrees to a decimal hour value.
    pub fn angle_to_value(&self, angle: f64) -> f64 {
        angle * self.range_total / FULL_TURN
    }
}

/// Fractional segment index for an angle. Not rounded.
pub fn angle_to_segment(angle: f64) -> f64 {
    angle * f64::from(SEGMENTS_PER_DAY) / FULL_TURN
}

/// Angle for a (possibly fractional) segment index.
pub fn segment_to_angle(segment: f64) -> f64 {
    segment * FULL_TURN / f64::from(SEGMENTS_PER_DAY)
}

/// Whole minutes since midnight for a segment index.
pub fn segment_to_minutes(segment: f64) -> i64 {
    (segment * f64::from(MINUTES_PER_SEGMENT)).round() as i64
}

/// Bring an angle into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= FULL_TURN { 0.0 } else { normalized }
}

/// Index of the segment boundary at or below `angle`.
///
/// Works on integer segment indices so the result is an exact boundary
/// regardless of accumulated float error in the input.
pub fn snap_segment(angle: f64) -> u32 {
    let segment = (angle_to_segment(normalize_angle(angle)) + SNAP_EPSILON).floor();
    (segment as u32) % SEGMENTS_PER_DAY
}

/// Snap an angle down to the nearest 1.25° boundary, in `[0, 360)`.
pub fn snap_angle(angle: f64) -> f64 {
    segment_to_angle(f64::from(snap_segment(angle)))
}

/// Format minutes since midnight as `HH:MM`.
///
/// The input is wrapped into a single day first, so `-60` gives `23:00`
/// and `1500` gives `01:00`.
pub fn minutes_to_time_string(minutes: i64) -> String {
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Format a signed decimal hour count as `[-]HH:MM`, minutes floored to a
/// multiple of five.
pub fn hours_decimal_to_time_string(hours: f64) -> String {
    let sign = if hours < 0.0 { "-" } else { "" };
    let total_minutes = (hours.abs() * 60.0 + SNAP_EPSILON).floor() as i64;
    format_span(sign, total_minutes)
}

/// Format a signed minute count as `[-]HH:MM`, minutes floored to a
/// multiple of five. Hours are not wrapped.
pub fn duration_to_time_string(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    format_span(sign, minutes.abs())
}

fn format_span(sign: &str, total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let minutes = minutes - minutes % i64::from(MINUTES_PER_SEGMENT);
    format!("{sign}{hours:02}:{minutes:02}")
}

/// Parse `HH:MM` into `(hour, minute)`.
pub fn parse_time(input: &str) -> Result<(u32, u32), ParseError> {
    let (hour, minute) = input
        .trim()
        .split_once(':')
        .ok_or_else(|| ParseError::MissingSeparator(input.to_string()))?;

    let parse = |component: &str| {
        component
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidNumber {
                input: input.to_string(),
                component: component.to_string(),
            })
    };
    let hour = parse(hour)?;
    let minute = parse(minute)?;

    if hour > 23 {
        return Err(ParseError::HourOutOfRange(input.to_string()));
    }
    if minute > 59 {
        return Err(ParseError::MinuteOutOfRange(input.to_string()));
    }
    Ok((hour, minute))
}

/// Segment index for an `HH:MM` string: `H * 12 + M / 5`.
///
/// Minutes that are not a multiple of five give a fractional index.
pub fn time_string_to_segment(input: &str) -> Result<f64, ParseError> {
    let (hour, minute) = parse_time(input)?;
    Ok(f64::from(hour * SEGMENTS_PER_HOUR) + f64::from(minute) / f64::from(MINUTES_PER_SEGMENT))
}
