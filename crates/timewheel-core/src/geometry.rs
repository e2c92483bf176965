//! Ring layout and tick marks.

use kurbo::{Point, Size, Vec2};

use crate::config::WheelConfig;
use crate::time::{SEGMENTS_PER_DAY, SEGMENTS_PER_HOUR, segment_to_angle};

/// Gap between the outer edge of the arc and the tick ring.
pub const TICK_GAP: f64 = 13.0;
/// Length of an hour tick.
pub const HOUR_TICK_LENGTH: f64 = 10.0;
/// Length of a five-minute tick.
pub const MINUTE_TICK_LENGTH: f64 = 5.0;

/// Unit vector pointing at `angle` degrees on the clock face
/// (0 = up, clockwise, y axis pointing down).
pub fn clock_direction(angle: f64) -> Vec2 {
    let radians = angle.to_radians();
    Vec2::new(radians.sin(), -radians.cos())
}

/// Sizes and positions of the ring in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Full canvas size, including the offset border.
    pub canvas: Size,
    /// Center of the ring.
    pub center: Point,
    /// Radius of the handle track.
    pub radius: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Radius at which tick marks start.
    pub tick_radius: f64,
    pub handle_radius: f64,
}

impl RingGeometry {
    pub fn from_config(config: &WheelConfig) -> Self {
        let margin = &config.margin;
        let radius = (config.width.min(config.height) - margin.top - margin.bottom) / 2.0;
        let outer_radius = radius + config.indicator_width / 2.0;
        let inner_radius = outer_radius - config.indicator_width;
        let origin = Point::new(
            config.offset / 2.0 + margin.left,
            config.offset / 2.0 + margin.top,
        );

        Self {
            canvas: Size::new(config.width + config.offset, config.height + config.offset),
            center: origin + Vec2::new(radius, radius),
            radius,
            outer_radius,
            inner_radius,
            tick_radius: outer_radius + TICK_GAP,
            handle_radius: config.handle_radius,
        }
    }

    /// Convert a canvas point to a vector from the ring center.
    pub fn to_ring(&self, point: Point) -> Vec2 {
        point - self.center
    }

    /// Point on a circle of `radius` around the center at `angle` degrees.
    pub fn point_at(&self, angle: f64, radius: f64) -> Point {
        self.center + clock_direction(angle) * radius
    }

    /// Center of a handle glyph sitting at `angle`.
    pub fn handle_center(&self, angle: f64) -> Point {
        self.point_at(angle, self.radius)
    }

    /// Check if `point` falls on a handle glyph at `angle`.
    pub fn hit_test_handle(&self, angle: f64, point: Point) -> bool {
        let delta = point - self.handle_center(angle);
        delta.hypot2() <= self.handle_radius * self.handle_radius
    }
}

/// One tick mark around the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Angle in degrees.
    pub angle: f64,
    /// Hour label for every twelfth tick.
    pub hour: Option<u32>,
}

impl Tick {
    pub fn length(&self) -> f64 {
        if self.hour.is_some() {
            HOUR_TICK_LENGTH
        } else {
            MINUTE_TICK_LENGTH
        }
    }

    /// Labels on the left half are flipped so they read upright.
    pub fn label_flipped(&self) -> bool {
        self.angle > 180.0
    }
}

/// All 288 ticks, one per five-minute segment.
pub fn ticks() -> Vec<Tick> {
    (0..SEGMENTS_PER_DAY)
        .map(|segment| Tick {
            angle: segment_to_angle(f64::from(segment)),
            hour: (segment % SEGMENTS_PER_HOUR == 0).then_some(segment / SEGMENTS_PER_HOUR),
        })
        .collect()
}
