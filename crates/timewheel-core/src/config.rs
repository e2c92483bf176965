//! Per-wheel configuration.
//!
//! Every field has a default, so a partial JSON object is merged over the
//! defaults the same way the option object of a widget would be.

use std::fmt;

use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::error::{WheelError, WheelResult};
use crate::geometry::RingGeometry;
use crate::time::AngleScale;

/// A `#rrggbb` or `#rrggbbaa` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` string.
    pub fn parse(s: &str) -> WheelResult<Self> {
        let invalid = || WheelError::Config(format!("invalid color {s:?}"));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 255 },
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for HexColor {
    type Error = WheelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Space between the canvas edge and the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            left: 20.0,
            bottom: 20.0,
            right: 20.0,
        }
    }
}

/// Initial range as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeData {
    pub start: String,
    pub end: String,
}

impl Default for RangeData {
    fn default() -> Self {
        Self {
            start: "00:00".to_string(),
            end: "00:00".to_string(),
        }
    }
}

/// Dimensions, colors and initial range of one wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WheelConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Extra canvas space around `width` x `height`, split evenly on both sides.
    pub offset: f64,
    /// Thickness of the accent arc.
    pub indicator_width: f64,
    pub accent_color: HexColor,
    pub handle_radius: f64,
    pub handle_stroke_width: f64,
    pub handle_stroke_color: HexColor,
    pub handle_icon_color: HexColor,
    pub handle_fill_color_start: HexColor,
    pub handle_fill_color_end: HexColor,
    /// Hours represented by a full turn.
    pub range_total: f64,
    pub tick_color: HexColor,
    pub indicator_background_color: HexColor,
    pub data: RangeData,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            width: 240.0,
            height: 240.0,
            margin: Margin::default(),
            offset: 80.0,
            indicator_width: 12.0,
            accent_color: HexColor::rgb(0xd8, 0x1b, 0x60),
            handle_radius: 14.0,
            handle_stroke_width: 2.0,
            handle_stroke_color: HexColor::rgb(0xff, 0xff, 0xff),
            handle_icon_color: HexColor::rgb(0x33, 0x33, 0x33),
            handle_fill_color_start: HexColor::rgb(0xff, 0xff, 0xff),
            handle_fill_color_end: HexColor::rgb(0xd8, 0x1b, 0x60),
            range_total: 24.0,
            tick_color: HexColor::rgb(0xf9, 0xf9, 0xf9),
            indicator_background_color: HexColor::rgb(0xd3, 0xd3, 0xd3),
            data: RangeData::default(),
        }
    }
}

impl WheelConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json(json: &str) -> WheelResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WheelError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the initial range.
    pub fn with_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.data = RangeData {
            start: start.into(),
            end: end.into(),
        };
        self
    }

    /// Check that the configuration describes a drawable wheel.
    pub fn validate(&self) -> WheelResult<()> {
        if !(self.range_total.is_finite() && self.range_total > 0.0) {
            return Err(WheelError::Config(format!(
                "rangeTotal must be positive, got {}",
                self.range_total
            )));
        }
        if self.indicator_width < 0.0 || self.handle_radius < 0.0 {
            return Err(WheelError::Config(
                "indicatorWidth and handleRadius must not be negative".to_string(),
            ));
        }
        let radius = self.geometry().radius;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(WheelError::Config(format!(
                "ring radius must be positive, got {radius}"
            )));
        }
        Ok(())
    }

    pub fn scale(&self) -> AngleScale {
        AngleScale::new(self.range_total)
    }

    /// Ring layout derived from the dimensions.
    pub fn geometry(&self) -> RingGeometry {
        RingGeometry::from_config(self)
    }
}
