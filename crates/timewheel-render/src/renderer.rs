//! Renderer trait abstraction.

use kurbo::{Arc, BezPath, Line, Point, Shape, Vec2};
use peniko::Color;
use thiserror::Error;
use timewheel_core::geometry::{RingGeometry, Tick};
use timewheel_core::{ArcSpan, HandleLabel, HandleState, TimeRangeWheel, WheelConfig, WheelError};

/// Flattening tolerance for arc curves.
const ARC_TOLERANCE: f64 = 0.1;
/// Distance from the tick ring to an upright hour label.
const LABEL_OFFSET: f64 = 12.0;
/// Distance from the tick ring to a flipped hour label.
const FLIPPED_LABEL_OFFSET: f64 = 11.0;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Wheel state error: {0}")]
    Model(#[from] WheelError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// A handle ready to draw.
#[derive(Debug, Clone, Copy)]
pub struct HandleGlyph {
    pub label: HandleLabel,
    pub center: Point,
    pub radius: f64,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
    /// Chevron pointing away from the range.
    pub icon: char,
    pub icon_color: Color,
    pub state: HandleState,
}

/// An hour label next to a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub text: String,
    pub anchor: Point,
    /// Text rotation in degrees (SVG convention, clockwise from +x).
    pub rotation: f64,
    /// Text runs toward the center instead of away from it.
    pub flipped: bool,
}

/// Everything needed to draw one frame of a wheel.
pub struct RenderContext<'a> {
    /// The wheel to render.
    pub wheel: &'a TimeRangeWheel,
    /// Accent arc for the current handles.
    pub arc: ArcSpan,
    /// Canvas background; `None` leaves it transparent.
    pub background_color: Option<Color>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(wheel: &'a TimeRangeWheel) -> RenderResult<Self> {
        Ok(Self {
            wheel,
            arc: wheel.arc()?,
            background_color: None,
        })
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background_color = color;
        self
    }

    pub fn config(&self) -> &WheelConfig {
        self.wheel.config()
    }

    pub fn geometry(&self) -> &RingGeometry {
        self.wheel.geometry()
    }

    /// Filled annular sector between the inner and outer radius.
    ///
    /// Empty when start and end coincide.
    pub fn arc_path(&self) -> BezPath {
        let geometry = self.geometry();
        let mut path = BezPath::new();
        let sweep = self.arc.sweep().to_radians();
        if sweep <= 0.0 {
            return path;
        }

        // kurbo measures angles from +x; the clock measures from 12 o'clock
        let start = (self.arc.start_angle - 90.0).to_radians();
        let outer = Arc {
            center: geometry.center,
            radii: Vec2::new(geometry.outer_radius, geometry.outer_radius),
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        let inner = Arc {
            radii: Vec2::new(geometry.inner_radius, geometry.inner_radius),
            start_angle: start + sweep,
            sweep_angle: -sweep,
            ..outer
        };

        path.extend(outer.path_elements(ARC_TOLERANCE));
        path.line_to(geometry.point_at(self.arc.end_angle, geometry.inner_radius));
        path.extend(inner.append_iter(ARC_TOLERANCE));
        path.close_path();
        path
    }

    /// Points along the middle of the accent arc, one per segment boundary.
    pub fn arc_polyline(&self) -> Vec<Point> {
        let geometry = self.geometry();
        let radius = (geometry.inner_radius + geometry.outer_radius) / 2.0;
        let sweep = self.arc.sweep();
        let steps = (sweep / timewheel_core::time::SEGMENT_ANGLE).ceil().max(1.0) as usize;
        (0..=steps)
            .map(|i| {
                let angle = self.arc.start_angle + sweep * i as f64 / steps as f64;
                geometry.point_at(angle, radius)
            })
            .collect()
    }

    /// Both handles, start first.
    pub fn handle_glyphs(&self) -> Vec<HandleGlyph> {
        let config = self.config();
        self.wheel
            .handles()
            .iter()
            .map(|handle| {
                let (fill, icon) = match handle.label {
                    HandleLabel::Start => (config.handle_fill_color_start, '›'),
                    HandleLabel::End => (config.handle_fill_color_end, '‹'),
                };
                HandleGlyph {
                    label: handle.label,
                    center: self.geometry().handle_center(handle.angle),
                    radius: config.handle_radius,
                    fill: fill.into(),
                    stroke: config.handle_stroke_color.into(),
                    stroke_width: config.handle_stroke_width,
                    icon,
                    icon_color: config.handle_icon_color.into(),
                    state: self.wheel.handle_state(handle.label),
                }
            })
            .collect()
    }

    /// Radial line for a tick, starting just outside the tick ring.
    pub fn tick_line(&self, tick: &Tick) -> Line {
        let geometry = self.geometry();
        Line::new(
            geometry.point_at(tick.angle, geometry.tick_radius + 1.0),
            geometry.point_at(tick.angle, geometry.tick_radius + tick.length()),
        )
    }

    /// Hour label for a tick, if it carries one.
    pub fn tick_label(&self, tick: &Tick) -> Option<TickLabel> {
        let hour = tick.hour?;
        let geometry = self.geometry();
        let flipped = tick.label_flipped();
        let offset = if flipped { FLIPPED_LABEL_OFFSET } else { LABEL_OFFSET };
        let rotation = tick.angle - 90.0 + if flipped { 180.0 } else { 0.0 };
        Some(TickLabel {
            text: hour.to_string(),
            anchor: geometry.point_at(tick.angle, geometry.tick_radius + offset),
            rotation,
            flipped,
        })
    }
}

/// Trait for rendering backends.
///
/// Backends draw the pieces; `build_scene` fixes the paint order: ring
/// background, accent arc, handles, then ticks.
pub trait Renderer {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.draw_ring(ctx);
        self.draw_arc(ctx);
        for glyph in ctx.handle_glyphs() {
            self.draw_handle(ctx, &glyph);
        }
        for tick in ctx.wheel.ticks() {
            self.draw_tick(ctx, &tick);
        }
    }

    /// Draw the dashed background ring.
    fn draw_ring(&mut self, ctx: &RenderContext);

    /// Draw the accent arc between the handles.
    fn draw_arc(&mut self, ctx: &RenderContext);

    /// Draw one handle glyph.
    fn draw_handle(&mut self, ctx: &RenderContext, glyph: &HandleGlyph);

    /// Draw one tick and its label.
    fn draw_tick(&mut self, ctx: &RenderContext, tick: &Tick);
}
