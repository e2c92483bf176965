//! Renderer backend that paints with an `egui::Painter`.

use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke};
use kurbo::Point;
use peniko::Color;
use timewheel_core::geometry::Tick;
use timewheel_core::time::SEGMENT_ANGLE;
use timewheel_render::{HandleGlyph, RenderContext, Renderer};

/// Dash and gap length of the background ring.
const RING_DASH: f32 = 2.0;
/// Extra outline drawn around a hovered or dragged handle.
const ACTIVE_OUTLINE: f32 = 3.0;
const LABEL_FONT_SIZE: f32 = 10.0;

/// Convert a peniko color to an egui color.
pub fn to_color32(color: Color) -> Color32 {
    let rgba = color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Paints a wheel into an egui painter, with the wheel canvas placed at
/// `origin`.
pub struct EguiRenderer<'p> {
    painter: &'p Painter,
    origin: Pos2,
}

impl<'p> EguiRenderer<'p> {
    pub fn new(painter: &'p Painter, origin: Pos2) -> Self {
        Self { painter, origin }
    }

    fn pos(&self, point: Point) -> Pos2 {
        Pos2::new(
            self.origin.x + point.x as f32,
            self.origin.y + point.y as f32,
        )
    }
}

impl Renderer for EguiRenderer<'_> {
    fn draw_ring(&mut self, ctx: &RenderContext) {
        let geometry = ctx.geometry();
        let config = ctx.config();
        let steps = (360.0 / SEGMENT_ANGLE) as usize;
        let points: Vec<Pos2> = (0..=steps)
            .map(|i| self.pos(geometry.point_at(i as f64 * SEGMENT_ANGLE, geometry.radius)))
            .collect();
        let stroke = Stroke::new(
            (config.indicator_width - 2.0).max(0.0) as f32,
            to_color32(config.indicator_background_color.into()),
        );
        self.painter
            .extend(Shape::dashed_line(&points, stroke, RING_DASH, RING_DASH));
    }

    fn draw_arc(&mut self, ctx: &RenderContext) {
        if ctx.arc.sweep() <= 0.0 {
            return;
        }
        let config = ctx.config();
        let points: Vec<Pos2> = ctx.arc_polyline().into_iter().map(|p| self.pos(p)).collect();
        self.painter.add(Shape::line(
            points,
            Stroke::new(
                config.indicator_width as f32,
                to_color32(config.accent_color.into()),
            ),
        ));
    }

    fn draw_handle(&mut self, _ctx: &RenderContext, glyph: &HandleGlyph) {
        let center = self.pos(glyph.center);
        let radius = glyph.radius as f32;
        if glyph.state.is_active() {
            self.painter.circle_filled(
                center,
                radius + ACTIVE_OUTLINE,
                to_color32(glyph.fill).gamma_multiply(0.35),
            );
        }
        self.painter.circle(
            center,
            radius,
            to_color32(glyph.fill),
            Stroke::new(glyph.stroke_width as f32, to_color32(glyph.stroke)),
        );
        self.painter.text(
            center,
            Align2::CENTER_CENTER,
            glyph.icon,
            FontId::proportional(radius),
            to_color32(glyph.icon_color),
        );
    }

    fn draw_tick(&mut self, ctx: &RenderContext, tick: &Tick) {
        let color = to_color32(ctx.config().tick_color.into());
        let line = ctx.tick_line(tick);
        self.painter.line_segment(
            [self.pos(line.p0), self.pos(line.p1)],
            Stroke::new(1.0, color),
        );

        // egui text stays upright, so labels are centered past the tick end
        if let Some(hour) = tick.hour {
            let geometry = ctx.geometry();
            let anchor = geometry.point_at(tick.angle, geometry.tick_radius + tick.length() + 8.0);
            self.painter.text(
                self.pos(anchor),
                Align2::CENTER_CENTER,
                hour,
                FontId::proportional(LABEL_FONT_SIZE),
                color,
            );
        }
    }
}
