//! SVG backend: renders a wheel into a standalone SVG document.

use peniko::Color;
use timewheel_core::geometry::Tick;

use crate::renderer::{HandleGlyph, RenderContext, RenderResult, Renderer};

/// Font size of the hour labels.
const LABEL_FONT_SIZE: f64 = 10.0;

/// Format a color as `#rrggbb`, with an alpha byte only when translucent.
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

/// Accumulates SVG elements for one frame.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    body: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `ctx` into a complete SVG document.
    pub fn render(ctx: &RenderContext) -> RenderResult<String> {
        let mut renderer = Self::new();
        renderer.build_scene(ctx);
        Ok(renderer.finish(ctx))
    }

    /// Wrap the accumulated elements in an `<svg>` root and reset.
    pub fn finish(&mut self, ctx: &RenderContext) -> String {
        let canvas = ctx.geometry().canvas;
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = canvas.width,
            h = canvas.height,
        );
        out.push('\n');
        if let Some(background) = ctx.background_color {
            out.push_str(&format!(
                r#"<rect width="100%" height="100%" fill="{}"/>"#,
                css_color(background)
            ));
            out.push('\n');
        }
        out.push_str(&std::mem::take(&mut self.body));
        out.push_str("</svg>\n");
        out
    }

    fn push(&mut self, element: String) {
        self.body.push_str(&element);
        self.body.push('\n');
    }
}

impl Renderer for SvgRenderer {
    fn draw_ring(&mut self, ctx: &RenderContext) {
        let geometry = ctx.geometry();
        let config = ctx.config();
        self.push(format!(
            r#"<circle class="ringbgrd" cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-dasharray="2"/>"#,
            geometry.center.x,
            geometry.center.y,
            geometry.radius,
            css_color(config.indicator_background_color.into()),
            (config.indicator_width - 2.0).max(0.0),
        ));
    }

    fn draw_arc(&mut self, ctx: &RenderContext) {
        let path = ctx.arc_path();
        if path.elements().is_empty() {
            return;
        }
        self.push(format!(
            r#"<path class="arcindicator" d="{}" fill="{}"/>"#,
            path.to_svg(),
            css_color(ctx.config().accent_color.into()),
        ));
    }

    fn draw_handle(&mut self, _ctx: &RenderContext, glyph: &HandleGlyph) {
        let class = if glyph.state.is_active() {
            "handlercontainer active"
        } else {
            "handlercontainer"
        };
        self.push(format!(
            concat!(
                r#"<g class="{class}" id="{label}">"#,
                r#"<circle class="handle" cx="{x:.2}" cy="{y:.2}" r="{r:.2}" fill="{fill}" stroke="{stroke}" stroke-width="{sw:.2}"/>"#,
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" dominant-baseline="central" fill="{icon_color}">{icon}</text>"#,
                "</g>"
            ),
            class = class,
            label = glyph.label,
            x = glyph.center.x,
            y = glyph.center.y,
            r = glyph.radius,
            fill = css_color(glyph.fill),
            stroke = css_color(glyph.stroke),
            sw = glyph.stroke_width,
            icon_color = css_color(glyph.icon_color),
            icon = glyph.icon,
        ));
    }

    fn draw_tick(&mut self, ctx: &RenderContext, tick: &Tick) {
        let color = css_color(ctx.config().tick_color.into());
        let line = ctx.tick_line(tick);
        self.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{color}"/>"#,
            line.p0.x, line.p0.y, line.p1.x, line.p1.y,
        ));

        if let Some(label) = ctx.tick_label(tick) {
            let anchor = if label.flipped { "end" } else { "start" };
            self.push(format!(
                r#"<text transform="translate({:.2},{:.2}) rotate({:.2})" dy=".35em" text-anchor="{anchor}" fill="{color}" font-size="{LABEL_FONT_SIZE}">{}</text>"#,
                label.anchor.x, label.anchor.y, label.rotation, label.text,
            ));
        }
    }
}
