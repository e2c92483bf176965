//! TimeWheel Render Library
//!
//! Renderer abstraction for the time-range wheel and an SVG backend that
//! produces a standalone document.

mod renderer;
pub mod svg;

pub use renderer::{HandleGlyph, RenderContext, RenderResult, Renderer, RendererError, TickLabel};
pub use svg::{SvgRenderer, css_color};
