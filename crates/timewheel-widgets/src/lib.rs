//! egui widget for the time-range wheel.
//!
//! - **TimeWheel**: interactive widget driving a `TimeRangeWheel`
//! - **EguiRenderer**: `Renderer` backend painting through an `egui::Painter`

pub mod painter;
pub mod wheel;

pub use painter::{EguiRenderer, to_color32};
pub use wheel::{TimeWheel, TimeWheelResponse};
