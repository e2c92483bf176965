//! TimeWheel Core Library
//!
//! Rendering-agnostic model for a circular time-range picker: two handles
//! dragged around a 24-hour clock face, snapped to five-minute segments,
//! reporting the selected start, end and duration.

pub mod config;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod reporter;
pub mod time;
pub mod wheel;
pub mod widget;

pub use config::{HexColor, Margin, RangeData, WheelConfig};
pub use drag::{DragInteraction, DragStep, PointerEvent, pointer_angle};
pub use error::{WheelError, WheelResult};
pub use geometry::{RingGeometry, Tick, clock_direction};
pub use reporter::{
    ArcSpan, RangeListener, RangeReporter, TimeRangeInfo, compute_arc, compute_time_info,
};
pub use time::{AngleScale, ParseError};
pub use wheel::{DragOutcome, TimeRangeWheel};
pub use widget::{DragState, Handle, HandleLabel, HandleSet, HandleState};
