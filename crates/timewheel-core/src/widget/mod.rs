//! Handle model for the wheel.
//!
//! - The two range handles and their angle/value pair
//! - Drag gesture state and per-handle presentation state

mod handles;
mod state;

pub use handles::{Handle, HandleLabel, HandleSet};
pub use state::{DragState, HandleState};
