//! On-screen controls
//!
//! Textured buttons that can be hit-tested against touches, and the pulse
//! animation applied to them while drawing.

pub mod control;
pub mod pulse;

pub use control::{Control, ControlAction};
pub use pulse::pulse_scale;
