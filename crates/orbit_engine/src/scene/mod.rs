//! # Scene Module
//!
//! The fixed entity set and the driver that updates, draws and routes touches
//! to it. There is no scene graph: the driver owns every entity directly and
//! draws them in a fixed order.

pub mod driver;
pub mod layout;
pub mod moving_body;
pub mod static_quad;

pub use driver::SceneDriver;
pub use moving_body::{MovingBody, MovingBodyState, SpeedLevel};
pub use static_quad::StaticQuad;
