//! Touch input and hit-testing
//!
//! Screen touches arrive in device points with the origin at the top-left;
//! [`touch`] converts them to framebuffer pixels and [`hit_test`] maps pixels
//! back into world space to test them against control bounds.

pub mod touch;

pub use hit_test::{screen_to_world, AxisAlignedBound};
pub use touch::{TouchEvent, Viewport};
