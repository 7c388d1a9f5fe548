//! Entity geometry and placement
//!
//! Every entity is a square centred on the origin in model space. Buttons sit
//! on a row near the bottom edge, the outer two inset from the sides by
//! [`BUTTON_EDGE_INSET`].

use crate::core::config::MotionConfig;
use crate::render::vertex::{square_fan, square_triangles};
use crate::scene::moving_body::MovingBody;
use crate::scene::static_quad::StaticQuad;
use crate::ui::control::{Control, ControlAction};

/// Half-width of each button
pub const BUTTON_HALF_EXTENT: f32 = 0.07;

/// World y of the button row
pub const BUTTON_ROW_Y: f32 = -0.85;

/// Distance of the outer buttons' centres from the left and right edges
pub const BUTTON_EDGE_INSET: f32 = 0.15;

/// Textures of the speed button, one per speed level
pub const SPEED_TEXTURES: [&str; 3] = ["speed_1x", "speed_2x", "speed_3x"];

/// Textures of the play button: stopped, then animating
pub const PLAY_TEXTURES: [&str; 2] = ["play", "pause"];

/// Starfield filling the unit square
pub fn stars() -> StaticQuad {
    StaticQuad::new("stars", square_triangles(1.0), "stars")
}

/// Earth at the origin
pub fn earth() -> StaticQuad {
    StaticQuad::new("earth", square_fan(0.3), "earth")
}

/// Moon, the only moving body
pub fn moon(motion: MotionConfig) -> MovingBody {
    MovingBody::new("moon", square_fan(0.1), "moon", motion)
}

/// Speed button at the left end of the row
pub fn speed_button(aspect: f32) -> Control {
    Control::new(
        "speed_button",
        square_fan(BUTTON_HALF_EXTENT),
        &SPEED_TEXTURES,
        (-aspect + BUTTON_EDGE_INSET, BUTTON_ROW_Y),
        ControlAction::CycleSpeed,
    )
}

/// Play/pause button in the middle of the row
pub fn play_button() -> Control {
    Control::new(
        "play_button",
        square_triangles(BUTTON_HALF_EXTENT),
        &PLAY_TEXTURES,
        (0.0, BUTTON_ROW_Y),
        ControlAction::TogglePlay,
    )
}

/// Direction button at the right end of the row
pub fn direction_button(aspect: f32) -> Control {
    Control::new(
        "direction_button",
        square_fan(BUTTON_HALF_EXTENT),
        &["direction"],
        (aspect - BUTTON_EDGE_INSET, BUTTON_ROW_Y),
        ControlAction::ReverseDirection,
    )
}

/// Every texture name the scene loads
pub fn texture_names() -> Vec<&'static str> {
    let mut names = vec!["stars", "earth", "moon"];
    names.extend(SPEED_TEXTURES);
    names.extend(PLAY_TEXTURES);
    names.push("direction");
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vertex_counts() {
        assert_eq!(stars().quad().vertices().len(), 6);
        assert_eq!(earth().quad().vertices().len(), 4);
        assert_eq!(moon(MotionConfig::default()).quad().vertices().len(), 4);
        assert_eq!(play_button().quad().vertices().len(), 6);
        assert_eq!(speed_button(0.5).quad().vertices().len(), 4);
        assert_eq!(direction_button(0.5).quad().vertices().len(), 4);
    }

    #[test]
    fn test_outer_buttons_track_aspect() {
        let speed = speed_button(0.5);
        let direction = direction_button(0.5);
        assert_relative_eq!(speed.translation()[(0, 3)], -0.35, epsilon = 1e-6);
        assert_relative_eq!(direction.translation()[(0, 3)], 0.35, epsilon = 1e-6);
        assert_eq!(speed.translation()[(1, 3)], BUTTON_ROW_Y);
    }

    #[test]
    fn test_texture_names_are_unique() {
        let mut names = texture_names();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 9);
    }
}
