//! Math utilities and types
//!
//! Matrix helpers follow OpenGL conventions: column vectors, right-handed view
//! space, clip-space depth in [-1, 1].

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};
use thiserror::Error;

use crate::input::touch::Viewport;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Failure to map a window coordinate back into world space
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnprojectError {
    /// The combined projection and model-view matrix has no inverse
    #[error("projection-modelview matrix is singular")]
    SingularMatrix,

    /// The unprojected point has a zero homogeneous coordinate
    #[error("unprojected point lies at infinity")]
    PointAtInfinity,

    /// The viewport has zero width or height
    #[error("viewport has zero area")]
    EmptyViewport,
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
}

/// Extension trait for Mat4 with the constructors the scene needs
pub trait Mat4Ext {
    /// OpenGL orthographic projection
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Translation matrix
    fn translation(x: f32, y: f32, z: f32) -> Mat4;

    /// Non-uniform scale matrix
    fn scaling(x: f32, y: f32, z: f32) -> Mat4;

    /// Column-major element array, the layout `glUniformMatrix4fv` expects
    fn to_column_array(&self) -> [f32; 16];
}

impl Mat4Ext for Mat4 {
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_orthographic(left, right, bottom, top, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }

    fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(x, y, z))
    }

    fn to_column_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.as_slice());
        out
    }
}

/// Map a world-space point to window coordinates (origin bottom-left, depth in [0, 1])
pub fn project(world: Vec3, model_view: &Mat4, projection: &Mat4, viewport: &Viewport) -> Vec3 {
    let clip = projection * model_view * Vec4::new(world.x, world.y, world.z, 1.0);
    let ndc = clip.xyz() / clip.w;

    Vec3::new(
        viewport.x as f32 + (ndc.x + 1.0) * 0.5 * viewport.width as f32,
        viewport.y as f32 + (ndc.y + 1.0) * 0.5 * viewport.height as f32,
        (ndc.z + 1.0) * 0.5,
    )
}

/// Map a window coordinate (origin bottom-left, depth in [0, 1]) back into world space
///
/// Inverse of [`project`]: normalizes the window point against the viewport,
/// multiplies by the inverse of `projection * model_view` and divides by w.
pub fn unproject(
    window: Vec3,
    model_view: &Mat4,
    projection: &Mat4,
    viewport: &Viewport,
) -> Result<Vec3, UnprojectError> {
    if viewport.width <= 0 || viewport.height <= 0 {
        return Err(UnprojectError::EmptyViewport);
    }

    let inverse = (projection * model_view)
        .try_inverse()
        .ok_or(UnprojectError::SingularMatrix)?;

    let ndc = Vec4::new(
        (window.x - viewport.x as f32) / viewport.width as f32 * 2.0 - 1.0,
        (window.y - viewport.y as f32) / viewport.height as f32 * 2.0 - 1.0,
        window.z * 2.0 - 1.0,
        1.0,
    );

    let out = inverse * ndc;
    if out.w == 0.0 {
        return Err(UnprojectError::PointAtInfinity);
    }

    Ok(out.xyz() / out.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn scene_camera(aspect: f32) -> (Mat4, Mat4) {
        let projection = Mat4::orthographic(-aspect, aspect, -1.0, 1.0, 3.0, 7.0);
        let view = Mat4::look_at(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::zeros(),
            Vec3::new(0.0, 1.0, 0.0),
        );
        (projection, view)
    }

    #[test]
    fn test_project_unproject_round_trip() {
        let viewport = Viewport::new(0, 0, 750, 1334);
        let (projection, view) = scene_camera(750.0 / 1334.0);

        for &(x, y) in &[(0.0, 0.0), (0.3, -0.2), (-0.25, 0.8), (0.4, -0.4)] {
            let window = project(Vec3::new(x, y, 0.0), &view, &projection, &viewport);
            let world = unproject(window, &view, &projection, &viewport).unwrap();
            assert_abs_diff_eq!(world.x, x, epsilon = 1e-4);
            assert_abs_diff_eq!(world.y, y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_unproject_viewport_center_is_origin() {
        let viewport = Viewport::new(0, 0, 800, 600);
        let (projection, _) = scene_camera(800.0 / 600.0);

        let world = unproject(Vec3::new(400.0, 300.0, 1.0), &Mat4::identity(), &projection, &viewport).unwrap();
        assert_abs_diff_eq!(world.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(world.y, 0.0, epsilon = 1e-5);
        // depth 1.0 lands on the far plane
        assert_abs_diff_eq!(world.z, -7.0, epsilon = 1e-4);
    }

    #[test]
    fn test_unproject_singular_matrix_fails() {
        let viewport = Viewport::new(0, 0, 100, 100);
        let result = unproject(Vec3::new(10.0, 10.0, 1.0), &Mat4::zeros(), &Mat4::identity(), &viewport);
        assert_eq!(result, Err(UnprojectError::SingularMatrix));
    }

    #[test]
    fn test_unproject_empty_viewport_fails() {
        let viewport = Viewport::new(0, 0, 0, 100);
        let result = unproject(Vec3::zeros(), &Mat4::identity(), &Mat4::identity(), &viewport);
        assert_eq!(result, Err(UnprojectError::EmptyViewport));
    }

    #[test]
    fn test_column_array_layout() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        let cols = m.to_column_array();
        // translation lives in the last column
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(cols[15], 1.0);
    }
}
