//! Vertex layout
//!
//! Interleaved `position, tex_coord` floats, 20 bytes per vertex. Attribute
//! locations are fixed at link time, so layout and shader agree by construction.

use bytemuck::{Pod, Zeroable};

/// Vertex with position and texture coordinate
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Model-space position
    pub position: [f32; 3],
    /// Texture coordinate, (0, 0) at the image's top-left
    pub tex_coord: [f32; 2],
}

/// One float attribute inside a [`Vertex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute name
    pub name: &'static str,
    /// Location bound before linking
    pub location: u32,
    /// Number of floats
    pub components: i32,
    /// Byte offset from the start of the vertex
    pub offset: i32,
}

/// Byte offset of the float at `float_index` within a vertex
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn float_offset(float_index: usize) -> i32 {
    (float_index * std::mem::size_of::<f32>()) as i32
}

/// Byte distance between consecutive vertices holding `floats` floats each
pub const fn stride_of(floats: usize) -> i32 {
    float_offset(floats)
}

impl Vertex {
    /// Bytes between consecutive vertices
    pub const STRIDE: i32 = stride_of(5);

    /// Position attribute, location 0
    pub const POSITION: VertexAttribute = VertexAttribute {
        name: "aPosition",
        location: 0,
        components: 3,
        offset: float_offset(0),
    };

    /// Texture coordinate attribute, location 1
    pub const TEX_COORD: VertexAttribute = VertexAttribute {
        name: "aTexCoord",
        location: 1,
        components: 2,
        offset: float_offset(3),
    };

    /// Both attributes in location order
    pub const ATTRIBUTES: [VertexAttribute; 2] = [Self::POSITION, Self::TEX_COORD];

    /// Create a vertex
    pub const fn new(position: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }
}

const TOP_LEFT: [f32; 2] = [0.0, 0.0];
const BOTTOM_LEFT: [f32; 2] = [0.0, 1.0];
const BOTTOM_RIGHT: [f32; 2] = [1.0, 1.0];
const TOP_RIGHT: [f32; 2] = [1.0, 0.0];

/// Square of half-width `half` drawn as a triangle fan
///
/// Corners run top-left, bottom-left, bottom-right, top-right, so corners 0
/// and 2 are diagonal.
pub fn square_fan(half: f32) -> Vec<Vertex> {
    vec![
        Vertex::new([-half, half, 0.0], TOP_LEFT),
        Vertex::new([-half, -half, 0.0], BOTTOM_LEFT),
        Vertex::new([half, -half, 0.0], BOTTOM_RIGHT),
        Vertex::new([half, half, 0.0], TOP_RIGHT),
    ]
}

/// Square of half-width `half` drawn as two independent triangles
///
/// Same corner order as [`square_fan`], with corners 0 and 2 repeated.
pub fn square_triangles(half: f32) -> Vec<Vertex> {
    let fan = square_fan(half);
    vec![fan[0], fan[1], fan[2], fan[0], fan[2], fan[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_repr_c() {
        assert_eq!(Vertex::STRIDE as usize, std::mem::size_of::<Vertex>());
        assert_eq!(Vertex::STRIDE, 20);
        assert_eq!(Vertex::POSITION.offset, 0);
        assert_eq!(Vertex::TEX_COORD.offset, 12);
    }

    #[test]
    fn test_cast_to_bytes() {
        let vertices = square_fan(0.5);
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 4 * 20);
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(&floats[..5], &[-0.5, 0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_diagonal_corners() {
        for vertices in [square_fan(0.3), square_triangles(0.3)] {
            assert_eq!(vertices[0].position, [-0.3, 0.3, 0.0]);
            assert_eq!(vertices[2].position, [0.3, -0.3, 0.0]);
        }
        assert_eq!(square_triangles(1.0).len(), 6);
    }
}
