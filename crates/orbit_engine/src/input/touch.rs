//! Touch events and the viewport they are resolved against

/// Framebuffer region rendered to, in pixels, as `glViewport` takes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Left edge
    pub x: i32,
    /// Bottom edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Viewport {
    /// Create a viewport
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport at the origin covering a `width` x `height` framebuffer
    pub fn from_size(width: u32, height: u32) -> Self {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Self::new(0, 0, clamp(width), clamp(height))
    }

    /// Absolute width over height; 1.0 for a degenerate viewport
    pub fn aspect(&self) -> f32 {
        if self.height == 0 || self.width == 0 {
            return 1.0;
        }
        (self.width as f32 / self.height as f32).abs()
    }

    /// Whether the viewport covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A touch as the host delivers it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Horizontal position in device points from the left edge
    pub x: f32,
    /// Vertical position in device points from the top edge
    pub y: f32,
    /// Framebuffer pixels per device point
    pub content_scale: f32,
}

impl TouchEvent {
    /// Create a touch event
    pub const fn new(x: f32, y: f32, content_scale: f32) -> Self {
        Self { x, y, content_scale }
    }

    /// Position in framebuffer pixels, origin still top-left
    pub fn to_framebuffer(&self) -> (f32, f32) {
        (self.x * self.content_scale, self.y * self.content_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_is_absolute() {
        assert_eq!(Viewport::new(0, 0, 200, 100).aspect(), 2.0);
        assert_eq!(Viewport::new(0, 0, -200, 100).aspect(), 2.0);
        assert_eq!(Viewport::new(0, 0, 200, 0).aspect(), 1.0);
    }

    #[test]
    fn test_touch_scales_to_pixels() {
        let touch = TouchEvent::new(10.0, 20.5, 2.0);
        assert_eq!(touch.to_framebuffer(), (20.0, 41.0));
    }

    #[test]
    fn test_from_size() {
        assert_eq!(Viewport::from_size(750, 1334), Viewport::new(0, 0, 750, 1334));
        assert!(Viewport::from_size(0, 10).is_empty());
    }
}
