/// Viewport size in logical pixels.
///
/// Renderers scale this by the window scale factor when they need physical
/// pixels (stroke widths, point sizes).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height. Degenerate viewports report `1.0`.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Returns the viewport scaled to physical pixels.
    #[inline]
    pub fn to_physical(self, scale_factor: f32) -> Self {
        Self::new(self.width * scale_factor, self.height * scale_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_valid_viewport() {
        assert_eq!(Viewport::new(800.0, 600.0).aspect(), 800.0 / 600.0);
    }

    #[test]
    fn aspect_of_zero_height_falls_back() {
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), 1.0);
    }

    #[test]
    fn to_physical_scales_both_axes() {
        assert_eq!(Viewport::new(100.0, 50.0).to_physical(2.0), Viewport::new(200.0, 100.0));
    }
}
