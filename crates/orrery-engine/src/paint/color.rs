/// Straight-alpha RGBA color.
///
/// Components are in `[0, 1]` and hold the value meant to land in the
/// framebuffer. Blending uses `src_alpha / one_minus_src_alpha`, so colors
/// are never premultiplied on the CPU side.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color to hand the GPU when rendering into `format`.
    ///
    /// sRGB targets encode shader output on store, so the RGB channels are
    /// decoded to linear first and the stored bytes stay equal to `self`.
    /// Alpha is never encoded.
    pub fn encoded_for(self, format: wgpu::TextureFormat) -> Self {
        if !format.is_srgb() {
            return self;
        }
        Self::new(srgb_to_linear(self.r), srgb_to_linear(self.g), srgb_to_linear(self.b), self.a)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Converts to the `wgpu` clear color representation.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Color = Color::new(0.9, 0.2, 0.2, 1.0);

    // What an sRGB render target stores for a linear shader output.
    fn store_srgb(linear: f32) -> f32 {
        if linear <= 0.0031308 {
            linear * 12.92
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    }

    fn to_byte(c: f32) -> u8 {
        (c.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    #[test]
    fn unorm_target_keeps_values() {
        assert_eq!(FILL.encoded_for(wgpu::TextureFormat::Bgra8Unorm), FILL);
        assert_eq!(FILL.encoded_for(wgpu::TextureFormat::Rgba8Unorm), FILL);
    }

    #[test]
    fn srgb_target_stores_requested_bytes() {
        let c = FILL.encoded_for(wgpu::TextureFormat::Bgra8UnormSrgb);
        assert!(c.g < 0.05, "0.2 must be decoded before upload, got {}", c.g);
        let stored = [store_srgb(c.r), store_srgb(c.g), store_srgb(c.b)].map(to_byte);
        assert_eq!(stored, [0.9f32, 0.2, 0.2].map(to_byte));
    }

    #[test]
    fn alpha_is_not_encoded() {
        let floor = Color::new(0.0, 1.0, 1.0, 0.6);
        let c = floor.encoded_for(wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!(c.a, 0.6);
        assert_eq!((c.r, c.g, c.b), (0.0, 1.0, 1.0));
    }
}
