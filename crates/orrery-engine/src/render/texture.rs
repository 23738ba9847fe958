use std::fmt;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::RgbaImage;

use crate::render::RenderCtx;
use crate::scene::TextureId;

/// Minification filter, optionally sampling between mip levels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl MinFilter {
    #[inline]
    pub fn uses_mipmaps(self) -> bool {
        !matches!(self, Self::Nearest | Self::Linear)
    }

    fn filter_mode(self) -> wgpu::FilterMode {
        match self {
            Self::Nearest | Self::NearestMipmapNearest | Self::NearestMipmapLinear => {
                wgpu::FilterMode::Nearest
            }
            Self::Linear | Self::LinearMipmapNearest | Self::LinearMipmapLinear => {
                wgpu::FilterMode::Linear
            }
        }
    }

    fn mipmap_filter(self) -> wgpu::MipmapFilterMode {
        match self {
            Self::NearestMipmapLinear | Self::LinearMipmapLinear => wgpu::MipmapFilterMode::Linear,
            _ => wgpu::MipmapFilterMode::Nearest,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MagFilter {
    Nearest,
    Linear,
}

impl MagFilter {
    fn filter_mode(self) -> wgpu::FilterMode {
        match self {
            Self::Nearest => wgpu::FilterMode::Nearest,
            Self::Linear => wgpu::FilterMode::Linear,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Wrap {
    Repeat,
    ClampToEdge,
}

impl Wrap {
    fn address_mode(self) -> wgpu::AddressMode {
        match self {
            Self::Repeat => wgpu::AddressMode::Repeat,
            Self::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        }
    }
}

/// Sampling parameters applied when a texture is loaded.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureParams {
    pub min_filter: MinFilter,
    pub mag_filter: MagFilter,
    pub wrap: Wrap,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            min_filter: MinFilter::Linear,
            mag_filter: MagFilter::Linear,
            wrap: Wrap::ClampToEdge,
        }
    }
}

/// Texture load failure.
#[derive(Debug)]
pub enum TextureError {
    Io { path: PathBuf, source: std::io::Error },
    Decode { path: PathBuf, source: image::ImageError },
    /// The file decoded to a zero-sized image.
    Empty { path: PathBuf },
    UnknownSlot(TextureId),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Decode { path, source } => {
                write!(f, "cannot decode {}: {source}", path.display())
            }
            Self::Empty { path } => write!(f, "{} contains an empty image", path.display()),
            Self::UnknownSlot(id) => write!(f, "unknown texture slot {}", id.index()),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Empty { .. } | Self::UnknownSlot(_) => None,
        }
    }
}

/// Number of mip levels for a full chain down to 1×1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    32 - largest.leading_zeros()
}

/// Texel format for textures drawn into `surface`.
///
/// Texels reach a unorm target unchanged. On an sRGB target they are sampled
/// through an sRGB view so the store encodes them back to the file's bytes.
pub(crate) fn texel_format(surface: wgpu::TextureFormat) -> wgpu::TextureFormat {
    if surface.is_srgb() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

/// Decoded RGBA8 image with its mip chain, ready for upload.
#[derive(Debug, Clone)]
pub struct TextureImage {
    levels: Vec<RgbaImage>,
    params: TextureParams,
}

impl TextureImage {
    /// Reads and decodes an image file (BMP, TGA or PNG).
    pub fn load(path: &Path, params: TextureParams) -> Result<Self, TextureError> {
        let img = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => TextureError::Io { path: path.to_path_buf(), source },
            source => TextureError::Decode { path: path.to_path_buf(), source },
        })?;

        let rgba = img.to_rgba8();
        if rgba.width() == 0 || rgba.height() == 0 {
            return Err(TextureError::Empty { path: path.to_path_buf() });
        }
        Ok(Self::from_rgba(rgba, params))
    }

    /// Wraps decoded pixels, building mip levels when the min filter samples them.
    pub fn from_rgba(base: RgbaImage, params: TextureParams) -> Self {
        let count = if params.min_filter.uses_mipmaps() {
            mip_level_count(base.width(), base.height())
        } else {
            1
        };

        let mut levels = Vec::with_capacity(count as usize);
        levels.push(base);
        for _ in 1..count {
            let Some(prev) = levels.last() else { break };
            let w = (prev.width() / 2).max(1);
            let h = (prev.height() / 2).max(1);
            let next = image::imageops::resize(prev, w, h, FilterType::Triangle);
            levels.push(next);
        }

        Self { levels, params }
    }

    /// 1×1 opaque white, sampled by unbound slots.
    pub fn white() -> Self {
        Self::from_rgba(
            RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255])),
            TextureParams::default(),
        )
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.levels[0].width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.levels[0].height()
    }

    #[inline]
    pub fn mip_count(&self) -> u32 {
        self.levels.len() as u32
    }

    #[inline]
    pub fn params(&self) -> TextureParams {
        self.params
    }

    /// Downscaled copy whose largest side is `max_dimension`, keeping the
    /// aspect ratio and rebuilding the mip chain. `None` when it already fits.
    pub fn fit_within(&self, max_dimension: u32) -> Option<Self> {
        let (w, h) = (self.width(), self.height());
        let max = max_dimension.max(1);
        if w <= max && h <= max {
            return None;
        }

        let scale = max as f64 / w.max(h) as f64;
        let fw = ((w as f64 * scale).round() as u32).clamp(1, max);
        let fh = ((h as f64 * scale).round() as u32).clamp(1, max);
        let base = image::imageops::resize(&self.levels[0], fw, fh, FilterType::Triangle);
        Some(Self::from_rgba(base, self.params))
    }

    /// Creates the GPU texture, uploads every level and builds a sampler.
    fn upload(&self, ctx: &RenderCtx<'_>, label: &str) -> Texture {
        let size = wgpu::Extent3d {
            width: self.width(),
            height: self.height(),
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: self.mip_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: texel_format(ctx.surface_format),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, img) in self.levels.iter().enumerate() {
            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                img.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * img.width()),
                    rows_per_image: Some(img.height()),
                },
                wgpu::Extent3d {
                    width: img.width(),
                    height: img.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let wrap = self.params.wrap.address_mode();
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wrap,
            address_mode_v: wrap,
            address_mode_w: wrap,
            mag_filter: self.params.mag_filter.filter_mode(),
            min_filter: self.params.min_filter.filter_mode(),
            mipmap_filter: self.params.min_filter.mipmap_filter(),
            ..Default::default()
        });

        Texture { _texture: texture, view, sampler }
    }
}

/// GPU texture with its view and sampler.
struct Texture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

struct Slot {
    label: String,
    image: Option<TextureImage>,
    bind_group: Option<wgpu::BindGroup>,
}

/// Named texture slots loaded from disk and uploaded on first use.
///
/// A slot that never loaded successfully samples a 1×1 white texture.
#[derive(Default)]
pub struct TextureBank {
    slots: Vec<Slot>,
    fallback: Option<wgpu::BindGroup>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves an empty slot.
    pub fn add_slot(&mut self, label: impl Into<String>) -> TextureId {
        let id = TextureId(self.slots.len() as u32);
        self.slots.push(Slot { label: label.into(), image: None, bind_group: None });
        id
    }

    /// Loads `path` into slot `id`.
    ///
    /// On failure the slot keeps whatever it held before.
    pub fn load(
        &mut self,
        id: TextureId,
        path: &Path,
        params: TextureParams,
    ) -> Result<(), TextureError> {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return Err(TextureError::UnknownSlot(id));
        };

        let image = TextureImage::load(path, params)?;
        log::debug!(
            "texture '{}' loaded from {} ({}x{}, {} mip levels)",
            slot.label,
            path.display(),
            image.width(),
            image.height(),
            image.mip_count()
        );
        slot.image = Some(image);
        slot.bind_group = None;
        Ok(())
    }

    /// Stores already decoded pixels in slot `id`.
    pub fn set_image(&mut self, id: TextureId, image: TextureImage) -> Result<(), TextureError> {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return Err(TextureError::UnknownSlot(id));
        };
        slot.image = Some(image);
        slot.bind_group = None;
        Ok(())
    }

    pub fn image(&self, id: TextureId) -> Option<&TextureImage> {
        self.slots.get(id.index()).and_then(|s| s.image.as_ref())
    }

    pub fn is_loaded(&self, id: TextureId) -> bool {
        self.image(id).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Uploads loaded slots that have no GPU bind group yet.
    pub(crate) fn prepare(&mut self, ctx: &RenderCtx<'_>, layout: &wgpu::BindGroupLayout) {
        if self.fallback.is_none() {
            let white = TextureImage::white().upload(ctx, "orrery fallback texture");
            self.fallback = Some(texture_bind_group(ctx, layout, &white, "orrery fallback texture"));
        }

        let max_dimension = ctx.device.limits().max_texture_dimension_2d;
        for slot in &mut self.slots {
            if slot.bind_group.is_some() {
                continue;
            }
            let Some(image) = slot.image.as_mut() else { continue };
            if let Some(fitted) = image.fit_within(max_dimension) {
                log::warn!(
                    "texture '{}' is {}x{}, above the device limit of {max_dimension}; using {}x{}",
                    slot.label,
                    image.width(),
                    image.height(),
                    fitted.width(),
                    fitted.height()
                );
                *image = fitted;
            }
            let texture = image.upload(ctx, &slot.label);
            slot.bind_group = Some(texture_bind_group(ctx, layout, &texture, &slot.label));
        }
    }

    /// Bind group for `id`, or the white fallback. `None` before `prepare`.
    pub(crate) fn bind_group(&self, id: Option<TextureId>) -> Option<&wgpu::BindGroup> {
        id.and_then(|id| self.slots.get(id.index()))
            .and_then(|s| s.bind_group.as_ref())
            .or(self.fallback.as_ref())
    }

    /// Drops GPU objects so the next `prepare` re-uploads everything.
    pub(crate) fn invalidate(&mut self) {
        self.fallback = None;
        for slot in &mut self.slots {
            slot.bind_group = None;
        }
    }
}

// Bind groups keep their resources alive, so the `Texture` can be dropped here.
fn texture_bind_group(
    ctx: &RenderCtx<'_>,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    label: &str,
) -> wgpu::BindGroup {
    ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mip_params() -> TextureParams {
        TextureParams {
            min_filter: MinFilter::LinearMipmapLinear,
            mag_filter: MagFilter::Linear,
            wrap: Wrap::Repeat,
        }
    }

    // ── mip chain ─────────────────────────────────────────────────────────

    #[test]
    fn mip_level_count_follows_largest_side() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(512, 128), 10);
        assert_eq!(mip_level_count(300, 20), 9);
    }

    #[test]
    fn mip_filters_build_full_chain() {
        let img = TextureImage::from_rgba(RgbaImage::new(64, 16), mip_params());
        assert_eq!(img.mip_count(), 7);
        assert_eq!(img.levels.last().map(|l| (l.width(), l.height())), Some((1, 1)));
    }

    #[test]
    fn plain_filters_keep_single_level() {
        let img = TextureImage::from_rgba(RgbaImage::new(64, 64), TextureParams::default());
        assert_eq!(img.mip_count(), 1);
    }

    // ── device limits ─────────────────────────────────────────────────────

    #[test]
    fn oversized_image_is_scaled_to_limit() {
        let img = TextureImage::from_rgba(RgbaImage::new(40, 10), mip_params());
        let fitted = img.fit_within(16).unwrap();
        assert_eq!((fitted.width(), fitted.height()), (16, 4));
        assert_eq!(fitted.mip_count(), mip_level_count(16, 4));
        assert_eq!(fitted.params(), mip_params());
    }

    #[test]
    fn thin_image_keeps_at_least_one_row() {
        let img = TextureImage::from_rgba(RgbaImage::new(100, 3), TextureParams::default());
        let fitted = img.fit_within(8).unwrap();
        assert_eq!((fitted.width(), fitted.height()), (8, 1));
    }

    #[test]
    fn image_within_limit_is_left_alone() {
        let img = TextureImage::from_rgba(RgbaImage::new(16, 16), mip_params());
        assert!(img.fit_within(16).is_none());
        assert!(img.fit_within(8192).is_none());
    }

    #[test]
    fn texel_format_follows_surface_encoding() {
        assert_eq!(
            texel_format(wgpu::TextureFormat::Bgra8Unorm),
            wgpu::TextureFormat::Rgba8Unorm
        );
        assert_eq!(
            texel_format(wgpu::TextureFormat::Bgra8UnormSrgb),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
    }

    // ── bank ──────────────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_io_error_and_slot_stays_empty() {
        let mut bank = TextureBank::new();
        let id = bank.add_slot("floor");
        let err = bank
            .load(id, Path::new("definitely/not/here.bmp"), mip_params())
            .unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }), "{err}");
        assert!(!bank.is_loaded(id));
    }

    #[test]
    fn failed_load_keeps_previous_image() {
        let mut bank = TextureBank::new();
        let id = bank.add_slot("earth");
        bank.set_image(id, TextureImage::from_rgba(RgbaImage::new(4, 2), mip_params()))
            .unwrap();

        assert!(bank.load(id, Path::new("missing.tga"), mip_params()).is_err());
        let kept = bank.image(id).unwrap();
        assert_eq!((kept.width(), kept.height()), (4, 2));
    }

    #[test]
    fn undecodable_file_is_decode_error() {
        let path = std::env::temp_dir().join("orrery-texture-garbage.bmp");
        std::fs::write(&path, b"not a bitmap").unwrap();

        let mut bank = TextureBank::new();
        let id = bank.add_slot("moon");
        let err = bank.load(id, &path, TextureParams::default()).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, TextureError::Decode { .. }), "{err}");
    }

    #[test]
    fn decodes_png_from_disk() {
        let path = std::env::temp_dir().join("orrery-texture-ok.png");
        RgbaImage::from_pixel(8, 4, image::Rgba([0, 128, 255, 255]))
            .save(&path)
            .unwrap();

        let mut bank = TextureBank::new();
        let id = bank.add_slot("water");
        bank.load(id, &path, mip_params()).unwrap();
        let _ = std::fs::remove_file(&path);

        let img = bank.image(id).unwrap();
        assert_eq!(img.mip_count(), 4);
        assert_eq!(img.params().wrap, Wrap::Repeat);
    }

    #[test]
    fn unknown_slot_is_rejected() {
        let mut bank = TextureBank::new();
        let err = bank.load(TextureId(3), Path::new("x.bmp"), TextureParams::default());
        assert!(matches!(err, Err(TextureError::UnknownSlot(_))));
    }
}
