use orrery_engine::render::{MagFilter, MinFilter, TextureParams, Wrap};

/// Tunables for the earth scene.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthConfig {
    /// Floor texture, tiled across the reflective plane.
    pub floor_texture: String,
    pub earth_texture: String,
    /// Used for the orbiting moon and the scattered satellites.
    pub moon_texture: String,

    pub satellite_count: usize,
    pub satellite_seed: u64,

    /// Distance the camera moves per Up/Down press.
    pub camera_step: f32,
    /// Degrees the camera turns per Left/Right press.
    pub turn_step_degrees: f32,
}

impl Default for EarthConfig {
    fn default() -> Self {
        Self {
            floor_texture: "water.bmp".to_string(),
            earth_texture: "earth.bmp".to_string(),
            moon_texture: "moonlike.tga".to_string(),
            satellite_count: 30,
            satellite_seed: 1,
            camera_step: 0.1,
            turn_step_degrees: 5.0,
        }
    }
}

pub const FLOOR_PARAMS: TextureParams = TextureParams {
    min_filter: MinFilter::LinearMipmapLinear,
    mag_filter: MagFilter::Linear,
    wrap: Wrap::Repeat,
};

pub const EARTH_PARAMS: TextureParams = TextureParams {
    min_filter: MinFilter::NearestMipmapNearest,
    mag_filter: MagFilter::Nearest,
    wrap: Wrap::ClampToEdge,
};

pub const MOON_PARAMS: TextureParams = TextureParams {
    min_filter: MinFilter::LinearMipmapLinear,
    mag_filter: MagFilter::Linear,
    wrap: Wrap::ClampToEdge,
};
