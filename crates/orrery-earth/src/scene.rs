use std::time::Instant;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orrery_engine::assets::AssetLocator;
use orrery_engine::coords::Viewport;
use orrery_engine::geometry::{make_sphere, Batch, BatchError, PrimitiveKind};
use orrery_engine::input::Key;
use orrery_engine::math::{Frame, Frustum, GeometryTransform, MatrixStack, MatrixStackError};
use orrery_engine::paint::Color;
use orrery_engine::render::{SceneRenderer, TextureBank, TextureParams};
use orrery_engine::scene::{
    BlendMode, DrawList, MeshId, RasterState, StockShader, TextureId, Winding,
};
use orrery_engine::time::Stopwatch;

use crate::config::{EarthConfig, EARTH_PARAMS, FLOOR_PARAMS, MOON_PARAMS};

/// Floor tint; alpha lets the mirrored scene show through.
pub const FLOOR_COLOR: Color = Color::new(0.0, 1.0, 1.0, 0.6);
/// Point light position in eye space.
pub const LIGHT_POSITION: Vec3 = Vec3::new(3.0, 0.0, 3.0);
/// Earth spin in degrees per second; the moon orbits twice as fast.
pub const DEGREES_PER_SECOND: f64 = 60.0;

const FLOOR_Y: f32 = -0.41;
const FLOOR_HALF_EXTENT: f32 = 25.0;
const FLOOR_TEX_REPEAT: f32 = 10.0;

const FOV_Y_DEGREES: f32 = 40.0;
const NEAR: f32 = 1.0;
const FAR: f32 = 500.0;

/// Mesh and texture handles shared by both passes.
#[derive(Debug, Copy, Clone)]
pub struct SceneAssets {
    pub earth: MeshId,
    pub small_sphere: MeshId,
    pub floor: MeshId,
    pub floor_texture: TextureId,
    pub earth_texture: TextureId,
    pub moon_texture: TextureId,
}

/// Textured quad under the scene, drawn as a fan.
///
/// Texture rows run top-down, so `v` counts from the far edge: the image's
/// bottom row meets the near-left corner.
pub fn floor_batch() -> Result<Batch, BatchError> {
    let (e, y, t) = (FLOOR_HALF_EXTENT, FLOOR_Y, FLOOR_TEX_REPEAT);
    let mut b = Batch::begin(PrimitiveKind::TriangleFan, 4);
    b.normal(0.0, 1.0, 0.0);
    b.tex_coord(0.0, t).vertex(-e, y, e);
    b.tex_coord(t, t).vertex(e, y, e);
    b.tex_coord(t, 0.0).vertex(e, y, -e);
    b.tex_coord(0.0, 0.0).vertex(-e, y, -e);
    b.end()
}

/// Frames for `count` satellites scattered on the y = 0 plane.
///
/// Coordinates fall on a 0.06 grid in `[-12, 11.94]`; the same seed always
/// gives the same layout.
pub fn scatter_satellites(count: usize, seed: u64) -> Vec<Frame> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut coord = || (rng.gen_range(0i32..400) - 200) as f32 * 0.06;
    (0..count)
        .map(|_| {
            let x = coord();
            let z = coord();
            Frame::at(Vec3::new(x, 0.0, z))
        })
        .collect()
}

/// Earth, moon and satellites above a translucent reflective floor.
#[derive(Debug)]
pub struct EarthScene {
    assets: SceneAssets,
    satellites: Vec<Frame>,
    camera: Frame,
    camera_step: f32,
    turn_step_degrees: f32,
    frustum: Frustum,
    transform: GeometryTransform,
    clock: Stopwatch,
}

impl EarthScene {
    /// Builds the meshes and texture slots; textures are loaded separately.
    pub fn new(renderer: &mut SceneRenderer, config: &EarthConfig) -> Result<Self, BatchError> {
        let earth = renderer.add_triangle_batch("earth", &make_sphere(0.5, 50, 100));
        let small_sphere = renderer.add_triangle_batch("small sphere", &make_sphere(0.1, 28, 14));
        let floor = renderer.add_batch("floor", &floor_batch()?);

        let bank = renderer.textures_mut();
        let assets = SceneAssets {
            earth,
            small_sphere,
            floor,
            floor_texture: bank.add_slot("floor"),
            earth_texture: bank.add_slot("earth"),
            moon_texture: bank.add_slot("moon"),
        };

        let mut scene = Self {
            assets,
            satellites: scatter_satellites(config.satellite_count, config.satellite_seed),
            camera: Frame::new(),
            camera_step: config.camera_step,
            turn_step_degrees: config.turn_step_degrees,
            frustum: Frustum::default(),
            transform: GeometryTransform::new(),
            clock: Stopwatch::new(),
        };
        scene.reshape(Viewport::new(1200.0, 800.0));
        Ok(scene)
    }

    pub fn assets(&self) -> SceneAssets {
        self.assets
    }

    pub fn satellites(&self) -> &[Frame] {
        &self.satellites
    }

    pub fn camera(&self) -> &Frame {
        &self.camera
    }

    /// Loads the three textures, logging and skipping any that fail.
    ///
    /// Returns the number of textures loaded.
    pub fn load_textures(
        &self,
        bank: &mut TextureBank,
        locator: &AssetLocator,
        config: &EarthConfig,
    ) -> usize {
        let slots: [(TextureId, &str, TextureParams); 3] = [
            (self.assets.floor_texture, &config.floor_texture, FLOOR_PARAMS),
            (self.assets.earth_texture, &config.earth_texture, EARTH_PARAMS),
            (self.assets.moon_texture, &config.moon_texture, MOON_PARAMS),
        ];

        let mut loaded = 0;
        for (id, name, params) in slots {
            let path = locator.resolve(name);
            match bank.load(id, &path, params) {
                Ok(()) => loaded += 1,
                Err(e) => log::warn!("{e}; drawing without it"),
            }
        }
        log::info!("{loaded}/3 textures loaded");
        loaded
    }

    /// Moves or turns the camera for an arrow key. Returns `false` for other keys.
    pub fn move_camera(&mut self, key: Key) -> bool {
        let turn = self.turn_step_degrees.to_radians();
        match key {
            Key::ArrowUp => self.camera.move_forward(self.camera_step),
            Key::ArrowDown => self.camera.move_forward(-self.camera_step),
            Key::ArrowLeft => self.camera.rotate_world(turn, Vec3::Y),
            Key::ArrowRight => self.camera.rotate_world(-turn, Vec3::Y),
            _ => return false,
        }
        true
    }

    pub fn reshape(&mut self, viewport: Viewport) {
        self.frustum.set_perspective(FOV_Y_DEGREES, viewport.aspect(), NEAR, FAR);
        self.transform.reshape(&self.frustum);
    }

    /// Earth spin angle in degrees at `now`; timing starts on the first call.
    pub fn y_rotation(&mut self, now: Instant) -> f32 {
        let secs = self.clock.elapsed_at(now).as_secs_f64();
        ((secs * DEGREES_PER_SECOND) % 360.0) as f32
    }

    /// Records the mirrored body, the blended floor, then the body itself.
    pub fn record(&mut self, list: &mut DrawList, y_rot: f32) -> Result<(), MatrixStackError> {
        let body = Body {
            assets: self.assets,
            satellites: &self.satellites,
            projection: self.transform.projection_matrix(),
            y_rot,
        };
        let mv = &mut self.transform.model_view;

        mv.push()?;
        mv.mult_matrix(self.camera.camera_matrix());

        mv.scoped(|mv| {
            mv.scale(1.0, -1.0, 1.0);
            mv.translate(0.0, 0.8, 0.0);
            body.record(mv, list, Winding::Cw)
        })??;

        let floor_state = RasterState {
            front_face: Winding::Ccw,
            cull_back: true,
            blend: BlendMode::Alpha,
        };
        list.fill(
            self.assets.floor,
            StockShader::TextureModulate {
                mvp: body.projection * mv.top(),
                color: FLOOR_COLOR,
                texture: self.assets.floor_texture,
            },
            floor_state,
        );

        body.record(mv, list, Winding::Ccw)?;
        mv.pop()
    }
}

/// Everything above the floor, drawn once per pass.
struct Body<'a> {
    assets: SceneAssets,
    satellites: &'a [Frame],
    projection: Mat4,
    y_rot: f32,
}

impl Body<'_> {
    fn lit(&self, model_view: Mat4, texture: TextureId) -> StockShader {
        StockShader::TexturePointLightDiffuse {
            model_view,
            projection: self.projection,
            light_position: LIGHT_POSITION,
            color: Color::WHITE,
            texture,
        }
    }

    /// Leaves the earth/moon transform on the top of `mv`; callers scope it.
    fn record(
        &self,
        mv: &mut MatrixStack,
        list: &mut DrawList,
        front_face: Winding,
    ) -> Result<(), MatrixStackError> {
        let state = RasterState { front_face, cull_back: true, blend: BlendMode::Opaque };
        let a = self.assets;

        for frame in self.satellites {
            mv.push()?;
            mv.mult_frame(frame);
            list.fill(a.small_sphere, self.lit(mv.top(), a.moon_texture), state);
            mv.pop()?;
        }

        mv.translate(0.0, 0.2, -2.5);
        mv.rotate(-90.0, 1.0, 0.0, 0.0);

        mv.push()?;
        mv.rotate(self.y_rot, 0.0, 0.0, 1.0);
        list.fill(a.earth, self.lit(mv.top(), a.earth_texture), state);
        mv.pop()?;

        mv.rotate(-90.0, 1.0, 0.0, 0.0);

        mv.push()?;
        mv.rotate(self.y_rot * 2.0, 0.0, 1.0, 0.0);
        mv.translate(0.8, 0.0, 0.0);
        list.fill(a.small_sphere, self.lit(mv.top(), a.moon_texture), state);
        mv.pop()
    }
}
