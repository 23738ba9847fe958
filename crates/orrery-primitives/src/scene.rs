use std::f32::consts::TAU;

use glam::Vec3;

use orrery_engine::coords::Viewport;
use orrery_engine::geometry::{Batch, BatchError};
use orrery_engine::input::Key;
use orrery_engine::math::{Frame, Frustum, GeometryTransform, MatrixStackError};
use orrery_engine::paint::Color;
use orrery_engine::render::SceneRenderer;
use orrery_engine::scene::{DrawList, MeshId, RasterState, StockShader};

use crate::mode::PrimitiveMode;

pub const FILL_COLOR: Color = Color::new(0.9, 0.2, 0.2, 1.0);
pub const WIRE_COLOR: Color = Color::BLACK;

/// Point size in logical pixels.
pub const POINT_SIZE: f32 = 5.0;
/// Width of line primitives and triangle outlines, logical pixels.
pub const LINE_WIDTH: f32 = 2.0;
/// NDC depth the outline is pulled toward the viewer over its fill.
pub const OUTLINE_DEPTH_OFFSET: f32 = 2.0e-4;

/// Degrees the object turns per arrow key press.
pub const ROTATE_STEP_DEGREES: f32 = 5.0;
/// Distance the camera is pulled back from the origin.
pub const CAMERA_DISTANCE: f32 = 30.0;

const FOV_Y_DEGREES: f32 = 40.0;
const NEAR: f32 = 1.0;
const FAR: f32 = 500.0;

const FAN_RADIUS: f32 = 7.0;
const FAN_SEGMENTS: usize = 28;
const STRIP_RADIUS: f32 = 6.0;
const STRIP_STEPS: usize = 18;

/// Triangle shared by the point and line modes.
pub fn base_triangle() -> [Vec3; 3] {
    [
        Vec3::new(-3.0, -2.5, 0.0),
        Vec3::new(0.0, 2.5, 0.0),
        Vec3::new(3.0, -2.5, 0.0),
    ]
}

/// Four-sided pyramid without a base, one triangle per side.
pub fn pyramid() -> [Vec3; 12] {
    let apex = Vec3::new(0.0, 2.5, 0.0);
    [
        Vec3::new(-3.0, -2.5, -3.0),
        Vec3::new(3.0, -2.5, -3.0),
        apex,
        Vec3::new(-3.0, -2.5, 3.0),
        Vec3::new(3.0, -2.5, 3.0),
        apex,
        Vec3::new(3.0, -2.5, -3.0),
        Vec3::new(3.0, -2.5, 3.0),
        apex,
        Vec3::new(-3.0, -2.5, 3.0),
        Vec3::new(-3.0, -2.5, -3.0),
        apex,
    ]
}

/// Fan hub behind the ring followed by the ring itself; the first ring point
/// is repeated at a full turn so the fan closes.
pub fn fan_points() -> Vec<Vec3> {
    let mut points = Vec::with_capacity(FAN_SEGMENTS + 2);
    points.push(Vec3::new(0.0, 0.0, -5.0));
    for i in 0..=FAN_SEGMENTS {
        let angle = i as f32 * TAU / FAN_SEGMENTS as f32;
        points.push(Vec3::new(angle.cos() * FAN_RADIUS, angle.sin() * FAN_RADIUS, 0.0));
    }
    points
}

/// Closed band: two vertices (z = -1, z = +1) per step around the circle.
pub fn strip_points() -> Vec<Vec3> {
    let mut points = Vec::with_capacity((STRIP_STEPS + 1) * 2);
    for i in 0..=STRIP_STEPS {
        let angle = i as f32 * TAU / STRIP_STEPS as f32;
        let x = STRIP_RADIUS * angle.sin();
        let y = STRIP_RADIUS * angle.cos();
        points.push(Vec3::new(x, y, -1.0));
        points.push(Vec3::new(x, y, 1.0));
    }
    points
}

/// One batch per mode, in [`PrimitiveMode::ALL`] order.
pub fn build_batches() -> Result<Vec<Batch>, BatchError> {
    PrimitiveMode::ALL
        .iter()
        .map(|mode| {
            let positions: Vec<Vec3> = match mode {
                PrimitiveMode::Points
                | PrimitiveMode::Lines
                | PrimitiveMode::LineStrip
                | PrimitiveMode::LineLoop => base_triangle().to_vec(),
                PrimitiveMode::Triangles => pyramid().to_vec(),
                PrimitiveMode::TriangleFan => fan_points(),
                PrimitiveMode::TriangleStrip => strip_points(),
            };
            let mut builder = Batch::begin(mode.kind(), positions.len());
            builder.copy_vertex_data(&positions);
            builder.end()
        })
        .collect()
}

/// Primitive demo state: static meshes, camera and object frames, and the
/// active mode.
#[derive(Debug)]
pub struct PrimitiveScene {
    meshes: Vec<MeshId>,
    camera: Frame,
    object: Frame,
    mode: PrimitiveMode,
    frustum: Frustum,
    transform: GeometryTransform,
}

impl PrimitiveScene {
    /// Builds every batch and registers it with `renderer`.
    pub fn new(renderer: &mut SceneRenderer) -> Result<Self, BatchError> {
        let meshes = build_batches()?
            .iter()
            .zip(PrimitiveMode::ALL)
            .map(|(batch, mode)| renderer.add_batch(mode.title(), batch))
            .collect();

        let mut camera = Frame::new();
        camera.move_forward(-CAMERA_DISTANCE);

        let mut scene = Self {
            meshes,
            camera,
            object: Frame::new(),
            mode: PrimitiveMode::default(),
            frustum: Frustum::default(),
            transform: GeometryTransform::new(),
        };
        scene.reshape(Viewport::new(800.0, 600.0));
        Ok(scene)
    }

    pub fn mode(&self) -> PrimitiveMode {
        self.mode
    }

    pub fn object(&self) -> &Frame {
        &self.object
    }

    pub fn mesh(&self, mode: PrimitiveMode) -> MeshId {
        self.meshes[mode.index()]
    }

    /// Switches to the next mode and returns it.
    pub fn advance_mode(&mut self) -> PrimitiveMode {
        self.mode = self.mode.next();
        log::info!("mode {}", self.mode.title());
        self.mode
    }

    /// Turns the object frame for an arrow key. Returns `false` for other keys.
    pub fn rotate_object(&mut self, key: Key) -> bool {
        let step = ROTATE_STEP_DEGREES.to_radians();
        let (angle, axis) = match key {
            Key::ArrowUp => (-step, Vec3::X),
            Key::ArrowDown => (step, Vec3::X),
            Key::ArrowLeft => (-step, Vec3::Y),
            Key::ArrowRight => (step, Vec3::Y),
            _ => return false,
        };
        self.object.rotate_world(angle, axis);
        true
    }

    /// Rebuilds the projection for a new window size.
    pub fn reshape(&mut self, viewport: Viewport) {
        self.frustum.set_perspective(FOV_Y_DEGREES, viewport.aspect(), NEAR, FAR);
        self.transform.reshape(&self.frustum);
    }

    /// Records the active mode's draws into `list`.
    pub fn record(&mut self, list: &mut DrawList) -> Result<(), MatrixStackError> {
        let mv = &mut self.transform.model_view;
        mv.push()?;
        mv.mult_matrix(self.camera.camera_matrix());
        mv.mult_frame(&self.object);
        let mvp = self.transform.model_view_projection();
        self.transform.model_view.pop()?;

        let mesh = self.mesh(self.mode);
        if self.mode.is_filled() {
            let state = RasterState { cull_back: false, ..RasterState::default() };
            list.fill(mesh, StockShader::Flat { mvp, color: FILL_COLOR }, state);
            list.stroke(mesh, mvp, WIRE_COLOR, LINE_WIDTH, OUTLINE_DEPTH_OFFSET);
        } else {
            let width = if self.mode == PrimitiveMode::Points { POINT_SIZE } else { LINE_WIDTH };
            list.stroke(mesh, mvp, WIRE_COLOR, width, 0.0);
        }
        Ok(())
    }
}
