use glam::{Mat4, Vec3};

use crate::paint::Color;

use super::{MeshId, TextureId};

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new variant here (or a new [`StockShader`])
/// - add a push helper on `DrawList`
/// - handle it in `render::SceneRenderer`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Filled triangles of a mesh.
    Fill(FillCmd),
    /// Screen-space sized points, wide lines or triangle outlines of a mesh.
    Stroke(StrokeCmd),
}

/// Stock shader programs and their uniforms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StockShader {
    /// Single color, no lighting.
    Flat { mvp: Mat4, color: Color },
    /// Texture sample multiplied by a color.
    TextureModulate { mvp: Mat4, color: Color, texture: TextureId },
    /// Texture modulated by diffuse lighting from a point light.
    ///
    /// `light_position` is in eye space.
    TexturePointLightDiffuse {
        model_view: Mat4,
        projection: Mat4,
        light_position: Vec3,
        color: Color,
        texture: TextureId,
    },
}

impl StockShader {
    /// Texture sampled by the shader, if any.
    pub fn texture(&self) -> Option<TextureId> {
        match self {
            Self::Flat { .. } => None,
            Self::TextureModulate { texture, .. }
            | Self::TexturePointLightDiffuse { texture, .. } => Some(*texture),
        }
    }
}

/// Triangle winding treated as front-facing.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Winding {
    #[default]
    Ccw,
    Cw,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BlendMode {
    #[default]
    Opaque,
    /// `src_alpha / one_minus_src_alpha`.
    Alpha,
}

/// Fixed-function state for a fill draw. Depth testing is always on.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct RasterState {
    pub front_face: Winding,
    pub cull_back: bool,
    pub blend: BlendMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillCmd {
    pub mesh: MeshId,
    pub shader: StockShader,
    pub state: RasterState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCmd {
    pub mesh: MeshId,
    pub mvp: Mat4,
    pub color: Color,
    /// Width in logical pixels; points are drawn as squares of this size.
    pub width: f32,
    /// Depth pulled toward the viewer, in NDC units.
    pub depth_offset: f32,
}
