//! GPU rendering subsystem.
//!
//! `SceneRenderer` consumes `scene` draw streams and issues GPU commands via wgpu.
//! It owns its GPU resources (pipelines, mesh buffers, textures, uniforms) and
//! creates them lazily on first use.
//!
//! Convention:
//! - CPU geometry is in model space; commands carry the full transform.
//! - Stroke widths are logical pixels, scaled by the window scale factor.

mod ctx;
mod mesh;
mod pipeline;
mod renderer;
mod texture;
mod uniform;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshData;
pub use renderer::SceneRenderer;
pub use texture::{
    mip_level_count, MagFilter, MinFilter, TextureBank, TextureError, TextureImage,
    TextureParams, Wrap,
};
