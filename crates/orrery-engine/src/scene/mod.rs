//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands with their shader uniforms
//! - keep recording order, which is also paint order
//! - hand out opaque mesh/texture handles owned by the renderer

mod cmd;
mod handle;
mod list;

pub use cmd::{BlendMode, DrawCmd, FillCmd, RasterState, StockShader, StrokeCmd, Winding};
pub use handle::{MeshId, TextureId};
pub use list::{DrawItem, DrawList};
