//! Transform math: reference frames, matrix stacks and projection setup.
//!
//! Conventions:
//! - right-handed world space, +Y up
//! - angles passed to `MatrixStack` are degrees, angles passed to `Frame` are radians
//! - projections map depth to `[0, 1]` (wgpu clip space)

mod frame;
mod frustum;
mod matrix_stack;
mod transform;

pub use frame::Frame;
pub use frustum::Frustum;
pub use matrix_stack::{MatrixStack, MatrixStackError, DEFAULT_STACK_DEPTH};
pub use transform::GeometryTransform;
