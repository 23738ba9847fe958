//! Coordinate types shared between the runtime and renderers.
//!
//! Canonical CPU space for window metrics:
//! - Logical pixels (DPI-aware)
//! - Physical pixels are obtained by multiplying with the window scale factor
//!
//! World-space math lives in `math` and uses glam types directly.

mod viewport;

pub use viewport::Viewport;
