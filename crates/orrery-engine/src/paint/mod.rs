//! Color model shared between scene recording and renderers.
//!
//! Colors are straight-alpha RGBA in `[0, 1]`, matching the blend setup used by
//! the stock shaders.

pub mod color;

pub use color::Color;
