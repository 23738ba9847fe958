//! Orrery engine crate.
//!
//! Window/GPU runtime, fixed-function style geometry and matrix helpers, and
//! the stock-shader renderer shared by the orrery demos.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod assets;
pub mod logging;
pub mod coords;
pub mod geometry;
pub mod math;
pub mod render;
pub mod paint;
pub mod scene;
