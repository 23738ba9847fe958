//! Primitive drawing modes demo.
//!
//! Space cycles points, lines, line strip, line loop, triangles, triangle fan
//! and triangle strip. Arrow keys turn the object, Escape quits.

mod app;
mod mode;
mod scene;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use orrery_engine::device::GpuInit;
use orrery_engine::logging::{init_logging, LoggingConfig};
use orrery_engine::window::{RedrawMode, Runtime, RuntimeConfig};

use crate::app::PrimitivesApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let app = PrimitivesApp::new().context("failed to build primitive demo")?;
    let config = RuntimeConfig {
        title: app.scene().mode().title().to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
        redraw: RedrawMode::OnDemand,
    };

    log::info!("space: next primitive, arrows: rotate, escape: quit");
    Runtime::run(config, GpuInit::default(), app)
}
