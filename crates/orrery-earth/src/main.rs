//! Textured earth and moon over a reflective, translucent floor.
//!
//! Up/Down move the camera, Left/Right turn it, Escape quits. Textures
//! (`water.bmp`, `earth.bmp`, `moonlike.tga`) are looked up in
//! `$ORRERY_ASSETS`, next to the executable, then in the current directory.

mod app;
mod config;
mod scene;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use orrery_engine::assets::AssetLocator;
use orrery_engine::device::GpuInit;
use orrery_engine::logging::{init_logging, LoggingConfig};
use orrery_engine::window::{RedrawMode, Runtime, RuntimeConfig};

use crate::app::EarthApp;
use crate::config::EarthConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = EarthConfig::default();
    let locator = AssetLocator::from_env();
    let app = EarthApp::new(&config, &locator).context("failed to build earth scene")?;

    let runtime_config = RuntimeConfig {
        title: "GL_Earth".to_string(),
        initial_size: LogicalSize::new(1200.0, 800.0),
        redraw: RedrawMode::Continuous,
    };

    log::info!("arrows: move/turn camera, escape: quit");
    Runtime::run(runtime_config, GpuInit::default(), app)
}
