use anyhow::{Context, Result};

use orrery_engine::assets::AssetLocator;
use orrery_engine::coords::Viewport;
use orrery_engine::core::{App, AppControl, FrameCtx};
use orrery_engine::input::{InputEvent, Key};
use orrery_engine::paint::Color;
use orrery_engine::render::SceneRenderer;
use orrery_engine::scene::DrawList;
use orrery_engine::window::RuntimeCtx;

use crate::config::EarthConfig;
use crate::scene::EarthScene;

const CLEAR_COLOR: Color = Color::BLACK;

/// Animated earth scene; the runtime redraws continuously.
pub struct EarthApp {
    scene: EarthScene,
    renderer: SceneRenderer,
    draw_list: DrawList,
}

impl EarthApp {
    /// Builds the scene and decodes its textures. Missing textures are not fatal.
    pub fn new(config: &EarthConfig, locator: &AssetLocator) -> Result<Self> {
        let mut renderer = SceneRenderer::new();
        let scene = EarthScene::new(&mut renderer, config).context("floor batch")?;
        scene.load_textures(renderer.textures_mut(), locator, config);
        log::debug!("{} satellites placed", scene.satellites().len());

        Ok(Self { scene, renderer, draw_list: DrawList::new() })
    }

    pub fn scene(&self) -> &EarthScene {
        &self.scene
    }
}

impl App for EarthApp {
    fn on_input(&mut self, event: &InputEvent, _runtime: &mut RuntimeCtx) -> AppControl {
        match event.pressed_key() {
            Some(Key::Escape) => AppControl::Exit,
            Some(key) => {
                if self.scene.move_camera(key) {
                    log::debug!("camera at {:?}", self.scene.camera().origin());
                }
                AppControl::Continue
            }
            None => AppControl::Continue,
        }
    }

    fn on_resize(&mut self, viewport: Viewport) {
        if viewport.is_valid() {
            self.scene.reshape(viewport);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let y_rot = self.scene.y_rotation(ctx.now);

        self.draw_list.clear();
        if let Err(e) = self.scene.record(&mut self.draw_list, y_rot) {
            log::error!("failed to record frame: {e}");
            return AppControl::Exit;
        }

        let renderer = &mut self.renderer;
        let draw_list = &self.draw_list;
        ctx.render(CLEAR_COLOR, |rctx, target| renderer.render(rctx, target, draw_list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn app() -> EarthApp {
        let locator = AssetLocator {
            override_dir: Some(std::env::temp_dir().join("orrery-earth-app-none")),
            exe_dir: None,
        };
        EarthApp::new(&EarthConfig::default(), &locator).unwrap()
    }

    #[test]
    fn starts_without_textures() {
        let app = app();
        assert!(!app.renderer.textures().is_loaded(app.scene().assets().floor_texture));
        assert_eq!(app.renderer.textures().len(), 3);
    }

    #[test]
    fn arrows_drive_camera() {
        let mut app = app();
        let mut runtime = RuntimeCtx::default();
        let control = app.on_input(&InputEvent::key_pressed(Key::ArrowUp), &mut runtime);
        assert_eq!(control, AppControl::Continue);
        assert!(app.scene().camera().origin().abs_diff_eq(Vec3::new(0.0, 0.0, -0.1), 1e-5));
    }

    #[test]
    fn escape_exits() {
        let mut app = app();
        let mut runtime = RuntimeCtx::default();
        let control = app.on_input(&InputEvent::key_pressed(Key::Escape), &mut runtime);
        assert_eq!(control, AppControl::Exit);
    }
}
