use anyhow::{Context, Result};

use orrery_engine::coords::Viewport;
use orrery_engine::core::{App, AppControl, FrameCtx};
use orrery_engine::input::{InputEvent, Key};
use orrery_engine::paint::Color;
use orrery_engine::render::SceneRenderer;
use orrery_engine::scene::DrawList;
use orrery_engine::window::RuntimeCtx;

use crate::scene::PrimitiveScene;

const CLEAR_COLOR: Color = Color::WHITE;

/// Primitive demo: redraws only after input or a resize.
pub struct PrimitivesApp {
    scene: PrimitiveScene,
    renderer: SceneRenderer,
    draw_list: DrawList,
}

impl PrimitivesApp {
    pub fn new() -> Result<Self> {
        let mut renderer = SceneRenderer::new();
        let scene = PrimitiveScene::new(&mut renderer).context("primitive batches")?;
        Ok(Self { scene, renderer, draw_list: DrawList::new() })
    }

    pub fn scene(&self) -> &PrimitiveScene {
        &self.scene
    }
}

impl App for PrimitivesApp {
    fn on_input(&mut self, event: &InputEvent, runtime: &mut RuntimeCtx) -> AppControl {
        let Some(key) = event.pressed_key() else {
            return AppControl::Continue;
        };

        match key {
            Key::Escape => return AppControl::Exit,
            Key::Space => {
                let mode = self.scene.advance_mode();
                runtime.set_title(mode.title());
                runtime.request_redraw();
            }
            _ => {
                if self.scene.rotate_object(key) {
                    log::debug!("object forward {:?}", self.scene.object().forward());
                    runtime.request_redraw();
                }
            }
        }
        AppControl::Continue
    }

    fn on_resize(&mut self, viewport: Viewport) {
        if viewport.is_valid() {
            self.scene.reshape(viewport);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.draw_list.clear();
        if let Err(e) = self.scene.record(&mut self.draw_list) {
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
    use crate::mode::PrimitiveMode;
    use orrery_engine::input::KeyState;

    fn press(app: &mut PrimitivesApp, key: Key) -> (AppControl, RuntimeCtx) {
        let mut runtime = RuntimeCtx::default();
        let control = app.on_input(&InputEvent::key_pressed(key), &mut runtime);
        (control, runtime)
    }

    #[test]
    fn space_sets_title_of_next_mode() {
        let mut app = PrimitivesApp::new().unwrap();
        for expected in PrimitiveMode::ALL.iter().cycle().skip(1).take(8) {
            let (control, runtime) = press(&mut app, Key::Space);
            assert_eq!(control, AppControl::Continue);
            assert_eq!(runtime.pending_title(), Some(expected.title()));
            assert!(runtime.redraw_requested());
        }
    }

    #[test]
    fn arrows_request_redraw_without_title_change() {
        let mut app = PrimitivesApp::new().unwrap();
        let (_, runtime) = press(&mut app, Key::ArrowLeft);
        assert!(runtime.redraw_requested());
        assert_eq!(runtime.pending_title(), None);
        assert_eq!(app.scene().mode(), PrimitiveMode::Points);
    }

    #[test]
    fn escape_exits() {
        let mut app = PrimitivesApp::new().unwrap();
        assert_eq!(press(&mut app, Key::Escape).0, AppControl::Exit);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = PrimitivesApp::new().unwrap();
        let mut runtime = RuntimeCtx::default();
        let release = InputEvent::Key { key: Key::Space, state: KeyState::Released };
        app.on_input(&release, &mut runtime);
        assert_eq!(app.scene().mode(), PrimitiveMode::Points);
        assert!(!runtime.redraw_requested());
    }
}
