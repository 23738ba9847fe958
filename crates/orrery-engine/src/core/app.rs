use crate::coords::Viewport;
use crate::input::InputEvent;
use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the demos.
///
/// The runtime calls these hooks serially on the main thread.
pub trait App {
    /// Called for every translated keyboard event.
    ///
    /// Use `runtime` to change the title or request a redraw.
    fn on_input(&mut self, event: &InputEvent, runtime: &mut RuntimeCtx) -> AppControl {
        let _ = (event, runtime);
        AppControl::Continue
    }

    /// Called once the window exists and again after every resize, with the
    /// logical drawable size.
    fn on_resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
