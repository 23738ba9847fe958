use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{logical_viewport, App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;

/// When the runtime asks the window for a new frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RedrawMode {
    /// Only after input that requested it, resizes and exposure.
    #[default]
    OnDemand,
    /// Every time the event loop goes idle (animation).
    Continuous,
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub redraw: RedrawMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "orrery".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            redraw: RedrawMode::OnDemand,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    pub fn request_redraw(&mut self) {
        self.commands.push(Command::RequestRedraw);
    }

    /// Title set by the most recent `set_title` still pending.
    pub fn pending_title(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::SetTitle(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn redraw_requested(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, Command::RequestRedraw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    SetTitle(String),
    RequestRedraw,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    ///
    /// Window or GPU initialization failures end the loop and are returned.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    init_error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            init_error: None,
            exit_requested: false,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn apply_commands(window: &Window, ctx: RuntimeCtx) {
        for cmd in ctx.commands {
            match cmd {
                Command::SetTitle(title) => {
                    log::debug!("window title: {title}");
                    window.set_title(&title);
                }
                Command::RequestRedraw => window.request_redraw(),
            }
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                let viewport = entry.with_window(|w| logical_viewport(w));
                log::info!(
                    "window '{}' opened ({}x{} logical)",
                    self.config.title,
                    viewport.width,
                    viewport.height
                );
                self.app.on_resize(viewport);
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.init_error = Some(e);
                self.request_exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if self.config.redraw == RedrawMode::Continuous {
            if let Some(entry) = &self.entry {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else { return };

        let mut exit = false;

        if let Some(ev) = translate_window_event(&event) {
            let mut runtime_ctx = RuntimeCtx::default();
            exit |= app.on_input(&ev, &mut runtime_ctx) == AppControl::Exit;
            entry.with_window(|w| Self::apply_commands(w, runtime_ctx));
        }

        match &event {
            WindowEvent::CloseRequested => exit = true,

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                let viewport = entry.with_window(|w| logical_viewport(w));
                app.on_resize(viewport);
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                let viewport = entry.with_window(|w| logical_viewport(w));
                app.on_resize(viewport);
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                entry.with_mut(|fields| {
                    let mut runtime_ctx = RuntimeCtx::default();

                    // Scope so `ctx` is dropped before commands are applied.
                    let control = {
                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                id: fields.window.id(),
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                            now: Instant::now(),
                            runtime: &mut runtime_ctx,
                        };
                        app.on_frame(&mut ctx)
                    };

                    exit |= control == AppControl::Exit;
                    Self::apply_commands(fields.window, runtime_ctx);
                });
            }

            _ => {}
        }

        if exit {
            log::info!("exiting");
            self.request_exit(event_loop);
        }
    }
}
