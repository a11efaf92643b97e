use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorIcon, Window, WindowId};

use crate::core::{App, AppControl, Cursor, FrameDriver};
use crate::paint::Color;
use crate::raster::Canvas;
use crate::render::{GpuInit, Presenter, SurfaceErrorAction};

use super::translate::translate_window_event;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Shown wherever the canvas is transparent.
    pub background: Color,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            background: Color::WHITE,
        }
    }
}

/// Entry point: opens one window and drives `app` until it exits or the
/// window closes.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, driver: FrameDriver, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::new(config, gpu_init, driver, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
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
    presenter: Presenter<'this>,
}

struct RuntimeState<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    driver: FrameDriver,
    app: A,

    entry: Option<WindowEntry>,
    canvas: Canvas,
    cursor: Option<Cursor>,
    failure: Option<anyhow::Error>,
}

impl<A: App + 'static> RuntimeState<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, driver: FrameDriver, app: A) -> Self {
        Self {
            config,
            gpu_init,
            driver,
            app,
            entry: None,
            canvas: Canvas::new(0, 0),
            cursor: None,
            failure: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let size = window.inner_size();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            window,
            presenter_builder: |w| {
                pollster::block_on(Presenter::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()?;

        self.canvas.resize(size.width, size.height);
        self.entry = Some(entry);
        log::info!("window opened at {}x{}", size.width, size.height);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let control = match self.driver.tick(&mut self.canvas, &mut self.app) {
            Ok(control) => control,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let (canvas, background) = (&self.canvas, self.config.background);
        entry.with_window(|w| w.pre_present_notify());
        let presented = entry.with_presenter_mut(|p| match p.present(canvas, background) {
            Ok(()) => SurfaceErrorAction::Reconfigured,
            Err(e) => {
                log::warn!("surface error: {e}");
                p.handle_surface_error(e)
            }
        });

        if presented == SurfaceErrorAction::Fatal {
            self.fail(event_loop, anyhow::anyhow!("surface is unrecoverable"));
            return;
        }

        let cursor = self.driver.cursor();
        if self.cursor != Some(cursor) {
            self.cursor = Some(cursor);
            entry.with_window(|w| w.set_cursor(cursor_icon(cursor)));
        }

        if control == AppControl::Exit {
            log::info!("application requested exit");
            event_loop.exit();
        }
    }

    fn resize(&mut self) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        let size = entry.with_window(|w| w.inner_size());
        entry.with_presenter_mut(|p| p.resize(size));
        self.canvas.resize(size.width, size.height);
        entry.with_window(|w| w.request_redraw());
    }
}

impl<A: App + 'static> ApplicationHandler for RuntimeState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the swapchain present mode paces frames.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(input) = translate_window_event(&event) {
            self.driver.handle_event(&input);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.entry = None;
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.resize(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

fn cursor_icon(cursor: Cursor) -> CursorIcon {
    match cursor {
        Cursor::Default => CursorIcon::Default,
        Cursor::Pointer => CursorIcon::Pointer,
        Cursor::Text => CursorIcon::Text,
        Cursor::Crosshair => CursorIcon::Crosshair,
        Cursor::Move => CursorIcon::Move,
        Cursor::Grab => CursorIcon::Grab,
        Cursor::Grabbing => CursorIcon::Grabbing,
        Cursor::NotAllowed => CursorIcon::NotAllowed,
        Cursor::Wait => CursorIcon::Wait,
        Cursor::Help => CursorIcon::Help,
    }
}
