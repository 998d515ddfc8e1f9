mod cli;
mod framepace;
mod gpu;
mod gui;
mod host;
mod present;

use std::sync::Arc;

use clap::Parser;
use glam::Vec2;
use host::{GfxState, WindowHost};
use log::{error, info};
use vortex::{EngineState, Host, Viewport, VortexEngine};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{gpu::GpuContext, gui::OverlayStats};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();
    let config = args.config();
    let engine = match args.seed {
        Some(seed) => VortexEngine::seeded(config, seed)?,
        None => VortexEngine::new(config)?,
    };

    // Setup Winit
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App {
        tokio_rt: tokio::runtime::Runtime::new()?,
        engine,
        host: None,

        mouse_position: Vec2::ZERO,
        window_size: PhysicalSize::new(args.width, args.height),
        framerate: args.framerate,
    };

    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App<'a> {
    tokio_rt: tokio::runtime::Runtime,
    engine: VortexEngine,
    host: Option<WindowHost<'a>>,

    mouse_position: Vec2,
    window_size: PhysicalSize<u32>,
    framerate: Option<u32>,
}

impl<'a> App<'a> {
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(host) = &mut self.host else {
            return;
        };

        host.framepace.begin_frame();
        let stats = (self.engine.state() == EngineState::Running).then(|| OverlayStats {
            particles: self.engine.particles().len(),
            tick: self.engine.tick(),
            framerate: host.framepace.framerate(),
        });
        host.stats = stats;

        match host.take_pending_frame() {
            Some(request) => self.engine.on_frame(host, request),
            None if host.has_surface() => {
                if let Err(err) = host.render(None) {
                    error!("Failed to draw overlay: {err}");
                }
            }
            None => (),
        }

        if std::mem::take(&mut host.actions.dive_in) {
            info!("Diving in, closing the vortex");
            self.engine.unmount(host);
            event_loop.exit();
            return;
        }

        host.framepace.end_frame(self.framerate);
    }
}

impl<'a> ApplicationHandler for App<'a> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Vortex")
            .with_inner_size(self.window_size);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        let window_size = window.inner_size();

        let gfx = match self.tokio_rt.block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => Some(GfxState::new(gpu, window_size.width, window_size.height)),
            Err(err) => {
                error!("Failed to initialize graphics: {err:#}");
                None
            }
        };

        let mut host = WindowHost::new(window, gfx);
        if let Err(err) = self.engine.mount(&mut host) {
            error!("Vortex is inactive: {err}");
        }
        self.host = Some(host);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(host) = &mut self.host else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.engine.unmount(host);
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                host.resize(new_size.width, new_size.height);
                if host.is_listening() {
                    self.engine
                        .resize(Viewport::new(new_size.width, new_size.height));
                }
                host.window.request_redraw();
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::KeyboardInput { event, .. } => {
                match (event.state, event.physical_key, event.repeat) {
                    (ElementState::Pressed, PhysicalKey::Code(KeyCode::Escape), _) => {
                        self.engine.unmount(host);
                        event_loop.exit();
                    }
                    (ElementState::Pressed, PhysicalKey::Code(KeyCode::KeyR), false) => {
                        self.engine.reset();
                    }
                    _ => (),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(gfx) = &mut host.gfx {
                    gfx.egui.mouse_event(self.mouse_position, state, button);
                }
                host.window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                if let Some(gfx) = &mut host.gfx {
                    gfx.egui.mouse_motion(position);
                }
                self.mouse_position = position;
                host.window.request_redraw();
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(gfx) = &mut host.gfx {
                    gfx.egui.mouse_left();
                }
            }

            _ => (),
        }
    }
}
