use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use log::warn;
use vortex::{Canvas, FrameRequest, Host, HostError, ListenerId, Viewport};
use winit::window::Window;

use crate::{
    framepace::Framepacer,
    gpu::GpuContext,
    gui::{self, EguiIntegration, OverlayActions, OverlayStats},
    present::PresentModule,
};

const FADE_IN: Duration = Duration::from_millis(300);

/// Opacity of the vortex `elapsed` after its first frame was shown.
pub fn fade_in(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / FADE_IN.as_secs_f32()).min(1.0)
}

pub struct GfxState<'a> {
    pub gpu: GpuContext<'a>,
    pub present: PresentModule,
    pub egui: EguiIntegration,
}

impl<'a> GfxState<'a> {
    pub fn new(gpu: GpuContext<'a>, width: u32, height: u32) -> Self {
        let surface_format = gpu.surface_format();
        let present = PresentModule::new(&gpu.device, surface_format, width, height);
        let mut egui = EguiIntegration::new(&gpu.device, surface_format);
        egui.resize(width, height);

        Self { gpu, present, egui }
    }
}

pub struct WindowHost<'a> {
    pub window: Arc<Window>,
    pub gfx: Option<GfxState<'a>>,
    pub framepace: Framepacer,

    pub stats: Option<OverlayStats>,
    pub actions: OverlayActions,

    first_frame: Option<Instant>,
    next_id: u64,
    pending_frame: Option<FrameRequest>,
    resize_listener: Option<ListenerId>,
}

impl<'a> WindowHost<'a> {
    pub fn new(window: Arc<Window>, gfx: Option<GfxState<'a>>) -> Self {
        Self {
            window,
            gfx,
            framepace: Framepacer::new(),

            stats: None,
            actions: OverlayActions::default(),

            first_frame: None,
            next_id: 0,
            pending_frame: None,
            resize_listener: None,
        }
    }

    pub fn take_pending_frame(&mut self) -> Option<FrameRequest> {
        self.pending_frame.take()
    }

    pub fn is_listening(&self) -> bool {
        self.resize_listener.is_some()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(gfx) = &mut self.gfx {
            gfx.gpu.resize(width, height);
            gfx.egui.resize(width, height);
        }
    }

    /// Draws `frame` (or just the background) with the overlay on top.
    pub fn render(&mut self, frame: Option<&Canvas>) -> Result<(), HostError> {
        let Some(gfx) = self.gfx.as_mut() else {
            return Err(HostError::SurfaceLost);
        };

        let surface_texture = match gfx.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.gpu.reconfigure_surface();
                gfx.gpu
                    .surface
                    .get_current_texture()
                    .map_err(|err| HostError::Present(err.to_string()))?
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring the surface, skipping frame");
                return Ok(());
            }
            Err(err) => return Err(HostError::Present(err.to_string())),
        };

        let uploaded =
            frame.is_some_and(|frame| gfx.present.upload(&gfx.gpu.device, &gfx.gpu.queue, frame));
        let frame_opacity = uploaded.then(|| {
            let shown = *self.first_frame.get_or_insert_with(Instant::now);
            fade_in(shown.elapsed())
        });

        let stats = self.stats.as_ref();
        let mut actions = OverlayActions::default();
        gfx.egui.run(|ctx| actions = gui::landing(ctx, stats));
        self.actions.dive_in |= actions.dive_in;

        let mut encoder = gfx
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        gfx.egui.pre_render(
            &gfx.gpu.device,
            &gfx.gpu.queue,
            &mut encoder,
            self.framepace.frametime(),
        );

        {
            let view = surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());

            let mut rpass = gfx.present.begin_pass(&mut encoder, &view, frame_opacity);
            gfx.egui.render(&mut rpass);
        }

        gfx.gpu.queue.submit(Some(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}

impl<'a> Host for WindowHost<'a> {
    fn viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::new(size.width, size.height)
    }

    fn has_surface(&self) -> bool {
        self.gfx.is_some()
    }

    fn present(&mut self, frame: &Canvas) -> Result<(), HostError> {
        self.render(Some(frame))
    }

    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending_frame = Some(request);
        self.window.request_redraw();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending_frame == Some(request) {
            self.pending_frame = None;
        }
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        self.next_id += 1;
        let listener = ListenerId(self.next_id);
        self.resize_listener = Some(listener);
        listener
    }

    fn remove_resize_listener(&mut self, listener: ListenerId) {
        if self.resize_listener == Some(listener) {
            self.resize_listener = None;
        }
    }
}
