use log::{debug, error, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    canvas::Canvas,
    config::VortexConfig,
    error::{EngineError, HostError, Result},
    field::NoiseField,
    flow::FlowModule,
    particle::ParticleStore,
    render::RenderModule,
    types::{Trail, Viewport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The environment a [`VortexEngine`] animates into.
///
/// The host owns the real surface and the display refresh mechanism. It calls
/// [`VortexEngine::on_frame`] once for every request it honours and forwards
/// resize events to [`VortexEngine::resize`] while a listener is registered.
pub trait Host {
    fn viewport(&self) -> Viewport;

    fn has_surface(&self) -> bool;

    fn present(&mut self, frame: &Canvas) -> std::result::Result<(), HostError>;

    fn request_frame(&mut self) -> FrameRequest;

    fn cancel_frame(&mut self, request: FrameRequest);

    fn add_resize_listener(&mut self) -> ListenerId;

    fn remove_resize_listener(&mut self, listener: ListenerId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Running,
    Stopped,
}

pub struct VortexEngine {
    config: VortexConfig,
    state: EngineState,
    viewport: Viewport,

    store: ParticleStore,
    flow: FlowModule,
    render: RenderModule,
    trails: Vec<Trail>,
    rng: StdRng,

    pending_frame: Option<FrameRequest>,
    resize_listener: Option<ListenerId>,
}

impl VortexEngine {
    pub fn new(config: VortexConfig) -> Result<Self> {
        Self::build(config, NoiseField::new(), StdRng::from_entropy())
    }

    pub fn seeded(config: VortexConfig, seed: u64) -> Result<Self> {
        Self::build(
            config,
            NoiseField::with_seed(seed as u32),
            StdRng::seed_from_u64(seed),
        )
    }

    fn build(config: VortexConfig, noise: NoiseField, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let particle_count = config.particle_count;
        Ok(Self {
            state: EngineState::Uninitialized,
            viewport: Viewport::default(),

            store: ParticleStore::new(particle_count),
            flow: FlowModule::new(noise),
            render: RenderModule::default(),
            trails: Vec::with_capacity(particle_count),
            rng,

            pending_frame: None,
            resize_listener: None,

            config,
        })
    }

    pub fn config(&self) -> &VortexConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn tick(&self) -> u64 {
        self.flow.tick()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn visible(&self) -> &Canvas {
        self.render.visible()
    }

    pub fn noise_seed(&self) -> u32 {
        self.flow.noise.seed()
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending_frame
    }

    /// Starts animating into `host`.
    ///
    /// Without a drawable surface the engine stays inert and uninitialized.
    pub fn mount<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        match self.state {
            EngineState::Uninitialized => {}
            EngineState::Running => return Err(EngineError::AlreadyMounted),
            EngineState::Stopped => return Err(EngineError::Stopped),
        }

        if !host.has_surface() {
            warn!("No drawable surface available, vortex stays inert");
            return Err(EngineError::SurfaceUnavailable);
        }

        self.viewport = host.viewport();
        self.render.update_size(&self.viewport);
        self.reset();

        self.resize_listener = Some(host.add_resize_listener());
        self.pending_frame = Some(host.request_frame());
        self.state = EngineState::Running;

        info!(
            "Vortex mounted: {} particles, {}x{}, noise seed {}",
            self.store.len(),
            self.viewport.width,
            self.viewport.height,
            self.noise_seed()
        );
        Ok(())
    }

    /// Runs one simulation tick and one draw, then schedules the next frame.
    ///
    /// Requests that are not the pending one are ignored.
    pub fn on_frame<H: Host + ?Sized>(&mut self, host: &mut H, request: FrameRequest) {
        if self.state != EngineState::Running || self.pending_frame != Some(request) {
            return;
        }
        self.pending_frame = None;

        self.step();

        if let Err(err) = host.present(self.render.visible()) {
            error!("Failed to present vortex frame: {err}");
            self.release(host);
            return;
        }

        self.pending_frame = Some(host.request_frame());
    }

    pub fn step(&mut self) {
        self.flow.step(
            &mut self.store,
            &self.config,
            &self.viewport,
            &mut self.rng,
            &mut self.trails,
        );
        self.render.draw(&self.config, &self.viewport, &self.trails);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        debug!("Vortex resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    pub fn reset(&mut self) {
        self.store
            .init_all(&self.config, &self.viewport, &mut self.rng);
        self.flow.reset_tick();
        info!("Vortex particles reset");
    }

    /// Stops animating and releases everything registered with the host.
    ///
    /// Calling this more than once has no further effect.
    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) {
        match self.state {
            EngineState::Stopped => return,
            EngineState::Uninitialized => {
                self.state = EngineState::Stopped;
                return;
            }
            EngineState::Running => {}
        }

        self.release(host);
        info!("Vortex unmounted after {} ticks", self.flow.tick());
    }

    fn release<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(request) = self.pending_frame.take() {
            host.cancel_frame(request);
        }
        if let Some(listener) = self.resize_listener.take() {
            host.remove_resize_listener(listener);
        }
        self.state = EngineState::Stopped;
    }
}
