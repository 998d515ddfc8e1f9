use bytemuck::Zeroable;
use glam::Vec2;
use rand::Rng;

use crate::{config::VortexConfig, types::Viewport};

/// Number of `f32` fields in a single particle record.
pub const PARTICLE_FIELDS: usize = 9;

#[repr(C)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub ttl: f32,
    pub speed: f32,
    pub radius: f32,
    pub hue: f32,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(config: &VortexConfig, viewport: &Viewport, rng: &mut R) -> Self {
        let extent = viewport.extent();
        let tuning = &config.tuning;

        let y = viewport.center.y + uniform_signed(rng, config.range_y);

        Self {
            position: Vec2::new(uniform(rng, extent.x), y.clamp(0.0, extent.y)),
            velocity: Vec2::ZERO,
            life: 0.0,
            ttl: tuning.base_ttl + uniform(rng, tuning.range_ttl),
            speed: config.base_speed + uniform(rng, config.range_speed),
            radius: config.base_radius + uniform(rng, config.range_radius),
            hue: config.base_hue + uniform(rng, config.range_hue),
        }
    }
}

pub struct ParticleStore {
    particles: Box<[Particle]>,
}

impl ParticleStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::zeroed(); capacity].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The pool as one flat buffer, `PARTICLE_FIELDS` values per slot in the order
    /// x, y, vx, vy, life, ttl, speed, radius, hue.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.particles)
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Respawns a single slot; no other slot is read or written.
    pub fn init_slot<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        config: &VortexConfig,
        viewport: &Viewport,
        rng: &mut R,
    ) {
        if let Some(slot) = self.particles.get_mut(index) {
            *slot = Particle::spawn(config, viewport, rng);
        }
    }

    pub fn init_all<R: Rng + ?Sized>(&mut self, config: &VortexConfig, viewport: &Viewport, rng: &mut R) {
        for slot in self.particles.iter_mut() {
            *slot = Particle::spawn(config, viewport, rng);
        }
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, n: f32) -> f32 {
    n * rng.gen::<f32>()
}

fn uniform_signed<R: Rng + ?Sized>(rng: &mut R, n: f32) -> f32 {
    n - uniform(rng, 2.0 * n)
}
