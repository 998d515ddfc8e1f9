use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::{
    config::VortexConfig,
    field::NoiseField,
    particle::ParticleStore,
    types::{Trail, Viewport},
};

/// Opacity envelope over a particle's lifetime.
///
/// A triangular ramp: `0` at `t = 0` and `t = m`, `1` at `t = m / 2`.
pub fn fade_in_out(t: f32, m: f32) -> f32 {
    if !(m > 0.0 && t.is_finite() && m.is_finite()) {
        return 0.0;
    }

    let hm = 0.5 * m;
    ((t + hm) % m - hm).abs() / hm
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

pub struct FlowModule {
    pub noise: NoiseField,
    tick: u64,
}

impl FlowModule {
    pub fn new(noise: NoiseField) -> Self {
        Self { noise, tick: 0 }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn reset_tick(&mut self) {
        self.tick = 0;
    }

    pub fn angle(&self, config: &VortexConfig, position: Vec2) -> f32 {
        let tuning = &config.tuning;
        let n = self.noise.sample(
            position.x * tuning.x_scale,
            position.y * tuning.y_scale,
            self.tick as f32 * tuning.z_scale,
        );

        let angle = n * tuning.noise_steps * TAU;
        if angle.is_finite() {
            angle
        } else {
            0.0
        }
    }

    /// Moves every particle one step and records the covered segment into `trails`.
    ///
    /// Particles that leave the viewport or outlive their ttl are respawned in place.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        store: &mut ParticleStore,
        config: &VortexConfig,
        viewport: &Viewport,
        rng: &mut R,
        trails: &mut Vec<Trail>,
    ) {
        self.tick += 1;
        trails.clear();

        let damping = config.tuning.damping;
        for index in 0..store.len() {
            let slot = &mut store.slots_mut()[index];

            let position = slot.position;
            let angle = self.angle(config, position);
            let velocity = Vec2::new(
                lerp(slot.velocity.x, angle.cos(), damping),
                lerp(slot.velocity.y, angle.sin(), damping),
            );
            let next = position + velocity * slot.speed;

            trails.push(Trail {
                from: position,
                to: next,
                width: slot.radius,
                hue: slot.hue,
                alpha: fade_in_out(slot.life, slot.ttl),
            });

            slot.position = next;
            slot.velocity = velocity;
            slot.life += 1.0;

            if !viewport.contains(next) || !(slot.life <= slot.ttl) {
                store.init_slot(index, config, viewport, rng);
            }
        }
    }
}
