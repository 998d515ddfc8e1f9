//! A noise-driven particle flow used as an animated background.
//!
//! A [`VortexEngine`] owns a fixed pool of particles that drift through a 3D
//! noise field, leaving glowing trails. It draws into CPU [`Canvas`] surfaces
//! and relies on a [`Host`] for presentation, frame timing and resize events.

pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod flow;
pub mod particle;
pub mod render;
pub mod types;

pub use canvas::Canvas;
pub use config::{parse_color, FlowTuning, GlowPass, VortexConfig};
pub use engine::{EngineState, FrameRequest, Host, ListenerId, VortexEngine};
pub use error::{ConfigError, EngineError, HostError};
pub use field::NoiseField;
pub use flow::fade_in_out;
pub use particle::{Particle, ParticleStore, PARTICLE_FIELDS};
pub use types::{Trail, Viewport};
