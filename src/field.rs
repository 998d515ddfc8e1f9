use noise::{NoiseFn, OpenSimplex};

pub struct NoiseField {
    noise: OpenSimplex,
    seed: u32,
}

impl NoiseField {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples the field, returning a value in `[-1, 1]`.
    ///
    /// Non-finite inputs yield `0`.
    pub fn sample(&self, x: f32, y: f32, t: f32) -> f32 {
        if !(x.is_finite() && y.is_finite() && t.is_finite()) {
            return 0.0;
        }

        let value = self.noise.get([x as f64, y as f64, t as f64]) as f32;
        if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new()
    }
}
