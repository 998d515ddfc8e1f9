use glam::Vec3;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct VortexConfig {
    pub particle_count: usize,
    pub range_y: f32,
    pub base_hue: f32,
    pub range_hue: f32,
    pub base_speed: f32,
    pub range_speed: f32,
    pub base_radius: f32,
    pub range_radius: f32,
    pub background_color: Vec3,

    pub tuning: FlowTuning,
    pub glow: Vec<GlowPass>,
}

impl Default for VortexConfig {
    fn default() -> Self {
        Self {
            particle_count: 700,
            range_y: 100.0,
            base_hue: 220.0,
            range_hue: 100.0,
            base_speed: 0.0,
            range_speed: 1.5,
            base_radius: 1.0,
            range_radius: 2.0,
            background_color: Vec3::ZERO,

            tuning: FlowTuning::default(),
            glow: vec![
                GlowPass {
                    blur: 8.0,
                    brightness: 2.0,
                },
                GlowPass {
                    blur: 4.0,
                    brightness: 2.0,
                },
            ],
        }
    }
}

impl VortexConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::InvalidOption {
                name: "particle_count",
                reason: "must be at least 1",
            });
        }

        let ranges = [
            ("range_y", self.range_y),
            ("range_hue", self.range_hue),
            ("range_speed", self.range_speed),
            ("range_radius", self.range_radius),
            ("base_radius", self.base_radius),
            ("base_speed", self.base_speed),
        ];
        for (name, value) in ranges {
            non_negative(name, value)?;
        }
        finite("base_hue", self.base_hue)?;

        let tuning = &self.tuning;
        non_negative("base_ttl", tuning.base_ttl)?;
        non_negative("range_ttl", tuning.range_ttl)?;
        if tuning.base_ttl + tuning.range_ttl <= 0.0 {
            return Err(ConfigError::InvalidOption {
                name: "base_ttl",
                reason: "lifetime must be positive",
            });
        }
        for (name, value) in [
            ("noise_steps", tuning.noise_steps),
            ("x_scale", tuning.x_scale),
            ("y_scale", tuning.y_scale),
            ("z_scale", tuning.z_scale),
        ] {
            finite(name, value)?;
        }
        if !(0.0..=1.0).contains(&tuning.damping) {
            return Err(ConfigError::InvalidOption {
                name: "damping",
                reason: "must be within [0, 1]",
            });
        }

        for pass in &self.glow {
            non_negative("glow.blur", pass.blur)?;
            non_negative("glow.brightness", pass.brightness)?;
        }

        Ok(())
    }
}

/// Hand-tuned constants shaping the look of the flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowTuning {
    pub base_ttl: f32,
    pub range_ttl: f32,
    pub noise_steps: f32,
    pub x_scale: f32,
    pub y_scale: f32,
    pub z_scale: f32,
    /// Velocity blend toward the field direction, `0` keeps the old velocity
    pub damping: f32,
}

impl Default for FlowTuning {
    fn default() -> Self {
        Self {
            base_ttl: 50.0,
            range_ttl: 150.0,
            noise_steps: 3.0,
            x_scale: 0.00125,
            y_scale: 0.00125,
            z_scale: 0.0005,
            damping: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowPass {
    pub blur: f32,
    pub brightness: f32,
}

/// Parses `#rgb` or `#rrggbb` into a color with channels in `[0, 1]`.
pub fn parse_color(value: &str) -> Result<Vec3, ConfigError> {
    let invalid = || ConfigError::InvalidColor(value.to_string());

    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }

    let channels = match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (channel, digit) in channels.iter_mut().zip(hex.chars()) {
                let v = digit.to_digit(16).ok_or_else(invalid)? as u8;
                *channel = v * 17;
            }
            channels
        }
        6 => {
            let mut channels = [0u8; 3];
            for (i, channel) in channels.iter_mut().enumerate() {
                *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
            }
            channels
        }
        _ => return Err(invalid()),
    };

    Ok(Vec3::new(
        channels[0] as f32 / 255.0,
        channels[1] as f32 / 255.0,
        channels[2] as f32 / 255.0,
    ))
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigError::InvalidOption {
            name,
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidOption {
            name,
            reason: "must be finite",
        });
    }
    Ok(())
}
