use clap::Parser;
use glam::Vec3;
use vortex::{parse_color, VortexConfig};

/// An animated flow-field particle background
#[derive(Parser)]
#[command()]
pub struct Args {
    /// Number of particles, fixed for the whole run
    #[arg(short, long, default_value_t = 700)]
    pub particles: usize,

    /// Vertical spawn spread around the center line
    #[arg(long, default_value_t = 100.0)]
    pub range_y: f32,

    /// Hue in degrees, the landing page uses green
    #[arg(long, default_value_t = 100.0)]
    pub base_hue: f32,

    #[arg(long, default_value_t = 100.0)]
    pub range_hue: f32,

    #[arg(long, default_value_t = 0.0)]
    pub base_speed: f32,

    #[arg(long, default_value_t = 1.5)]
    pub range_speed: f32,

    #[arg(long, default_value_t = 1.0)]
    pub base_radius: f32,

    #[arg(long, default_value_t = 2.0)]
    pub range_radius: f32,

    /// Background color as `#rgb` or `#rrggbb`
    #[arg(short, long, default_value = "#000000", value_parser = parse_color)]
    pub background: Vec3,

    /// The framerate the animation is capped at
    ///
    /// if omitted the animation runs as fast as the display allows
    #[arg(short, long)]
    pub framerate: Option<u32>,

    /// Seed for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Initial window width
    #[arg(long, default_value_t = 960)]
    pub width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

impl Args {
    pub fn config(&self) -> VortexConfig {
        VortexConfig {
            particle_count: self.particles,
            range_y: self.range_y,
            base_hue: self.base_hue,
            range_hue: self.range_hue,
            base_speed: self.base_speed,
            range_speed: self.range_speed,
            base_radius: self.base_radius,
            range_radius: self.range_radius,
            background_color: self.background,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_landing_page() {
        let args = Args::parse_from(["vortex"]);
        let config = args.config();

        assert_eq!(config.base_hue, 100.0);
        assert_eq!(config.particle_count, 700);
        assert_eq!(config.background_color, Vec3::ZERO);
        assert_eq!(VortexConfig::default().base_hue, 220.0);
    }

    #[test]
    fn options_map_onto_the_config() {
        let args = Args::parse_from(["vortex", "-p", "12", "--base-hue", "300", "-b", "#fff"]);
        let config = args.config();

        assert_eq!(config.particle_count, 12);
        assert_eq!(config.base_hue, 300.0);
        assert_eq!(config.background_color, Vec3::ONE);
    }
}
