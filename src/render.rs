use glam::Vec3;

use crate::{
    canvas::{hsl_to_rgb, Canvas},
    config::VortexConfig,
    types::{Trail, Viewport},
};

const TRAIL_SATURATION: f32 = 1.0;
const TRAIL_LIGHTNESS: f32 = 0.6;

/// Draws trails onto a working surface, adds the glow passes and
/// composites the result onto the visible surface.
#[derive(Default)]
pub struct RenderModule {
    working: Canvas,
    visible: Canvas,
}

impl RenderModule {
    pub fn new(viewport: &Viewport) -> Self {
        let mut module = Self::default();
        module.update_size(viewport);
        module
    }

    pub fn update_size(&mut self, viewport: &Viewport) {
        for canvas in [&mut self.working, &mut self.visible] {
            canvas.resize(viewport.width, viewport.height);
        }
    }

    pub fn visible(&self) -> &Canvas {
        &self.visible
    }

    pub fn working(&self) -> &Canvas {
        &self.working
    }

    pub fn draw(&mut self, config: &VortexConfig, viewport: &Viewport, trails: &[Trail]) {
        self.update_size(viewport);

        self.draw_trails(config.background_color, trails);
        self.draw_glow(config);
        self.composite();
    }

    fn draw_trails(&mut self, background: Vec3, trails: &[Trail]) {
        self.working.fill(background);

        for trail in trails {
            let color = hsl_to_rgb(trail.hue, TRAIL_SATURATION, TRAIL_LIGHTNESS);
            self.working
                .stroke_line(trail.from, trail.to, trail.width, color, trail.alpha);
        }
    }

    fn draw_glow(&mut self, config: &VortexConfig) {
        for pass in &config.glow {
            let glow = self.working.blurred(pass.blur);
            self.working.add_scaled(&glow, pass.brightness);
        }
    }

    // Lighter blend of the frame onto a copy of itself
    fn composite(&mut self) {
        self.visible.copy_from(&self.working);
        self.visible.add_scaled(&self.working, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::GlowPass;

    fn trail(from: Vec2, to: Vec2, alpha: f32) -> Trail {
        Trail {
            from,
            to,
            width: 2.0,
            hue: 220.0,
            alpha,
        }
    }

    #[test]
    fn clears_to_background_without_trails() {
        let config = VortexConfig {
            background_color: Vec3::new(0.1, 0.2, 0.3),
            glow: Vec::new(),
            ..Default::default()
        };
        let viewport = Viewport::new(16, 8);
        let mut render = RenderModule::new(&viewport);

        render.draw(&config, &viewport, &[]);

        assert_eq!(render.visible().width(), 16);
        assert!(render
            .visible()
            .pixels()
            .iter()
            .all(|p| (*p - Vec3::new(0.2, 0.4, 0.6)).abs().max_element() < 1e-6));
    }

    #[test]
    fn trails_are_drawn_in_hue() {
        let config = VortexConfig {
            glow: Vec::new(),
            ..Default::default()
        };
        let viewport = Viewport::new(32, 32);
        let mut render = RenderModule::new(&viewport);

        render.draw(
            &config,
            &viewport,
            &[trail(Vec2::new(4.0, 16.0), Vec2::new(28.0, 16.0), 1.0)],
        );

        let pixel = render.working().pixel(16, 15).unwrap();
        assert!((pixel - hsl_to_rgb(220.0, 1.0, 0.6)).abs().max_element() < 1e-5);
        assert_eq!(render.visible().pixel(16, 2), Some(Vec3::ZERO));
    }

    #[test]
    fn visible_surface_doubles_the_working_surface() {
        let config = VortexConfig {
            glow: Vec::new(),
            ..Default::default()
        };
        let viewport = Viewport::new(32, 32);
        let mut render = RenderModule::new(&viewport);

        render.draw(
            &config,
            &viewport,
            &[trail(Vec2::new(4.0, 16.0), Vec2::new(28.0, 16.0), 0.25)],
        );

        let working = render.working().pixel(16, 15).unwrap();
        let visible = render.visible().pixel(16, 15).unwrap();
        assert!((working - hsl_to_rgb(220.0, 1.0, 0.6) * 0.25).abs().max_element() < 1e-5);
        assert!((visible - working * 2.0).abs().max_element() < 1e-5);

        for (visible, working) in render.visible().pixels().iter().zip(render.working().pixels()) {
            assert!((*visible - (*working * 2.0).min(Vec3::ONE)).abs().max_element() < 1e-6);
        }
    }

    #[test]
    fn glow_bleeds_light_around_trails() {
        let viewport = Viewport::new(48, 48);
        let segment = [trail(Vec2::new(10.0, 24.0), Vec2::new(38.0, 24.0), 1.0)];

        let mut flat = RenderModule::new(&viewport);
        flat.draw(
            &VortexConfig {
                glow: Vec::new(),
                ..Default::default()
            },
            &viewport,
            &segment,
        );

        let mut glowing = RenderModule::new(&viewport);
        glowing.draw(
            &VortexConfig {
                glow: vec![GlowPass {
                    blur: 4.0,
                    brightness: 2.0,
                }],
                ..Default::default()
            },
            &viewport,
            &segment,
        );

        assert_eq!(flat.visible().pixel(24, 30), Some(Vec3::ZERO));
        assert!(glowing.visible().pixel(24, 30).unwrap().z > 0.0);
        assert!(glowing.visible().pixels().iter().all(|p| p.max_element() <= 1.0));
    }

    #[test]
    fn follows_viewport_changes() {
        let config = VortexConfig::default();
        let mut render = RenderModule::new(&Viewport::new(10, 10));

        let resized = Viewport::new(30, 5);
        render.draw(&config, &resized, &[]);
        assert_eq!(render.visible().width(), 30);
        assert_eq!(render.visible().height(), 5);
        assert_eq!(render.working().pixels().len(), 150);

        let empty = Viewport::new(0, 0);
        render.draw(&config, &empty, &[]);
        assert!(render.visible().pixels().is_empty());
    }
}
