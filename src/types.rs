use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub center: Vec2,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            center: Vec2::new(0.5 * width as f32, 0.5 * height as f32),
        }
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width.max(1) as f32, self.height.max(1) as f32)
    }

    /// Whether `position` lies inside `[0, width] x [0, height]`.
    /// Non-finite positions are never inside.
    pub fn contains(&self, position: Vec2) -> bool {
        let extent = self.extent();
        position.is_finite()
            && position.x >= 0.0
            && position.y >= 0.0
            && position.x <= extent.x
            && position.y <= extent.y
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub hue: f32,
    pub alpha: f32,
}
