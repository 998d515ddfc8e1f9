use glam::{Vec2, Vec3};
use image::{buffer::ConvertBuffer, imageops, Rgb, Rgb32FImage, RgbaImage};

#[derive(Debug, Clone)]
pub struct Canvas {
    image: Rgb32FImage,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: Rgb32FImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixels(&self) -> &[Vec3] {
        bytemuck::cast_slice(self.image.as_raw().as_slice())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec3> {
        self.image
            .get_pixel_checked(x, y)
            .map(|Rgb(rgb)| Vec3::from_array(*rgb))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = Rgb32FImage::new(width, height);
        }
    }

    pub fn fill(&mut self, color: Vec3) {
        self.texels_mut().fill(color);
    }

    pub fn copy_from(&mut self, other: &Canvas) {
        self.resize(other.width(), other.height());
        self.texels_mut().copy_from_slice(other.pixels());
    }

    /// Additive blend of `other * scale` onto this surface, saturating at 1.
    pub fn add_scaled(&mut self, other: &Canvas, scale: f32) {
        debug_assert_eq!(self.image.dimensions(), other.image.dimensions());

        for (dst, src) in self.texels_mut().iter_mut().zip(other.pixels()) {
            *dst = (*dst + *src * scale).min(Vec3::ONE);
        }
    }

    pub fn blurred(&self, sigma: f32) -> Canvas {
        if !(sigma > 0.0) || self.pixels().is_empty() {
            return self.clone();
        }

        Self {
            image: imageops::blur(&self.image, sigma),
        }
    }

    /// Strokes an anti-aliased line with round caps, blended source-over.
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec3, alpha: f32) {
        if !(alpha > 0.0 && width > 0.0 && from.is_finite() && to.is_finite()) {
            return;
        }
        let alpha = alpha.min(1.0);
        let half = 0.5 * width;
        let (columns, rows) = self.image.dimensions();

        // Half a pixel of padding for the anti-aliased edge
        let min = from.min(to) - Vec2::splat(half + 0.5);
        let max = from.max(to) + Vec2::splat(half + 0.5);
        if max.x < 0.0 || max.y < 0.0 || min.x >= columns as f32 || min.y >= rows as f32 {
            return;
        }

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil() as u32).min(columns);
        let y1 = (max.y.ceil() as u32).min(rows);

        let texels = self.texels_mut();
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (half + 0.5 - distance_to_segment(center, from, to)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }

                let a = alpha * coverage;
                let dst = &mut texels[y as usize * columns as usize + x as usize];
                *dst = *dst * (1.0 - a) + color * a;
            }
        }
    }

    /// The surface as opaque 8-bit RGBA, row-major from the top-left corner.
    pub fn to_rgba8(&self) -> RgbaImage {
        self.image.convert()
    }

    fn texels_mut(&mut self) -> &mut [Vec3] {
        bytemuck::cast_slice_mut(&mut *self.image)
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared <= f32::EPSILON {
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// `hsl(h, s, l)` with hue in degrees (wrapped) and `s`, `l` in `[0, 1]`.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let hue = if hue.is_finite() {
        hue.rem_euclid(360.0)
    } else {
        0.0
    };

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = lightness - 0.5 * chroma;
    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(120.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(240.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn hsl_wraps_hue() {
        assert!(close(hsl_to_rgb(580.0, 1.0, 0.6), hsl_to_rgb(220.0, 1.0, 0.6)));
        assert!(close(hsl_to_rgb(-140.0, 1.0, 0.6), hsl_to_rgb(220.0, 1.0, 0.6)));
    }

    #[test]
    fn hsl_sixty_percent_lightness() {
        // hsl(220, 100%, 60%) is #3377ff
        let rgb = hsl_to_rgb(220.0, 1.0, 0.6);
        assert!(close(rgb, Vec3::new(0.2, 0.4666667, 1.0)));
    }

    #[test]
    fn stroke_covers_segment_and_blends() {
        let mut canvas = Canvas::new(20, 20);
        canvas.stroke_line(Vec2::new(2.0, 10.0), Vec2::new(18.0, 10.0), 2.0, Vec3::ONE, 0.5);

        let on_line = canvas.pixel(10, 9).unwrap();
        assert!(close(on_line, Vec3::splat(0.5)));
        assert_eq!(canvas.pixel(10, 2), Some(Vec3::ZERO));
        assert_eq!(canvas.pixel(20, 0), None);
    }

    #[test]
    fn transparent_and_offscreen_strokes_are_skipped() {
        let mut canvas = Canvas::new(8, 8);
        canvas.stroke_line(Vec2::ZERO, Vec2::splat(8.0), 3.0, Vec3::ONE, 0.0);
        canvas.stroke_line(Vec2::splat(-20.0), Vec2::splat(-10.0), 3.0, Vec3::ONE, 1.0);
        canvas.stroke_line(Vec2::splat(f32::NAN), Vec2::ZERO, 3.0, Vec3::ONE, 1.0);
        assert!(canvas.pixels().iter().all(|p| *p == Vec3::ZERO));
    }

    #[test]
    fn blur_spreads_a_point_of_light() {
        let mut canvas = Canvas::new(41, 41);
        canvas.stroke_line(Vec2::new(20.5, 20.5), Vec2::new(20.5, 20.5), 0.5, Vec3::ONE, 1.0);
        let before: f32 = canvas.pixels().iter().map(|p| p.x).sum();

        let blurred = canvas.blurred(4.0);

        let center = blurred.pixel(20, 20).unwrap();
        assert!(center.x > 0.0 && center.x < canvas.pixel(20, 20).unwrap().x);
        assert!(blurred.pixel(23, 20).unwrap().x > 0.0);
        assert!(blurred.pixel(0, 0).unwrap().x < 1e-3);

        let after: f32 = blurred.pixels().iter().map(|p| p.x).sum();
        assert!((after - before).abs() < 0.05 * before, "{before} -> {after}");
    }

    #[test]
    fn blur_keeps_uniform_surfaces_uniform() {
        let mut canvas = Canvas::new(64, 64);
        canvas.fill(Vec3::splat(0.5));

        let blurred = canvas.blurred(2.0);
        assert_eq!(blurred.width(), 64);
        assert!(close(blurred.pixel(32, 32).unwrap(), Vec3::splat(0.5)));

        assert!(Canvas::new(0, 0).blurred(8.0).pixels().is_empty());
        assert_eq!(canvas.blurred(0.0).pixels(), canvas.pixels());
    }

    #[test]
    fn additive_blend_saturates() {
        let mut a = Canvas::new(2, 2);
        a.fill(Vec3::splat(0.75));
        let b = a.clone();

        a.add_scaled(&b, 2.0);
        assert!(a.pixels().iter().all(|p| *p == Vec3::ONE));
    }

    #[test]
    fn rgba8_encoding() {
        let mut canvas = Canvas::new(2, 1);
        canvas.fill(Vec3::new(1.0, 0.2, 0.0));

        let rgba = canvas.to_rgba8();
        assert_eq!(rgba.dimensions(), (2, 1));
        assert_eq!(rgba.as_raw(), &vec![255, 51, 0, 255, 255, 51, 0, 255]);
    }

    #[test]
    fn resize_clears_and_zero_size_is_empty() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill(Vec3::ONE);
        canvas.resize(0, 3);
        assert!(canvas.pixels().is_empty());

        canvas.resize(2, 2);
        assert_eq!(canvas.pixels().len(), 4);
        assert!(canvas.pixels().iter().all(|p| *p == Vec3::ZERO));
    }
}
