//! Per-point color suppliers consumed by materials.

use std::sync::Arc;

use crate::perlin::Perlin;
use crate::Color;
use ember_math::{Interval, Vec3};

pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A single uniform color.
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.albedo
    }
}

/// Spatial 3-D checker pattern alternating two textures.
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f32, c1: Color, c2: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(c1)),
            Arc::new(SolidColor::new(c2)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let x = (p.x * self.inv_scale).floor() as i64;
        let y = (p.y * self.inv_scale).floor() as i64;
        let z = (p.z * self.inv_scale).floor() as i64;

        if (x + y + z) % 2 == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Lookup into a decoded raster image by surface uv.
pub struct ImageTexture {
    image: Arc<ember_core::Image>,
}

impl ImageTexture {
    pub fn new(image: Arc<ember_core::Image>) -> Self {
        Self { image }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        if self.image.height() == 0 {
            // Solid cyan flags a missing texture
            return Color::new(0.0, 1.0, 1.0);
        }

        let u = Interval::new(0.0, 1.0).clamp(u);
        // Flip v into image row order
        let v = 1.0 - Interval::new(0.0, 1.0).clamp(v);

        let i = (u * self.image.width() as f32) as u32;
        let j = (v * self.image.height() as f32) as u32;
        self.image.pixel(i, j)
    }
}

/// Procedural coherent noise.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(noise: Perlin, scale: f32) -> Self {
        Self { noise, scale }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        Color::ONE * self.noise.noise(self.scale * p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_solid_color_ignores_coordinates() {
        let tex = SolidColor::new(Color::new(0.2, 0.4, 0.6));
        assert_eq!(
            tex.value(0.0, 0.0, Vec3::ZERO),
            tex.value(0.9, 0.1, Vec3::splat(100.0))
        );
    }

    #[test]
    fn test_checker_alternates_along_axis() {
        let tex = CheckerTexture::from_colors(1.0, Color::ONE, Color::ZERO);

        let a = tex.value(0.0, 0.0, Vec3::new(0.5, 0.5, 0.5));
        let b = tex.value(0.0, 0.0, Vec3::new(1.5, 0.5, 0.5));
        assert_ne!(a, b);

        // Two cells apart lands on the same parity
        let c = tex.value(0.0, 0.0, Vec3::new(2.5, 0.5, 0.5));
        assert_eq!(a, c);
    }

    #[test]
    fn test_checker_scale() {
        // Cells twice as large: one unit along x stays in the same cell
        let tex = CheckerTexture::from_colors(2.0, Color::ONE, Color::ZERO);
        let a = tex.value(0.0, 0.0, Vec3::new(0.5, 0.5, 0.5));
        let b = tex.value(0.0, 0.0, Vec3::new(1.5, 0.5, 0.5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_image_texture_lookup() {
        // 2x1 image: red on the left, blue on the right
        let image = ember_core::Image::from_rgb8(2, 1, &[255, 0, 0, 0, 0, 255]);
        let tex = ImageTexture::new(Arc::new(image));

        let left = tex.value(0.1, 0.5, Vec3::ZERO);
        let right = tex.value(0.9, 0.5, Vec3::ZERO);
        assert!((left - Color::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert!((right - Color::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_image_texture_clamps_uv() {
        let image = ember_core::Image::from_rgb8(1, 1, &[255, 255, 255]);
        let tex = ImageTexture::new(Arc::new(image));

        assert!((tex.value(-3.0, 7.0, Vec3::ZERO) - Color::ONE).length() < 1e-5);
    }

    #[test]
    fn test_noise_texture_grayscale_in_range() {
        let mut rng = StdRng::seed_from_u64(6);
        let tex = NoiseTexture::new(Perlin::new(&mut rng), 4.0);

        for i in 0..100 {
            let p = Vec3::splat(i as f32 * 0.37);
            let c = tex.value(0.0, 0.0, p);
            assert_eq!(c.x, c.y);
            assert_eq!(c.y, c.z);
            assert!((0.0..=1.0).contains(&c.x));
        }
    }
}
