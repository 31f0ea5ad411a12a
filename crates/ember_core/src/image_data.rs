//! Decoded pixel supplier for image-backed textures.

use std::path::Path;

use ember_math::Vec3;

use crate::AssetResult;

/// A decoded image: width, height and per-pixel RGB colors scaled to [0, 1].
///
/// Byte-per-channel sources are scaled by 1/255; lookups clamp integer
/// coordinates so out-of-range indices read the nearest edge pixel.
#[derive(Clone, Debug)]
pub struct Image {
    width: u32,
    height: u32,
    /// Row-major RGB, top row first
    pixels: Vec<[f32; 3]>,
}

impl Image {
    /// Wrap an already-decoded byte-per-channel RGB buffer.
    pub fn from_rgb8(width: u32, height: u32, data: &[u8]) -> Self {
        let scale = 1.0 / 255.0;
        let pixels = data
            .chunks_exact(3)
            .map(|p| [p[0] as f32 * scale, p[1] as f32 * scale, p[2] as f32 * scale])
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode an image file from disk. Missing or malformed files are fatal.
    pub fn load(path: impl AsRef<Path>) -> AssetResult<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)?.to_rgb8();
        let (width, height) = decoded.dimensions();

        log::debug!("loaded image {} ({}x{})", path.display(), width, height);

        Ok(Self::from_rgb8(width, height, decoded.as_raw()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel color at integer coordinates, clamped to the image bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let p = self.pixels[(y * self.width + x) as usize];
        Vec3::new(p[0], p[1], p[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb8() {
        // 2x1: red then white
        let img = Image::from_rgb8(2, 1, &[255, 0, 0, 255, 255, 255]);
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 1);

        let red = img.pixel(0, 0);
        assert!((red.x - 1.0).abs() < 1e-5);
        assert!(red.y.abs() < 1e-5);

        let white = img.pixel(1, 0);
        assert!((white.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pixel_clamps_coordinates() {
        let img = Image::from_rgb8(2, 2, &[0, 0, 0, 51, 51, 51, 102, 102, 102, 153, 153, 153]);

        // Past the right/bottom edge reads the corner pixel
        assert_eq!(img.pixel(10, 10), img.pixel(1, 1));
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let err = Image::load("/nonexistent/definitely-missing.png");
        assert!(err.is_err());
    }
}
