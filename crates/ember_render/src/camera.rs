//! Viewing model: pixel grid derivation and per-sample ray generation.

use crate::sampling::{gen_f32, random_in_unit_disk};
use crate::{Color, Ray};
use ember_math::Vec3;
use rand::RngCore;

/// Camera configuration plus the derived state needed to shoot rays.
///
/// Built with the `with_*` methods; every setter re-derives the view basis,
/// pixel grid and defocus disk, so the camera is always consistent and
/// read-only during rendering.
#[derive(Debug, Clone)]
pub struct Camera {
    aspect_ratio: f32,
    image_width: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    vfov: f32,
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    defocus_angle: f32,
    focus_dist: f32,
    background: Color,

    // Derived
    image_height: u32,
    sqrt_spp: u32,
    recip_sqrt_spp: f32,
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        let mut camera = Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: Color::ZERO,

            image_height: 0,
            sqrt_spp: 0,
            recip_sqrt_spp: 0.0,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        };
        camera.initialize();
        camera
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.initialize();
        self
    }

    pub fn with_image_width(mut self, image_width: u32) -> Self {
        self.image_width = image_width;
        self.initialize();
        self
    }

    pub fn with_samples_per_pixel(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.initialize();
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_vfov(mut self, degrees: f32) -> Self {
        self.vfov = degrees;
        self.initialize();
        self
    }

    pub fn with_view(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.initialize();
        self
    }

    pub fn with_defocus(mut self, defocus_angle: f32, focus_dist: f32) -> Self {
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self.initialize();
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    fn initialize(&mut self) {
        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);

        self.sqrt_spp = (self.samples_per_pixel as f32).sqrt() as u32;
        self.recip_sqrt_spp = 1.0 / self.sqrt_spp as f32;

        self.center = self.look_from;

        // Viewport dimensions from the vertical field of view at the focus
        // plane. The effective aspect ratio is width/height after integer
        // truncation, not the configured ratio.
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal view basis
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - self.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = u * defocus_radius;
        self.defocus_disk_v = v * defocus_radius;
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Stratification count per pixel axis: floor(sqrt(samples per pixel)).
    pub fn sqrt_spp(&self) -> u32 {
        self.sqrt_spp
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// A jittered ray through pixel (i, j), stratified sub-cell (si, sj).
    ///
    /// The origin is the camera center, or a point on the defocus disk when
    /// the aperture is open; the time is uniform in [0, 1) for motion blur.
    pub fn get_ray(&self, i: u32, j: u32, si: u32, sj: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = self.sample_square_stratified(si, sj, rng);
        let pixel_sample = self.pixel00_loc
            + (i as f32 + offset.x) * self.pixel_delta_u
            + (j as f32 + offset.y) * self.pixel_delta_v;

        let origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(origin, pixel_sample - origin, gen_f32(rng))
    }

    /// Jitter within one cell of the per-pixel N x N stratification grid,
    /// mapped into the [-0.5, 0.5] pixel square.
    fn sample_square_stratified(&self, si: u32, sj: u32, rng: &mut dyn RngCore) -> Vec3 {
        let px = (si as f32 + gen_f32(rng)) * self.recip_sqrt_spp - 0.5;
        let py = (sj as f32 + gen_f32(rng)) * self.recip_sqrt_spp - 0.5;
        Vec3::new(px, py, 0.0)
    }

    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_image_height_from_aspect() {
        let camera = Camera::new()
            .with_image_width(400)
            .with_aspect_ratio(16.0 / 9.0);
        assert_eq!(camera.image_height(), 225);
    }

    #[test]
    fn test_image_height_never_zero() {
        let camera = Camera::new().with_image_width(10).with_aspect_ratio(100.0);
        assert_eq!(camera.image_height(), 1);
    }

    #[test]
    fn test_stratification_count() {
        assert_eq!(Camera::new().with_samples_per_pixel(100).sqrt_spp(), 10);
        // Non-square counts round down
        assert_eq!(Camera::new().with_samples_per_pixel(10).sqrt_spp(), 3);
    }

    #[test]
    fn test_rays_originate_at_center_without_defocus() {
        let camera = Camera::new().with_view(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..20 {
            let ray = camera.get_ray(10, 10, 0, 0, &mut rng);
            assert_eq!(ray.origin(), Vec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_defocus_spreads_origins() {
        let camera = Camera::new()
            .with_view(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_defocus(10.0, 3.4);
        let mut rng = StdRng::seed_from_u64(1);

        let mut spread = false;
        for _ in 0..20 {
            if camera.get_ray(0, 0, 0, 0, &mut rng).origin() != Vec3::ZERO {
                spread = true;
            }
        }
        assert!(spread);
    }

    #[test]
    fn test_center_pixel_ray_points_at_target() {
        let camera = Camera::new()
            .with_image_width(101)
            .with_samples_per_pixel(1)
            .with_view(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        let mut rng = StdRng::seed_from_u64(2);

        // Middle pixel of a 101x101 image looks straight down -z
        let ray = camera.get_ray(50, 50, 0, 0, &mut rng);
        let dir = ray.direction().normalize();
        assert!(dir.z < -0.99, "direction {dir}");
    }

    #[test]
    fn test_ray_time_in_unit_range() {
        let camera = Camera::new();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let t = camera.get_ray(0, 0, 0, 0, &mut rng).time();
            assert!((0.0..1.0).contains(&t));
        }
    }
}
