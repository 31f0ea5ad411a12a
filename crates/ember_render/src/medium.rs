//! Participating medium of constant density.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::material::Isotropic;
use crate::sampling::gen_f32;
use crate::texture::Texture;
use crate::{Color, Ray};
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// A volume of constant density bounded by another surface.
///
/// A ray passing through the boundary scatters at an exponentially
/// distributed free-path distance; if that distance exceeds the length of
/// the ray segment inside the boundary, the ray passes through unscattered.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f32,
    phase_function: Isotropic,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, texture: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Isotropic::new(texture),
        }
    }

    pub fn from_color(boundary: Arc<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Isotropic::from_color(albedo),
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        // Entry and exit of the boundary, anywhere along the ray's line
        let mut rec1 = HitRecord::default();
        let mut rec2 = HitRecord::default();

        if !self
            .boundary
            .hit(ray, Interval::UNIVERSE, &mut rec1, rng)
        {
            return false;
        }
        if !self.boundary.hit(
            ray,
            Interval::new(rec1.t + 0.0001, f32::INFINITY),
            &mut rec2,
            rng,
        ) {
            return false;
        }

        // Clip the inside segment to the query interval
        let mut t_enter = rec1.t.max(ray_t.min);
        let t_exit = rec2.t.min(ray_t.max);

        if t_enter >= t_exit {
            return false;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * gen_f32(rng).ln();

        if hit_distance > distance_inside_boundary {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);

        // Arbitrary for a volume
        rec.normal = Vec3::X;
        rec.front_face = true;
        rec.material = &self.phase_function;

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}
