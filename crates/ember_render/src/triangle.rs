//! Triangle primitive for mesh geometry.
//!
//! Uses the Moller-Trumbore algorithm for ray-triangle intersection, with
//! per-vertex normals/uvs interpolated barycentrically and an optional
//! stochastic alpha cutout.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::sampling::gen_f32;
use crate::{Material, Ray};
use ember_core::Vertex;
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

pub struct Triangle {
    v0: Vertex,
    v1: Vertex,
    v2: Vertex,
    /// Geometric face normal (unit length)
    face_normal: Vec3,
    /// Opacity in [0, 1]; hits are kept with this probability
    alpha: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, material: Arc<dyn Material>) -> Self {
        let edge1 = v1.position - v0.position;
        let edge2 = v2.position - v0.position;
        let face_normal = edge1.cross(edge2).normalize();

        let min = v0.position.min(v1.position).min(v2.position);
        let max = v0.position.max(v1.position).max(v2.position);

        Self {
            v0,
            v1,
            v2,
            face_normal,
            alpha: 1.0,
            material,
            bbox: Aabb::from_points(min, max),
        }
    }

    /// Stochastic alpha cutout: a hit survives with probability `alpha`.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

impl Hittable for Triangle {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let edge1 = self.v1.position - self.v0.position;
        let edge2 = self.v2.position - self.v0.position;

        let h = ray.direction().cross(edge2);
        let det = edge1.dot(h);

        // Degenerate: ray parallel to the triangle plane
        if det.abs() < 1e-8 {
            return false;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - self.v0.position;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(edge1);
        let v = inv_det * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = inv_det * edge2.dot(q);
        if !ray_t.contains(t) {
            return false;
        }

        if self.alpha < 1.0 && gen_f32(rng) > self.alpha {
            return false;
        }

        let w = 1.0 - u - v;
        let uv = w * self.v0.uv + u * self.v1.uv + v * self.v2.uv;

        // Shading normal from the vertex normals; fall back to the face
        // normal for degenerate vertex data
        let shading = w * self.v0.normal + u * self.v1.normal + v * self.v2.normal;
        let outward_normal = if shading.length_squared() > 1e-12 {
            shading.normalize()
        } else {
            self.face_normal
        };

        rec.t = t;
        rec.p = ray.at(t);
        rec.u = uv.x;
        rec.v = uv.y;
        rec.set_face_normal(ray, outward_normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use ember_math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn vert(p: Vec3, uv: Vec2) -> Vertex {
        Vertex {
            position: p,
            normal: Vec3::Z,
            uv,
        }
    }

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    fn test_triangle() -> Triangle {
        Triangle::new(
            vert(Vec3::new(-1.0, -1.0, -1.0), Vec2::new(0.0, 0.0)),
            vert(Vec3::new(1.0, -1.0, -1.0), Vec2::new(1.0, 0.0)),
            vert(Vec3::new(0.0, 1.0, -1.0), Vec2::new(0.5, 1.0)),
            gray(),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = test_triangle();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(tri.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rec,
            &mut rng
        ));
        assert!((rec.t - 1.0).abs() < 1e-4);
        assert!(rec.front_face);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = test_triangle();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(!tri.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rec,
            &mut rng
        ));
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let tri = test_triangle();
        // Ray in the triangle's plane: near-zero determinant, no hit
        let ray = Ray::new_simple(Vec3::new(-2.0, 0.0, -1.0), Vec3::X);
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(!tri.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rec,
            &mut rng
        ));
    }

    #[test]
    fn test_triangle_uv_interpolation() {
        let tri = test_triangle();
        // Straight at vertex v2: uv approaches (0.5, 1.0)
        let ray = Ray::new_simple(Vec3::new(0.0, 0.99, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(tri.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rec,
            &mut rng
        ));
        assert!((rec.u - 0.5).abs() < 0.02);
        assert!(rec.v > 0.95);
    }

    #[test]
    fn test_alpha_zero_always_discards() {
        let tri = test_triangle().with_alpha(0.0);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(9);
        let mut rec = HitRecord::default();

        for _ in 0..50 {
            assert!(!tri.hit(
                &ray,
                Interval::new(0.001, f32::INFINITY),
                &mut rec,
                &mut rng
            ));
        }
    }

    #[test]
    fn test_alpha_half_discards_some() {
        let tri = test_triangle().with_alpha(0.5);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(9);

        let mut hits = 0;
        for _ in 0..1000 {
            let mut rec = HitRecord::default();
            if tri.hit(
                &ray,
                Interval::new(0.001, f32::INFINITY),
                &mut rec,
                &mut rng,
            ) {
                hits += 1;
            }
        }
        assert!((300..700).contains(&hits), "hits = {hits}");
    }
}
