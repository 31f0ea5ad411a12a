//! Planar quadrilateral primitive.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::sampling::gen_f32;
use crate::{Material, Ray};
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// A parallelogram defined by an origin point Q and two edge vectors u, v.
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    /// Scaled normal for plane-coordinate projection: n / (n . n)
    w: Vec3,
    normal: Vec3,
    /// Plane offset: normal . Q
    d: f32,
    area: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();

        // Box of both diagonals covers any orientation of the parallelogram
        let bbox_diagonal1 = Aabb::from_points(q, q + u + v);
        let bbox_diagonal2 = Aabb::from_points(q + u, q + v);

        Self {
            q,
            u,
            v,
            w: n / n.dot(n),
            normal,
            d: normal.dot(q),
            area: n.length(),
            material,
            bbox: Aabb::surrounding(&bbox_diagonal1, &bbox_diagonal2),
        }
    }
}

impl Hittable for Quad {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let denominator = self.normal.dot(ray.direction());

        // Near-parallel rays never intersect the plane
        if denominator.abs() < 1e-8 {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denominator;
        if !ray_t.contains(t) {
            return false;
        }

        // Express the hit point in the quad's planar basis
        let intersection = ray.at(t);
        let planar = intersection - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));

        if !(0.0..=1.0).contains(&alpha) || !(0.0..=1.0).contains(&beta) {
            return false;
        }

        rec.u = alpha;
        rec.v = beta;
        rec.t = t;
        rec.p = intersection;
        rec.set_face_normal(ray, self.normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Area density converted to a solid-angle density: distance squared over
    /// the foreshortened area.
    fn pdf_value(&self, origin: Vec3, direction: Vec3, rng: &mut dyn RngCore) -> f32 {
        let mut rec = HitRecord::default();
        let ray = Ray::new_simple(origin, direction);
        if !self.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, rng) {
            return 0.0;
        }

        let distance_squared = rec.t * rec.t * direction.length_squared();
        let cosine = direction.dot(rec.normal).abs() / direction.length();

        if cosine <= 1e-8 {
            return 0.0;
        }
        distance_squared / (cosine * self.area)
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let p = self.q + gen_f32(rng) * self.u + gen_f32(rng) * self.v;
        p - origin
    }
}
