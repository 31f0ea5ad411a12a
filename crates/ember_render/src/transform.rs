//! Affine instance wrappers: translation and single-axis rotation.
//!
//! Both transform the incoming ray into object space, delegate to the
//! wrapped surface, then map the hit point and normal back to world space.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::Ray;
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// Move a surface by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self {
            object,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        // Shift the ray into object space rather than moving the object
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        if !self.object.hit(&offset_ray, ray_t, rec, rng) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rotation axis for [`Rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotate a surface about one world axis by a fixed angle.
pub struct Rotate {
    object: Arc<dyn Hittable>,
    axis: Axis,
    cos_theta: f32,
    sin_theta: f32,
    bbox: Aabb,
}

impl Rotate {
    pub fn new(object: Arc<dyn Hittable>, axis: Axis, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let cos_theta = radians.cos();
        let sin_theta = radians.sin();

        // Re-derive the box from the eight rotated corners of the child's box
        let child = object.bounding_box();
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let corner = Vec3::new(
                        if i == 0 { child.x.min } else { child.x.max },
                        if j == 0 { child.y.min } else { child.y.max },
                        if k == 0 { child.z.min } else { child.z.max },
                    );
                    let rotated = rotate_about(axis, corner, cos_theta, sin_theta);
                    min = min.min(rotated);
                    max = max.max(rotated);
                }
            }
        }

        Self {
            object,
            axis,
            cos_theta,
            sin_theta,
            bbox: Aabb::from_points(min, max),
        }
    }

    /// World space -> object space (rotation by the negated angle).
    fn to_object(&self, p: Vec3) -> Vec3 {
        rotate_about(self.axis, p, self.cos_theta, -self.sin_theta)
    }

    /// Object space -> world space.
    fn to_world(&self, p: Vec3) -> Vec3 {
        rotate_about(self.axis, p, self.cos_theta, self.sin_theta)
    }
}

/// Rotate `p` about `axis` by the angle whose cosine/sine are given.
fn rotate_about(axis: Axis, p: Vec3, cos: f32, sin: f32) -> Vec3 {
    match axis {
        Axis::X => Vec3::new(p.x, cos * p.y - sin * p.z, sin * p.y + cos * p.z),
        Axis::Y => Vec3::new(cos * p.x + sin * p.z, p.y, -sin * p.x + cos * p.z),
        Axis::Z => Vec3::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y, p.z),
    }
}

impl Hittable for Rotate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let rotated = Ray::new(
            self.to_object(ray.origin()),
            self.to_object(ray.direction()),
            ray.time(),
        );

        if !self.object.hit(&rotated, ray_t, rec, rng) {
            return false;
        }

        rec.p = self.to_world(rec.p);
        rec.normal = self.to_world(rec.normal);
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
    use crate::sphere::Sphere;
    use crate::Material;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    #[test]
    fn test_translate_hit() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 0.5, gray()));
        let moved = Translate::new(sphere, Vec3::new(0.0, 0.0, -3.0));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(moved.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rec,
            &mut rng
        ));
        assert!((rec.t - 2.5).abs() < 1e-4);
        // Hit point reported in world space
        assert!((rec.p.z - (-2.5)).abs() < 1e-4);
    }

    #[test]
    fn test_translate_bounding_box() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, gray()));
        let moved = Translate::new(sphere, Vec3::new(5.0, 0.0, 0.0));

        let bbox = moved.bounding_box();
        assert!((bbox.x.min - 4.0).abs() < 1e-4);
        assert!((bbox.x.max - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_y_hit() {
        // Sphere at +x, rotated 90 degrees about y: appears at -z
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 0.5, gray()));
        let rotated = Rotate::new(sphere, Axis::Y, 90.0);

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();

        assert!(rotated.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rec,
            &mut rng
        ));
        assert!((rec.t - 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_round_trip() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, gray()));
        let mut rng = StdRng::seed_from_u64(13);

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for _ in 0..50 {
                let angle = rng.gen_range(-180.0..180.0);
                let rot = Rotate::new(sphere.clone(), axis, angle);
                let p = Vec3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                );

                let round_trip = rot.to_world(rot.to_object(p));
                assert!(
                    (round_trip - p).length() < 1e-3,
                    "axis {axis:?} angle {angle}: {p} -> {round_trip}"
                );
            }
        }
    }

    #[test]
    fn test_rotate_bounding_box_contains_object() {
        // Long box along x, rotated 45 degrees about z: its extent grows
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::new(3.0, 0.0, 0.0), 0.5, gray()));
        let rotated = Rotate::new(sphere, Axis::Z, 45.0);
        let bbox = rotated.bounding_box();

        // The rotated sphere center is at (3/sqrt2, 3/sqrt2, 0)
        let c = 3.0 / 2.0f32.sqrt();
        assert!(bbox.x.contains(c));
        assert!(bbox.y.contains(c));
    }
}
