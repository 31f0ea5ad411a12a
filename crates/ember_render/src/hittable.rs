//! Hittable trait and HitRecord for ray-surface intersection.

use std::sync::Arc;

use crate::material::{Material, ScatterRecord};
use crate::Ray;
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// A material that always absorbs, used for `HitRecord::default()`.
struct Absorb;

impl Material for Absorb {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        None
    }
}

static ABSORB: Absorb = Absorb;

/// Transient output of a successful intersection test.
///
/// Created fresh per intersection query and discarded after one bounce's
/// processing.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at the intersection (always points against the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Texture coordinates
    pub u: f32,
    pub v: f32,
    /// Ray parameter of the intersection
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &ABSORB,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on the ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray; `front_face`
    /// records which side was hit. `outward_normal` must be unit length.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for surfaces that can be hit by rays.
///
/// `hit` reports the nearest valid root within `ray_t` or false. The RNG
/// parameter serves the stochastic primitives (participating media,
/// triangle alpha cutouts); deterministic primitives ignore it.
pub trait Hittable: Send + Sync {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool;

    /// Axis-aligned bounding box, precomputed at construction.
    fn bounding_box(&self) -> Aabb;

    /// Density of sampling `direction` from `origin` toward this surface.
    /// Only light-sampleable surfaces override this.
    fn pdf_value(&self, _origin: Vec3, _direction: Vec3, _rng: &mut dyn RngCore) -> f32 {
        0.0
    }

    /// A direction from `origin` toward a sampled point on this surface.
    fn random(&self, _origin: Vec3, _rng: &mut dyn RngCore) -> Vec3 {
        Vec3::X
    }
}

/// An aggregate of shared hittable objects.
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object, growing the union bounding box.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    /// Hand the objects over, e.g. for BVH construction.
    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if object.hit(ray, interval, rec, rng) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3, rng: &mut dyn RngCore) -> f32 {
        if self.objects.is_empty() {
            return 0.0;
        }

        let weight = 1.0 / self.objects.len() as f32;
        self.objects
            .iter()
            .map(|object| weight * object.pdf_value(origin, direction, rng))
            .sum()
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        if self.objects.is_empty() {
            return Vec3::X;
        }

        let index = (crate::sampling::gen_f32(rng) * self.objects.len() as f32) as usize;
        let index = index.min(self.objects.len() - 1);
        self.objects[index].random(origin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::sphere::Sphere;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_set_face_normal() {
        let mut rec = HitRecord::default();

        // Ray traveling -z against a +z outward normal: front face
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        rec.set_face_normal(&ray, Vec3::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        // Same normal, ray traveling +z: back face, normal flipped
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        rec.set_face_normal(&ray, Vec3::Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
    }

    #[test]
    fn test_list_keeps_closest_hit() {
        let mut list = HittableList::new();
        list.add(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            0.5,
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        )));
        list.add(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -2.0),
            0.5,
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        )));

        let mut rng = StdRng::seed_from_u64(7);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(list.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rec,
            &mut rng
        ));
        assert!((rec.t - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_empty_list_misses() {
        let list = HittableList::new();
        let mut rng = StdRng::seed_from_u64(7);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(!list.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rec,
            &mut rng
        ));
    }
}
