//! Sampling densities over directions.
//!
//! The integrator draws scatter directions from these and divides by their
//! value, which keeps the estimator unbiased regardless of which density
//! generated a given direction.

use std::f32::consts::PI;

use crate::hittable::{Hittable, HittableList};
use crate::sampling::{gen_f32, random_cosine_direction, random_unit_vector};
use ember_math::{Onb, Vec3};
use rand::RngCore;

pub trait Pdf {
    /// Density of `direction` under this distribution.
    fn value(&self, direction: Vec3, rng: &mut dyn RngCore) -> f32;

    /// Draw a direction from this distribution.
    fn generate(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Cosine-weighted hemisphere about a surface normal.
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(normal: Vec3) -> Self {
        Self {
            uvw: Onb::new(normal),
        }
    }
}

impl Pdf for CosinePdf {
    fn value(&self, direction: Vec3, _rng: &mut dyn RngCore) -> f32 {
        let cosine = direction.normalize().dot(self.uvw.w());
        (cosine / PI).max(0.0)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.uvw.transform(random_cosine_direction(rng))
    }
}

/// Uniform density over the full sphere of directions.
pub struct SpherePdf;

impl Pdf for SpherePdf {
    fn value(&self, _direction: Vec3, _rng: &mut dyn RngCore) -> f32 {
        1.0 / (4.0 * PI)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        random_unit_vector(rng)
    }
}

/// Directions toward a set of objects, as seen from a fixed origin.
pub struct HittablePdf<'a> {
    objects: &'a HittableList,
    origin: Vec3,
}

impl<'a> HittablePdf<'a> {
    pub fn new(objects: &'a HittableList, origin: Vec3) -> Self {
        Self { objects, origin }
    }
}

impl Pdf for HittablePdf<'_> {
    fn value(&self, direction: Vec3, rng: &mut dyn RngCore) -> f32 {
        self.objects.pdf_value(self.origin, direction, rng)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.objects.random(self.origin, rng)
    }
}

/// Even 50/50 mixture of two densities.
pub struct MixturePdf<'a> {
    p0: &'a dyn Pdf,
    p1: &'a dyn Pdf,
}

impl<'a> MixturePdf<'a> {
    pub fn new(p0: &'a dyn Pdf, p1: &'a dyn Pdf) -> Self {
        Self { p0, p1 }
    }
}

impl Pdf for MixturePdf<'_> {
    fn value(&self, direction: Vec3, rng: &mut dyn RngCore) -> f32 {
        0.5 * self.p0.value(direction, rng) + 0.5 * self.p1.value(direction, rng)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        if gen_f32(rng) < 0.5 {
            self.p0.generate(rng)
        } else {
            self.p1.generate(rng)
        }
    }
}
