//! Surface and volume scattering models.
//!
//! A material either samples its next direction from an explicit density
//! (diffuse and isotropic scattering) or produces a single deterministic
//! specular ray (metal and glass). Emissive materials add radiance through
//! [`Material::emitted`] instead of scattering.

use std::sync::Arc;

use crate::hittable::HitRecord;
use crate::pdf::{CosinePdf, Pdf, SpherePdf};
use crate::sampling::{gen_f32, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use crate::Ray;
use ember_math::Vec3;
use rand::RngCore;

/// RGB radiance or reflectance, linear and unbounded above.
pub type Color = Vec3;

/// How a material continues a light path.
pub enum Scatter {
    /// Sample the next direction from this density.
    Sampled(Box<dyn Pdf>),
    /// Follow exactly this ray; no density is involved.
    Specular(Ray),
}

pub struct ScatterRecord {
    pub attenuation: Color,
    pub scatter: Scatter,
}

pub trait Material: Send + Sync {
    /// Attempt to scatter `ray` at the hit. `None` means the path is absorbed.
    fn scatter(
        &self,
        _ray: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        None
    }

    /// Radiance emitted at the hit point. Non-emitters return black.
    fn emitted(&self, _rec: &HitRecord, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }

    /// Density of scattering into `scattered` given the incoming ray, used to
    /// weight directions drawn from a different sampling density.
    fn scattering_pdf(&self, _ray: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f32 {
        0.0
    }
}

/// Ideal diffuse reflector with cosine-weighted scattering.
pub struct Lambertian {
    texture: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self {
            texture: Arc::new(SolidColor::new(albedo)),
        }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        Some(ScatterRecord {
            attenuation: self.texture.value(rec.u, rec.v, rec.p),
            scatter: Scatter::Sampled(Box::new(CosinePdf::new(rec.normal))),
        })
    }

    fn scattering_pdf(&self, _ray: &Ray, rec: &HitRecord, scattered: &Ray) -> f32 {
        let cos_theta = rec.normal.dot(scattered.direction().normalize());
        (cos_theta / std::f32::consts::PI).max(0.0)
    }
}

/// Reflective surface; `fuzz` perturbs the mirror direction.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        let reflected = reflect(ray.direction(), rec.normal).normalize()
            + self.fuzz * random_unit_vector(rng);

        // Fuzzed direction that dips below the surface is absorbed
        if reflected.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterRecord {
            attenuation: self.albedo,
            scatter: Scatter::Specular(Ray::new(rec.p, reflected, ray.time())),
        })
    }
}

/// Clear refractive material (glass, water) with Schlick reflectance.
pub struct Dielectric {
    /// Index of refraction of the material relative to the enclosing medium.
    refraction_index: f32,
}

impl Dielectric {
    pub fn new(refraction_index: f32) -> Self {
        Self { refraction_index }
    }

    /// Schlick's polynomial approximation of Fresnel reflectance.
    fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
        let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
        let r0 = r0 * r0;
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        let ri = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = ri * sin_theta > 1.0;
        let direction = if cannot_refract || Self::reflectance(cos_theta, ri) > gen_f32(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, ri)
        };

        Some(ScatterRecord {
            attenuation: Color::ONE,
            scatter: Scatter::Specular(Ray::new(rec.p, direction, ray.time())),
        })
    }
}

/// Emitter that radiates from its front face only.
pub struct DiffuseLight {
    texture: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }

    pub fn from_color(emit: Color) -> Self {
        Self {
            texture: Arc::new(SolidColor::new(emit)),
        }
    }
}

impl Material for DiffuseLight {
    fn emitted(&self, rec: &HitRecord, u: f32, v: f32, p: Vec3) -> Color {
        if !rec.front_face {
            return Color::ZERO;
        }
        self.texture.value(u, v, p)
    }
}

/// Uniform phase function for participating media.
pub struct Isotropic {
    texture: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self {
            texture: Arc::new(SolidColor::new(albedo)),
        }
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        _ray: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        Some(ScatterRecord {
            attenuation: self.texture.value(rec.u, rec.v, rec.p),
            scatter: Scatter::Sampled(Box::new(SpherePdf)),
        })
    }

    fn scattering_pdf(&self, _ray: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f32 {
        1.0 / (4.0 * std::f32::consts::PI)
    }
}

/// Mirror reflection of `v` about the unit normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Snell refraction of unit vector `uv` through the unit normal `n`, with
/// `etai_over_etat` the ratio of refractive indices.
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
