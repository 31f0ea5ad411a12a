//! Ember - CPU Monte Carlo path tracer.
//!
//! Renders a static scene to a raster image by stochastically sampling
//! light transport paths. The scene is built once, wrapped in a BVH, and
//! queried immutably per sample ray; materials and probability densities
//! are consulted at each bounce to produce an attenuation and a next ray.

mod bvh;
mod camera;
mod hittable;
mod material;
mod medium;
mod pdf;
mod perlin;
mod ppm;
mod quad;
mod renderer;
mod sampling;
mod sphere;
mod texture;
mod transform;
mod triangle;

pub use bvh::BvhNode;
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, Scatter,
    ScatterRecord,
};
pub use medium::ConstantMedium;
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf, SpherePdf};
pub use perlin::Perlin;
pub use ppm::{write_header, write_pixel};
pub use quad::Quad;
pub use renderer::{ray_color, render_chunk, render_rows, ChunkSelect};
pub use sampling::{
    gen_f32, gen_range, random_cosine_direction, random_in_unit_disk, random_unit_vector,
};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
pub use transform::{Axis, Rotate, Translate};
pub use triangle::Triangle;

/// Re-export common math types from ember_math
pub use ember_math::{Aabb, Interval, Onb, Ray, Vec3};
