//! Recursive radiance estimator and the chunked render loop.

use std::io::{self, Write};
use std::ops::Range;
use std::sync::atomic::{AtomicU32, Ordering};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::material::Scatter;
use crate::pdf::{HittablePdf, MixturePdf, Pdf};
use crate::ppm::{write_header, write_pixel};
use crate::{Color, Ray};
use ember_math::Interval;

/// Estimate the radiance arriving along `ray`.
///
/// Sampled scatters draw the next direction from a 50/50 mixture of the
/// light-surface density and the material's own density, then weight the
/// recursive estimate by `scattering_pdf / mixture_pdf` (multiple importance
/// sampling). A vanishing mixture density contributes emission alone rather
/// than dividing toward NaN.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    lights: Option<&HittableList>,
    background: Color,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if !world.hit(ray, Interval::new(0.001, f32::INFINITY), &mut rec, rng) {
        return background;
    }

    let emitted = rec.material.emitted(&rec, rec.u, rec.v, rec.p);

    let Some(scatter_rec) = rec.material.scatter(ray, &rec, rng) else {
        return emitted;
    };

    match scatter_rec.scatter {
        Scatter::Specular(specular) => {
            emitted
                + scatter_rec.attenuation
                    * ray_color(&specular, world, lights, background, depth - 1, rng)
        }
        Scatter::Sampled(material_pdf) => {
            let (direction, pdf_value) = match lights {
                Some(lights) if !lights.is_empty() => {
                    let light_pdf = HittablePdf::new(lights, rec.p);
                    let mixture = MixturePdf::new(&light_pdf, material_pdf.as_ref());
                    let direction = mixture.generate(rng);
                    (direction, mixture.value(direction, rng))
                }
                _ => {
                    let direction = material_pdf.generate(rng);
                    (direction, material_pdf.value(direction, rng))
                }
            };

            if pdf_value <= 1e-8 {
                return emitted;
            }

            let scattered = Ray::new(rec.p, direction, ray.time());
            let scattering_pdf = rec.material.scattering_pdf(ray, &rec, &scattered);
            let sample_color = ray_color(&scattered, world, lights, background, depth - 1, rng);

            emitted + scatter_rec.attenuation * scattering_pdf * sample_color / pdf_value
        }
    }
}

/// Render a contiguous band of scanlines, top-first row-major.
///
/// Row j draws from its own generator seeded `seed + j`, so any band
/// partition of the image produces pixels identical to a sequential render
/// with the same base seed, and row-parallelism cannot perturb them.
pub fn render_rows(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&HittableList>,
    rows: Range<u32>,
    seed: u64,
    progress: bool,
) -> Vec<Color> {
    let width = camera.image_width();
    let sqrt_spp = camera.sqrt_spp();
    let sample_scale = 1.0 / (sqrt_spp * sqrt_spp) as f32;

    let remaining = AtomicU32::new(rows.end - rows.start);

    let row_colors: Vec<Vec<Color>> = rows
        .into_par_iter()
        .map(|j| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(j as u64));
            let mut row = Vec::with_capacity(width as usize);

            for i in 0..width {
                let mut pixel_color = Color::ZERO;
                for sj in 0..sqrt_spp {
                    for si in 0..sqrt_spp {
                        let ray = camera.get_ray(i, j, si, sj, &mut rng);
                        pixel_color += ray_color(
                            &ray,
                            world,
                            lights,
                            camera.background(),
                            camera.max_depth(),
                            &mut rng,
                        );
                    }
                }
                row.push(pixel_color * sample_scale);
            }

            if progress {
                let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
                log::info!("rows remaining: {}", left);
            }
            row
        })
        .collect();

    row_colors.into_iter().flatten().collect()
}

/// Which part of the image one renderer invocation produces.
///
/// Chunk outputs are concatenated by an external orchestrator: the header
/// comes from a header-only (or whole-image) invocation, and each band
/// emits only its own rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSelect {
    /// Emit the P3 header and no pixel rows.
    HeaderOnly,
    /// Emit the header and every row, with progress diagnostics.
    Whole,
    /// Emit the rows of one scanline band, no header.
    Band(u32),
}

impl ChunkSelect {
    /// Map a command-line chunk index onto a selection: -1 is the whole
    /// image, -2 the header alone, 0..num_chunks one band.
    pub fn from_index(chunk: i64, num_chunks: u32) -> Option<Self> {
        match chunk {
            -2 => Some(Self::HeaderOnly),
            -1 => Some(Self::Whole),
            n if n >= 0 && (n as u64) < num_chunks as u64 => Some(Self::Band(n as u32)),
            _ => None,
        }
    }

    /// Scanline range for this selection. Bands are `height / num_chunks`
    /// rows; the last band absorbs the remainder.
    pub fn rows(self, height: u32, num_chunks: u32) -> Range<u32> {
        match self {
            Self::HeaderOnly => 0..0,
            Self::Whole => 0..height,
            Self::Band(index) => {
                let band = height / num_chunks;
                let start = index * band;
                let end = if index + 1 == num_chunks {
                    height
                } else {
                    start + band
                };
                start..end
            }
        }
    }
}

/// Render one chunk selection and encode it as a P3 stream.
pub fn render_chunk(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&HittableList>,
    select: ChunkSelect,
    num_chunks: u32,
    seed: u64,
    out: &mut dyn Write,
) -> io::Result<()> {
    let width = camera.image_width();
    let height = camera.image_height();

    if matches!(select, ChunkSelect::HeaderOnly | ChunkSelect::Whole) {
        write_header(out, width, height)?;
    }

    let rows = select.rows(height, num_chunks);
    if rows.is_empty() {
        return Ok(());
    }

    log::debug!("rendering rows {}..{} of {}", rows.start, rows.end, height);

    let progress = select == ChunkSelect::Whole;
    for pixel in render_rows(camera, world, lights, rows, seed, progress) {
        write_pixel(out, pixel)?;
    }
    Ok(())
}
