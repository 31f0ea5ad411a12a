//! Value-noise generator with trilinear smoothing.

use crate::sampling::gen_f32;
use ember_math::Vec3;
use rand::{Rng, RngCore};

const POINT_COUNT: usize = 256;

/// Lattice noise: a table of random floats indexed through three shuffled
/// permutation tables, smoothed with a Hermite fade and trilinear blending.
pub struct Perlin {
    random_floats: [f32; POINT_COUNT],
    perm_x: [usize; POINT_COUNT],
    perm_y: [usize; POINT_COUNT],
    perm_z: [usize; POINT_COUNT],
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let mut random_floats = [0.0; POINT_COUNT];
        for value in random_floats.iter_mut() {
            *value = gen_f32(rng);
        }

        Self {
            random_floats,
            perm_x: Self::generate_perm(rng),
            perm_y: Self::generate_perm(rng),
            perm_z: Self::generate_perm(rng),
        }
    }

    /// Noise value in [0, 1] at a point in space.
    pub fn noise(&self, p: Vec3) -> f32 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        // Hermite smoothstep removes the visible lattice banding
        let uu = u * u * (3.0 - 2.0 * u);
        let vv = v * v * (3.0 - 2.0 * v);
        let ww = w * w * (3.0 - 2.0 * w);

        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;

        let mut accum = 0.0;
        for di in 0..2i32 {
            for dj in 0..2i32 {
                for dk in 0..2i32 {
                    let corner = self.random_floats[self.perm_x[((i + di) & 255) as usize]
                        ^ self.perm_y[((j + dj) & 255) as usize]
                        ^ self.perm_z[((k + dk) & 255) as usize]];

                    let du = di as f32;
                    let dv = dj as f32;
                    let dw = dk as f32;
                    accum += (du * uu + (1.0 - du) * (1.0 - uu))
                        * (dv * vv + (1.0 - dv) * (1.0 - vv))
                        * (dw * ww + (1.0 - dw) * (1.0 - ww))
                        * corner;
                }
            }
        }
        accum
    }

    fn generate_perm(rng: &mut dyn RngCore) -> [usize; POINT_COUNT] {
        let mut perm = [0; POINT_COUNT];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = i;
        }

        // Fisher-Yates shuffle
        for i in (1..POINT_COUNT).rev() {
            let target = rng.gen_range(0..=i);
            perm.swap(i, target);
        }
        perm
    }
}
