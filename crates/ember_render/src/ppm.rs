//! Plain-text PPM (P3) pixel stream encoding.

use std::io::{self, Write};

use crate::Color;
use ember_math::Interval;

/// Write the P3 header for a `width` x `height` image.
pub fn write_header(out: &mut dyn Write, width: u32, height: u32) -> io::Result<()> {
    write!(out, "P3\n{} {}\n255\n", width, height)
}

/// Write one pixel as an ASCII "r g b" triple.
///
/// Applies the gamma-2 tone curve (square root), replaces NaN channels with
/// zero, clamps to [0, 0.999] and scales to the byte range.
pub fn write_pixel(out: &mut dyn Write, color: Color) -> io::Result<()> {
    let r = linear_to_gamma(color.x);
    let g = linear_to_gamma(color.y);
    let b = linear_to_gamma(color.z);

    let intensity = Interval::new(0.0, 0.999);
    let r = (256.0 * intensity.clamp(r)) as i32;
    let g = (256.0 * intensity.clamp(g)) as i32;
    let b = (256.0 * intensity.clamp(b)) as i32;

    writeln!(out, "{} {} {}", r, g, b)
}

fn linear_to_gamma(component: f32) -> f32 {
    if component.is_nan() {
        return 0.0;
    }
    if component > 0.0 {
        component.sqrt()
    } else {
        0.0
    }
}
