//! Orthonormal basis about a normal vector.

use crate::Vec3;

/// Right-handed orthonormal basis with w aligned to a given normal.
///
/// Used to express sampled directions (e.g. cosine-weighted hemisphere
/// samples) in the frame of a surface normal.
#[derive(Debug, Clone, Copy)]
pub struct Onb {
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Onb {
    pub fn new(n: Vec3) -> Self {
        let w = n.normalize();
        // Helper axis must not be parallel to w
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = w.cross(v);
        Self { u, v, w }
    }

    pub fn u(&self) -> Vec3 {
        self.u
    }

    pub fn v(&self) -> Vec3 {
        self.v
    }

    pub fn w(&self) -> Vec3 {
        self.w
    }

    /// Map a vector expressed in this basis into world space.
    pub fn transform(&self, p: Vec3) -> Vec3 {
        p.x * self.u + p.y * self.v + p.z * self.w
    }
}
