//! Conversion of decoded mesh/camera buffers into world space.
//!
//! The decoder itself (glTF or otherwise) is an external collaborator; this
//! module only consumes its flat attribute buffers. The coordinate
//! convention between asset space and world space is: asset (x, y, z) maps
//! to world (y, -x, z), and texture v is flipped to image orientation.

use ember_math::{Quat, Vec2, Vec3};

use crate::{AssetError, AssetResult};

/// One mesh vertex in world space.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Flat attribute buffers for one decoded triangle-mode primitive.
///
/// `positions` and `normals` hold three floats per vertex, `uvs` two,
/// `indices` three entries per triangle.
#[derive(Debug, Clone, Copy)]
pub struct MeshBuffers<'a> {
    pub positions: &'a [f32],
    pub normals: &'a [f32],
    pub uvs: &'a [f32],
    pub indices: &'a [u16],
}

/// Remap an asset-space vector into world space.
#[inline]
pub fn asset_to_world(v: Vec3) -> Vec3 {
    Vec3::new(v.y, -v.x, v.z)
}

fn read_vec3(buffer: &[f32], index: usize) -> Vec3 {
    let i = 3 * index;
    asset_to_world(Vec3::new(buffer[i], buffer[i + 1], buffer[i + 2]))
}

fn read_uv(buffer: &[f32], index: usize) -> Vec2 {
    let i = 2 * index;
    // Flip v into image orientation
    Vec2::new(buffer[i], 1.0 - buffer[i + 1])
}

impl<'a> MeshBuffers<'a> {
    /// Convert the buffers into world-space triangles.
    ///
    /// Fails on disagreeing attribute counts, a non-multiple-of-three index
    /// buffer, or an index past the vertex count.
    pub fn triangles(&self) -> AssetResult<Vec<[Vertex; 3]>> {
        let count = self.positions.len() / 3;
        if self.positions.len() % 3 != 0 || self.normals.len() != self.positions.len() {
            return Err(AssetError::MismatchedAttributes(format!(
                "{} position floats vs {} normal floats",
                self.positions.len(),
                self.normals.len()
            )));
        }
        if self.uvs.len() != count * 2 {
            return Err(AssetError::MismatchedAttributes(format!(
                "{count} vertices vs {} uv floats",
                self.uvs.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(AssetError::NonTriangleTopology);
        }

        let vertex = |index: u16| -> AssetResult<Vertex> {
            let index = index as usize;
            if index >= count {
                return Err(AssetError::IndexOutOfRange { index, count });
            }
            Ok(Vertex {
                position: read_vec3(self.positions, index),
                normal: read_vec3(self.normals, index),
                uv: read_uv(self.uvs, index),
            })
        };

        let mut triangles = Vec::with_capacity(self.indices.len() / 3);
        for tri in self.indices.chunks_exact(3) {
            triangles.push([vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?]);
        }

        log::debug!("converted {} triangles", triangles.len());
        Ok(triangles)
    }
}

/// Camera pose derived from a decoded camera node.
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub aspect_ratio: f32,
}

/// Derive the world-space camera pose from an asset camera node.
///
/// `translation`/`rotation` are in asset space; `yfov` is in radians. Pass
/// `None` when the asset holds no camera node (fatal).
pub fn camera_pose(
    node: Option<(Vec3, Quat)>,
    yfov: f32,
    aspect_ratio: f32,
) -> AssetResult<CameraPose> {
    let (translation, rotation) = node.ok_or(AssetError::MissingCamera)?;

    // The asset camera looks down its local -z; rotate the +z basis and
    // step backwards from the eye point.
    let basis = asset_to_world(rotation * Vec3::Z);
    let look_from = asset_to_world(translation);

    Ok(CameraPose {
        look_from,
        look_at: look_from - basis,
        vup: Vec3::Z,
        vfov: yfov.to_degrees(),
        aspect_ratio,
    })
}
