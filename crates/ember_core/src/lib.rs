//! Asset collaborators for the Ember path tracer.
//!
//! Supplies decoded pixel data for image-backed textures and converts
//! decoded mesh/camera buffers into world-space render inputs. Asset
//! failures here are fatal configuration errors; the renderer itself never
//! degrades or partially renders.

mod error;
mod image_data;
mod mesh;

pub use error::AssetError;
pub use image_data::Image;
pub use mesh::{asset_to_world, camera_pose, CameraPose, MeshBuffers, Vertex};

pub type AssetResult<T> = Result<T, AssetError>;
