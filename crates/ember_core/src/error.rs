use thiserror::Error;

/// Fatal asset errors. There is no partial or degraded render: a missing or
/// malformed asset aborts setup.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Mesh primitive is not triangles")]
    NonTriangleTopology,

    #[error("Mesh attribute buffers disagree: {0}")]
    MismatchedAttributes(String),

    #[error("Triangle index {index} out of range (vertex count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("No camera node present in the asset")]
    MissingCamera,
}
