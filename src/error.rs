use futures::task::SpawnError;
use thiserror::Error;

/// Errors raised while encoding, decoding or restoring raster snapshots
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] image::ImageError),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] image::ImageError),
    #[error("snapshot is {found:?} but the surface is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
    #[error("could not schedule restore: {0}")]
    Spawn(#[from] SpawnError),
}

pub type CanvasResult<T> = Result<T, CanvasError>;
