use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};

use crate::error::{CanvasError, CanvasResult};

/// A lossless PNG capture of a whole surface.
///
/// Cloning is cheap; the encoded bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.png.len())
            .finish()
    }
}

impl Snapshot {
    pub fn encode(image: &RgbaImage) -> CanvasResult<Self> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(CanvasError::Encode)?;
        Ok(Self {
            png: png.into(),
            width: image.width(),
            height: image.height(),
        })
    }

    /// Decodes the capture back into a raster of the original dimensions.
    pub async fn decode(&self) -> CanvasResult<RgbaImage> {
        let image = image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .map_err(CanvasError::Decode)?
            .into_rgba8();
        if image.dimensions() != (self.width, self.height) {
            return Err(CanvasError::DimensionMismatch {
                expected: (self.width, self.height),
                found: image.dimensions(),
            });
        }
        Ok(image)
    }

    /// Blocking variant of [`Snapshot::decode`]
    pub fn decode_blocking(&self) -> CanvasResult<RgbaImage> {
        futures::executor::block_on(self.decode())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn encoded_len(&self) -> usize {
        self.png.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }
}
