use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::surface::Surface;

/// Keeps one GPU texture in sync with a [`Surface`].
///
/// Uploads happen only when the surface revision moved since the last frame.
pub struct SurfaceTexture {
    name: String,
    handle: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for SurfaceTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceTexture")
            .field("name", &self.name)
            .field("uploaded_revision", &self.uploaded_revision)
            .finish()
    }
}

impl SurfaceTexture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: None,
            uploaded_revision: None,
        }
    }

    pub fn needs_upload(&self, surface: &Surface) -> bool {
        self.handle.is_none() || self.uploaded_revision != Some(surface.revision())
    }

    /// Returns the texture for `surface`, uploading it first if stale
    pub fn texture_id(&mut self, ctx: &Context, surface: &Surface) -> TextureId {
        if self.needs_upload(surface) {
            let image = color_image(surface);
            match &mut self.handle {
                Some(handle) => handle.set(image, TextureOptions::NEAREST),
                None => {
                    self.handle =
                        Some(ctx.load_texture(&self.name, image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(surface.revision());
        }
        match &self.handle {
            Some(handle) => handle.id(),
            None => TextureId::default(),
        }
    }
}

fn color_image(surface: &Surface) -> ColorImage {
    let (width, height) = surface.dimensions();
    ColorImage::from_rgba_unmultiplied([width as usize, height as usize], surface.image().as_raw())
}
