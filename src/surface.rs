use egui::emath::Rot2;
use egui::{Color32, Pos2, Rect, Vec2, pos2};
use image::{Rgba, RgbaImage, imageops};

use crate::error::{CanvasError, CanvasResult};

/// A persistent RGBA raster that drawing operations accumulate on.
///
/// Every primitive samples coverage at pixel centres and composites with
/// source-over. Anything outside the raster is clipped silently.
#[derive(Clone)]
pub struct Surface {
    image: RgbaImage,
    /// Bumped on every mutation so hosts can skip redundant texture uploads
    revision: u64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("revision", &self.revision)
            .finish()
    }
}

impl Surface {
    /// Creates a fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Unmultiplied RGBA at `(x, y)`, or `None` outside the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// True when no pixel has any opacity
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }

    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        self.touch();
    }

    /// Clears the surface and copies `image` onto it at the origin.
    pub fn replace_with(&mut self, image: &RgbaImage) -> CanvasResult<()> {
        if image.dimensions() != self.image.dimensions() {
            return Err(CanvasError::DimensionMismatch {
                expected: self.image.dimensions(),
                found: image.dimensions(),
            });
        }
        self.clear();
        imageops::replace(&mut self.image, image, 0, 0);
        Ok(())
    }

    pub fn fill_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        let bounds = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
        let mut mask = CoverageMask::new(self.dimensions(), bounds);
        mask.accumulate(bounds, |p| (radius - p.distance(center) + 0.5).clamp(0.0, 1.0));
        self.apply_mask(&mask, color);
    }

    /// Fills a `size` rectangle centred on `center` and rotated by `angle` radians.
    pub fn fill_rotated_rect(&mut self, center: Pos2, size: Vec2, angle: f32, color: Color32) {
        let half = size * 0.5;
        let inverse = Rot2::from_angle(angle).inverse();
        let bounds = Rect::from_center_size(center, Vec2::splat(size.length()));
        let mut mask = CoverageMask::new(self.dimensions(), bounds);
        mask.accumulate(bounds, |p| {
            let local = inverse * (p - center);
            let cx = (half.x - local.x.abs() + 0.5).clamp(0.0, 1.0);
            let cy = (half.y - local.y.abs() + 0.5).clamp(0.0, 1.0);
            cx * cy
        });
        self.apply_mask(&mask, color);
    }

    /// Strokes a straight segment with round caps.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.stroke_polyline(&[from, to], false, width, color);
    }

    /// Strokes a polyline with round caps and joins.
    ///
    /// Coverage is merged per pixel before compositing, so overlapping joints
    /// of a translucent stroke are not darkened twice.
    pub fn stroke_polyline(&mut self, points: &[Pos2], closed: bool, width: f32, color: Color32) {
        let Some(&first) = points.first() else {
            return;
        };
        let half = width * 0.5;
        let pad = Vec2::splat(half + 1.0);
        let bounds = Rect::from_points(points).expand2(pad);
        let mut mask = CoverageMask::new(self.dimensions(), bounds);

        let mut segment = |a: Pos2, b: Pos2| {
            let seg_bounds = Rect::from_two_pos(a, b).expand2(pad);
            mask.accumulate(seg_bounds, |p| {
                (half - segment_distance(p, a, b) + 0.5).clamp(0.0, 1.0)
            });
        };

        if points.len() == 1 {
            segment(first, first);
        }
        for pair in points.windows(2) {
            segment(pair[0], pair[1]);
        }
        if closed && points.len() > 2 {
            segment(points[points.len() - 1], first);
        }

        self.apply_mask(&mask, color);
    }

    /// Draws `source` scaled to `size`, centred on `center` and rotated by `angle`.
    ///
    /// Sampling is nearest-neighbour; the source alpha drives compositing.
    pub fn draw_image_rotated(&mut self, source: &RgbaImage, center: Pos2, size: Vec2, angle: f32) {
        let (src_w, src_h) = source.dimensions();
        if src_w == 0 || src_h == 0 || size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let inverse = Rot2::from_angle(angle).inverse();
        let bounds = Rect::from_center_size(center, Vec2::splat(size.length()));
        let Some((x0, y0, x1, y1)) = clip(self.dimensions(), bounds) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let p = pos2(x as f32 + 0.5, y as f32 + 0.5);
                let local = inverse * (p - center);
                let u = local.x / size.x + 0.5;
                let v = local.y / size.y + 0.5;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                let sx = ((u * src_w as f32) as u32).min(src_w - 1);
                let sy = ((v * src_h as f32) as u32).min(src_h - 1);
                let src = source.get_pixel(sx, sy).0;
                blend(self.image.get_pixel_mut(x, y), src, 1.0);
            }
        }
        self.touch();
    }

    fn apply_mask(&mut self, mask: &CoverageMask, color: Color32) {
        let src = color.to_srgba_unmultiplied();
        for (x, y, coverage) in mask.iter() {
            blend(self.image.get_pixel_mut(x, y), src, coverage);
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Per-pixel coverage over the clipped bounds of one drawing operation
struct CoverageMask {
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
    raster: (u32, u32),
    data: Vec<f32>,
}

impl CoverageMask {
    fn new(raster: (u32, u32), bounds: Rect) -> Self {
        let (x0, y0, x1, y1) = clip(raster, bounds).unwrap_or((0, 0, 0, 0));
        let (width, height) = (x1 - x0, y1 - y0);
        Self {
            x0,
            y0,
            width,
            height,
            raster,
            data: vec![0.0; (width * height) as usize],
        }
    }

    /// Raises coverage inside `bounds` to at least `coverage(pixel_centre)`.
    fn accumulate(&mut self, bounds: Rect, coverage: impl Fn(Pos2) -> f32) {
        let Some((x0, y0, x1, y1)) = clip(self.raster, bounds) else {
            return;
        };
        let x0 = x0.max(self.x0);
        let y0 = y0.max(self.y0);
        let x1 = x1.min(self.x0 + self.width);
        let y1 = y1.min(self.y0 + self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let c = coverage(pos2(x as f32 + 0.5, y as f32 + 0.5));
                let idx = ((y - self.y0) * self.width + (x - self.x0)) as usize;
                if c > self.data[idx] {
                    self.data[idx] = c;
                }
            }
        }
    }

    fn iter(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        self.data.iter().enumerate().filter(|(_, c)| **c > 0.0).map(|(i, c)| {
            let i = i as u32;
            (self.x0 + i % self.width, self.y0 + i / self.width, *c)
        })
    }
}

/// Pixel range `[x0, x1) x [y0, y1)` of `bounds` inside a raster, padded by one pixel.
fn clip((width, height): (u32, u32), bounds: Rect) -> Option<(u32, u32, u32, u32)> {
    if !(bounds.min.x.is_finite()
        && bounds.min.y.is_finite()
        && bounds.max.x.is_finite()
        && bounds.max.y.is_finite())
    {
        return None;
    }
    let x0 = (bounds.min.x.floor() - 1.0).max(0.0) as u32;
    let y0 = (bounds.min.y.floor() - 1.0).max(0.0) as u32;
    let x1 = (bounds.max.x.ceil() + 1.0).clamp(0.0, width as f32) as u32;
    let y1 = (bounds.max.y.ceil() + 1.0).clamp(0.0, height as f32) as u32;
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

fn segment_distance(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Source-over compositing of an unmultiplied colour scaled by `coverage`
fn blend(dst: &mut Rgba<u8>, src: [u8; 4], coverage: f32) {
    let sa = src[3] as f32 / 255.0 * coverage;
    if sa <= 0.0 {
        return;
    }
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst.0[i] as f32 * da * (1.0 - sa)) / out_a;
        dst.0[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
