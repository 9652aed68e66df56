use egui::{Pos2, Vec2, vec2};
use image::RgbaImage;

use super::{DrawContext, Tool};
use crate::config::BrushConfig;

/// Which unit a stamp tool places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampKind {
    /// Filled disc
    Seed,
    /// Filled rectangle aligned with the direction of travel
    Long,
    /// The user-authored stamp image, aligned like a long bead
    Custom,
}

/// One placed stamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Pos2,
    /// Direction of travel from the previous placement, `atan2(dy, dx)`
    pub angle: f32,
}

/// Distance gate between consecutive stamps.
///
/// Distance is measured from the most recent placement, not from the previous
/// pointer sample, so stamp density depends on how often move events arrive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampSpacer {
    last: Pos2,
    spacing: f32,
}

impl StampSpacer {
    pub fn new(origin: Pos2, spacing: f32) -> Self {
        Self {
            last: origin,
            spacing,
        }
    }

    pub fn last(&self) -> Pos2 {
        self.last
    }

    /// Returns a placement when `pos` is farther than the spacing from the last one.
    pub fn advance(&mut self, pos: Pos2) -> Option<Placement> {
        let delta = pos - self.last;
        if delta.length() <= self.spacing {
            return None;
        }
        self.last = pos;
        Some(Placement {
            position: pos,
            angle: delta.y.atan2(delta.x),
        })
    }
}

/// A stamp image captured from the authoring pad
#[derive(Clone)]
pub struct CustomStamp {
    image: RgbaImage,
}

impl std::fmt::Debug for CustomStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomStamp")
            .field("dimensions", &self.image.dimensions())
            .finish()
    }
}

impl CustomStamp {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// On-canvas size with the longest side equal to `max_side`
    pub fn placed_size(&self, max_side: f32) -> Vec2 {
        let (w, h) = self.image.dimensions();
        let longest = w.max(h).max(1) as f32;
        vec2(w as f32, h as f32) * (max_side / longest)
    }
}

/// Seed, long and custom bead tools
#[derive(Debug, Clone)]
pub struct StampTool {
    kind: StampKind,
    spacing: f32,
    spacer: Option<StampSpacer>,
    placements: Vec<Placement>,
}

impl StampTool {
    pub fn new(kind: StampKind, config: &BrushConfig) -> Self {
        let spacing = match kind {
            StampKind::Seed => config.seed_spacing,
            StampKind::Long => config.long_spacing,
            StampKind::Custom => config.custom_spacing,
        };
        Self {
            kind,
            spacing,
            spacer: None,
            placements: Vec::new(),
        }
    }

    pub fn kind(&self) -> StampKind {
        self.kind
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Stamps placed during this gesture, in order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    fn stamp(&self, placement: Placement, ctx: &mut DrawContext<'_>) {
        match self.kind {
            StampKind::Seed => {
                ctx.canvas
                    .fill_disc(placement.position, ctx.config.seed_radius, ctx.color);
            }
            StampKind::Long => {
                ctx.canvas.fill_rotated_rect(
                    placement.position,
                    ctx.config.long_size(),
                    placement.angle,
                    ctx.color,
                );
            }
            StampKind::Custom => {
                if let Some(stamp) = ctx.custom_stamp {
                    ctx.canvas.draw_image_rotated(
                        stamp.image(),
                        placement.position,
                        stamp.placed_size(ctx.config.custom_size),
                        placement.angle,
                    );
                }
            }
        }
    }
}

impl Tool for StampTool {
    fn name(&self) -> &'static str {
        match self.kind {
            StampKind::Seed => "seed",
            StampKind::Long => "long",
            StampKind::Custom => "custom",
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, _ctx: &mut DrawContext<'_>) {
        self.spacer = Some(StampSpacer::new(pos, self.spacing));
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>) {
        if self.kind == StampKind::Custom && ctx.custom_stamp.is_none() {
            return;
        }
        let Some(placement) = self.spacer.as_mut().and_then(|s| s.advance(pos)) else {
            return;
        };
        self.stamp(placement, ctx);
        self.placements.push(placement);
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &mut DrawContext<'_>) {
        self.spacer = None;
    }
}
