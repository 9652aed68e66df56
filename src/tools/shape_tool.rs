use egui::{Color32, Pos2, Vec2, pos2};

use super::{DrawContext, Tool};
use crate::path::Path;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Circle,
    Heart,
}

/// Which raster a shape is drawn onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Transient layer, cleared before every redraw
    Preview,
    /// The persistent canvas
    Canvas,
}

/// Parameters of a shape derived from a drag vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    /// Corner at the anchor; `size` keeps the drag's sign
    Rect { origin: Pos2, size: Vec2 },
    /// Centred on the anchor, radius is the drag length
    Circle { center: Pos2, radius: f32 },
    /// Fills the drag box: lobes on the anchor side, tip on the far side
    Heart { anchor: Pos2, current: Pos2 },
}

impl ShapeGeometry {
    pub fn from_drag(kind: ShapeKind, anchor: Pos2, current: Pos2) -> Self {
        match kind {
            ShapeKind::Rect => Self::Rect {
                origin: anchor,
                size: current - anchor,
            },
            ShapeKind::Circle => Self::Circle {
                center: anchor,
                radius: anchor.distance(current),
            },
            ShapeKind::Heart => Self::Heart { anchor, current },
        }
    }

    pub fn to_path(self) -> Path {
        match self {
            Self::Rect { origin, size } => Path::rect(origin, size),
            Self::Circle { center, radius } => Path::circle(center, radius),
            Self::Heart { anchor, current } => heart_path(anchor, current),
        }
    }
}

/// Four cubic Béziers: left lobe, left flank, right flank, right lobe
fn heart_path(anchor: Pos2, current: Pos2) -> Path {
    let (x1, y1) = (anchor.x, anchor.y);
    let (x2, h) = (current.x, current.y - anchor.y);
    let top = y1 + h * 0.3;
    let flank = y1 + h * 0.6;
    let bottom = y1 + h;
    let cx = x1 + (x2 - x1) / 2.0;

    let mut path = Path::new();
    path.move_to(pos2(cx, top))
        .cubic_to(pos2(cx, y1), pos2(x1, y1), pos2(x1, top))
        .cubic_to(pos2(x1, flank), pos2(cx, bottom), pos2(cx, bottom))
        .cubic_to(pos2(cx, bottom), pos2(x2, flank), pos2(x2, top))
        .cubic_to(pos2(x2, y1), pos2(cx, y1), pos2(cx, top))
        .close();
    path
}

/// Outlines the shape spanned by `anchor`..`current` on `surface`.
///
/// The preview layer is cleared first so each call shows only the latest drag.
pub fn draw_shape(
    surface: &mut Surface,
    target: RenderTarget,
    kind: ShapeKind,
    anchor: Pos2,
    current: Pos2,
    color: Color32,
    width: f32,
) -> ShapeGeometry {
    if target == RenderTarget::Preview {
        surface.clear();
    }
    let geometry = ShapeGeometry::from_drag(kind, anchor, current);
    let path = geometry.to_path();
    surface.stroke_polyline(path.points(), path.is_closed(), width, color);
    geometry
}

/// Drag-to-shape tool: previews on the transient layer, commits on release
#[derive(Debug, Clone)]
pub struct ShapeTool {
    kind: ShapeKind,
    anchor: Option<Pos2>,
    committed: Option<ShapeGeometry>,
}

impl ShapeTool {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            anchor: None,
            committed: None,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The shape written to the canvas on release, if the gesture finished
    pub fn committed(&self) -> Option<ShapeGeometry> {
        self.committed
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Rect => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Heart => "heart",
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, _ctx: &mut DrawContext<'_>) {
        self.anchor = Some(pos);
        self.committed = None;
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>) {
        let Some(anchor) = self.anchor else {
            return;
        };
        draw_shape(
            ctx.preview,
            RenderTarget::Preview,
            self.kind,
            anchor,
            pos,
            ctx.color,
            ctx.config.thread_width,
        );
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>) {
        let Some(anchor) = self.anchor.take() else {
            return;
        };
        ctx.preview.clear();
        let geometry = draw_shape(
            ctx.canvas,
            RenderTarget::Canvas,
            self.kind,
            anchor,
            pos,
            ctx.color,
            ctx.config.thread_width,
        );
        self.committed = Some(geometry);
    }
}
