use std::fmt;
use std::str::FromStr;

use egui::{Color32, Pos2};
use thiserror::Error;

use crate::config::BrushConfig;
use crate::surface::Surface;

/// Everything a tool may touch while handling one pointer event
pub struct DrawContext<'a> {
    /// The persistent raster
    pub canvas: &'a mut Surface,
    /// Transient layer for in-progress shape drags
    pub preview: &'a mut Surface,
    /// Colour captured when the gesture started
    pub color: Color32,
    pub config: &'a BrushConfig,
    pub custom_stamp: Option<&'a CustomStamp>,
}

/// Tool trait defines the interface for all drawing tools.
///
/// A tool instance lives for exactly one gesture, from press to release.
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Handle pointer press on the canvas.
    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>);

    /// Handle pointer movement while the gesture is active.
    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>);

    /// Handle pointer release (or the pointer leaving the canvas).
    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>);
}

mod thread_tool;
pub use thread_tool::ThreadTool;

mod stamp_tool;
pub use stamp_tool::{CustomStamp, Placement, StampKind, StampSpacer, StampTool};

mod shape_tool;
pub use shape_tool::{RenderTarget, ShapeGeometry, ShapeKind, ShapeTool, draw_shape};

/// The seven tools a user can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    #[default]
    Thread,
    Seed,
    Long,
    Custom,
    Rect,
    Circle,
    Heart,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Thread,
        ToolKind::Seed,
        ToolKind::Long,
        ToolKind::Custom,
        ToolKind::Rect,
        ToolKind::Circle,
        ToolKind::Heart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Thread => "thread",
            Self::Seed => "seed",
            Self::Long => "long",
            Self::Custom => "custom",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Heart => "heart",
        }
    }

    /// Discrete, spacing-gated tools
    pub fn is_stamp(self) -> bool {
        matches!(self, Self::Seed | Self::Long | Self::Custom)
    }

    /// Drag-to-shape tools that preview before committing
    pub fn is_shape(self) -> bool {
        matches!(self, Self::Rect | Self::Circle | Self::Heart)
    }

    /// Creates a fresh tool instance for one gesture
    pub fn instantiate(self, config: &BrushConfig) -> ToolType {
        match self {
            Self::Thread => ToolType::Thread(ThreadTool::new()),
            Self::Seed => ToolType::Stamp(StampTool::new(StampKind::Seed, config)),
            Self::Long => ToolType::Stamp(StampTool::new(StampKind::Long, config)),
            Self::Custom => ToolType::Stamp(StampTool::new(StampKind::Custom, config)),
            Self::Rect => ToolType::Shape(ShapeTool::new(ShapeKind::Rect)),
            Self::Circle => ToolType::Shape(ShapeTool::new(ShapeKind::Circle)),
            Self::Heart => ToolType::Shape(ShapeTool::new(ShapeKind::Heart)),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownTool(s.to_owned()))
    }
}

/// Enum representing all available tool instances.
/// This allows us to avoid using Box<dyn Tool> and simplifies memory management
#[derive(Debug, Clone)]
pub enum ToolType {
    Thread(ThreadTool),
    Stamp(StampTool),
    Shape(ShapeTool),
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Thread(tool) => tool.name(),
            Self::Stamp(tool) => tool.name(),
            Self::Shape(tool) => tool.name(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>) {
        match self {
            Self::Thread(tool) => tool.on_pointer_down(pos, ctx),
            Self::Stamp(tool) => tool.on_pointer_down(pos, ctx),
            Self::Shape(tool) => tool.on_pointer_down(pos, ctx),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>) {
        match self {
            Self::Thread(tool) => tool.on_pointer_move(pos, ctx),
            Self::Stamp(tool) => tool.on_pointer_move(pos, ctx),
            Self::Shape(tool) => tool.on_pointer_move(pos, ctx),
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>) {
        match self {
            Self::Thread(tool) => tool.on_pointer_up(pos, ctx),
            Self::Stamp(tool) => tool.on_pointer_up(pos, ctx),
            Self::Shape(tool) => tool.on_pointer_up(pos, ctx),
        }
    }
}

impl ToolType {
    pub fn as_stamp_tool(&self) -> Option<&StampTool> {
        match self {
            Self::Stamp(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_shape_tool(&self) -> Option<&ShapeTool> {
        match self {
            Self::Shape(tool) => Some(tool),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.name().parse::<ToolKind>(), Ok(kind));
        }
        let err = "eraser".parse::<ToolKind>().unwrap_err();
        assert_eq!(err, UnknownTool("eraser".to_owned()));
        assert_eq!(err.to_string(), "unknown tool: eraser");
    }

    #[test]
    fn test_tool_families() {
        assert!(ToolKind::Custom.is_stamp());
        assert!(!ToolKind::Thread.is_stamp());
        assert!(ToolKind::Heart.is_shape());
        assert!(!ToolKind::Long.is_shape());
    }
}
