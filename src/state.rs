use egui::{Color32, Pos2};

use crate::tools::{ToolKind, ToolType};

/// Whether a gesture is in progress, and with which tool instance
#[derive(Debug, Clone, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Drawing {
        /// Selection at press time; later selections wait for the next gesture
        kind: ToolKind,
        active_tool: ToolType,
        anchor: Pos2,
        /// Most recent pointer position of the gesture
        last_pos: Pos2,
        /// Colour picked when the gesture started
        color: Color32,
    },
}

impl EditorState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn active_tool(&self) -> Option<&ToolType> {
        match self {
            Self::Drawing { active_tool, .. } => Some(active_tool),
            Self::Idle => None,
        }
    }

    /// Where the pointer was last seen during the current gesture
    pub fn last_pos(&self) -> Option<Pos2> {
        match self {
            Self::Drawing { last_pos, .. } => Some(*last_pos),
            Self::Idle => None,
        }
    }

    /// Where the current gesture started
    pub fn anchor(&self) -> Option<Pos2> {
        match self {
            Self::Drawing { anchor, .. } => Some(*anchor),
            Self::Idle => None,
        }
    }
}
