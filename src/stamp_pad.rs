use egui::{Color32, Pos2};

use crate::error::CanvasResult;
use crate::history::Snapshot;
use crate::surface::Surface;

/// Small free-draw surface on which the user authors a custom stamp
#[derive(Debug, Clone)]
pub struct StampPad {
    surface: Surface,
    last: Option<Pos2>,
    color: Color32,
    width: f32,
}

impl StampPad {
    pub fn new(size: u32, color: Color32, width: f32) -> Self {
        Self {
            surface: Surface::new(size, size),
            last: None,
            color,
            width,
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.last = Some(pos);
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        if let Some(last) = self.last {
            self.surface.stroke_segment(last, pos, self.width, self.color);
            self.last = Some(pos);
        }
    }

    pub fn pointer_up(&mut self) {
        self.last = None;
    }

    pub fn clear(&mut self) {
        self.surface.clear();
        self.last = None;
    }

    pub fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Still-image capture of the pad, ready for [`crate::Editor::adopt_custom_stamp`]
    pub fn capture(&self) -> CanvasResult<Snapshot> {
        Snapshot::encode(self.surface.image())
    }
}
