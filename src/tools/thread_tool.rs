use egui::Pos2;

use super::{DrawContext, Tool};

/// Continuous thread: a polyline sampled at every pointer move
#[derive(Debug, Clone, Default)]
pub struct ThreadTool {
    // Transient state: where the last segment ended
    last: Option<Pos2>,
    segments: usize,
}

impl ThreadTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments drawn so far in this gesture
    pub fn segments(&self) -> usize {
        self.segments
    }
}

impl Tool for ThreadTool {
    fn name(&self) -> &'static str {
        "thread"
    }

    fn on_pointer_down(&mut self, pos: Pos2, _ctx: &mut DrawContext<'_>) {
        self.last = Some(pos);
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut DrawContext<'_>) {
        let Some(last) = self.last else {
            return;
        };
        ctx.canvas
            .stroke_segment(last, pos, ctx.config.thread_width, ctx.color);
        self.last = Some(pos);
        self.segments += 1;
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &mut DrawContext<'_>) {
        self.last = None;
    }
}
