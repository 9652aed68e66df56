use egui::{Color32, Pos2};

use crate::config::EditorConfig;
use crate::error::CanvasResult;
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::history::{DecodedRestore, History, RestoreQueue, Snapshot};
use crate::state::EditorState;
use crate::surface::Surface;
use crate::tools::{CustomStamp, DrawContext, Tool, ToolKind, ToolType};

/// Owns all drawing state and turns surface-local pointer events into pixels.
///
/// The host feeds pointer events in, calls [`Editor::pump_restores`] once per
/// frame and reads back [`Editor::canvas`] and [`Editor::preview`].
#[derive(Debug)]
pub struct Editor {
    canvas: Surface,
    preview: Surface,
    tool: ToolKind,
    state: EditorState,
    color: Color32,
    config: EditorConfig,
    custom_stamp: Option<CustomStamp>,
    history: History,
    restores: RestoreQueue,
    event_bus: EventBus,
}

impl Editor {
    /// Creates a blank editor and records the blank canvas as the first snapshot.
    pub fn new(config: EditorConfig) -> CanvasResult<Self> {
        let mut editor = Self {
            canvas: Surface::new(config.canvas_width, config.canvas_height),
            preview: Surface::new(config.canvas_width, config.canvas_height),
            tool: ToolKind::default(),
            state: EditorState::Idle,
            color: config.default_color,
            history: History::new(config.max_history),
            restores: RestoreQueue::new(),
            custom_stamp: None,
            event_bus: EventBus::new(),
            config,
        };
        editor.capture()?;
        Ok(editor)
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    pub fn set_active_tool(&mut self, kind: ToolKind) {
        let old = std::mem::replace(&mut self.tool, kind);
        log::info!("Tool selected: {}", kind);
        self.event_bus.emit(EditorEvent::ToolChanged { old, new: kind });

        if kind == ToolKind::Custom && self.custom_stamp.is_none() {
            log::debug!("No custom stamp yet, asking the host to author one");
            self.event_bus.emit(EditorEvent::CustomStampRequested);
        }
    }

    pub fn active_tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Starts a gesture with the selected tool.
    ///
    /// Pending restores are applied first so the gesture draws on the state
    /// the history cursor points at.
    pub fn pointer_down(&mut self, pos: Pos2) -> CanvasResult<()> {
        if self.state.is_drawing() {
            log::warn!("Pointer pressed mid-gesture, finishing the previous one");
            self.pointer_up(pos)?;
        }
        self.pump_restores()?;

        let mut active_tool = self.tool.instantiate(&self.config.brush);
        let color = self.color;
        active_tool.on_pointer_down(pos, &mut self.draw_context(color));
        self.state = EditorState::Drawing {
            kind: self.tool,
            active_tool,
            anchor: pos,
            last_pos: pos,
            color,
        };
        Ok(())
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        let Self {
            canvas,
            preview,
            state,
            config,
            custom_stamp,
            ..
        } = self;
        if let EditorState::Drawing {
            active_tool,
            last_pos,
            color,
            ..
        } = state
        {
            *last_pos = pos;
            let mut ctx = DrawContext {
                canvas,
                preview,
                color: *color,
                config: &config.brush,
                custom_stamp: custom_stamp.as_ref(),
            };
            active_tool.on_pointer_move(pos, &mut ctx);
        }
    }

    /// Finishes the gesture and captures the result into history.
    ///
    /// Returns the finished tool instance, or `None` when no gesture was active.
    pub fn pointer_up(&mut self, pos: Pos2) -> CanvasResult<Option<ToolType>> {
        let EditorState::Drawing {
            kind,
            mut active_tool,
            color,
            ..
        } = std::mem::take(&mut self.state)
        else {
            return Ok(None);
        };

        active_tool.on_pointer_up(pos, &mut self.draw_context(color));
        self.capture()?;
        log::info!("Completed {} action", kind);
        self.event_bus.emit(EditorEvent::ActionCompleted { tool: kind });
        Ok(Some(active_tool))
    }

    /// Leaving the canvas ends the gesture exactly like a release.
    pub fn pointer_leave(&mut self, pos: Pos2) -> CanvasResult<Option<ToolType>> {
        self.pointer_up(pos)
    }

    /// Steps back one snapshot. Returns `false` when already at the oldest one.
    ///
    /// A gesture in progress is finished and captured first, so undo reverts it.
    pub fn undo(&mut self) -> CanvasResult<bool> {
        self.finish_gesture()?;
        let Some(snapshot) = self.history.undo().cloned() else {
            return Ok(false);
        };
        let token = self.restores.submit(snapshot)?;
        log::info!("Undo to {:?} ({:?})", self.history.position(), token);
        self.emit_history_changed();
        Ok(true)
    }

    /// Steps forward one snapshot. Returns `false` when already at the newest one.
    pub fn redo(&mut self) -> CanvasResult<bool> {
        self.finish_gesture()?;
        let Some(snapshot) = self.history.redo().cloned() else {
            return Ok(false);
        };
        let token = self.restores.submit(snapshot)?;
        log::info!("Redo to {:?} ({:?})", self.history.position(), token);
        self.emit_history_changed();
        Ok(true)
    }

    /// Drives pending snapshot decodes. Returns `true` if the canvas changed.
    pub fn pump_restores(&mut self) -> CanvasResult<bool> {
        match self.restores.poll() {
            Some(decoded) => self.apply_restore(decoded),
            None => Ok(false),
        }
    }

    /// Draws a decoded snapshot unless a newer restore or a clear superseded it.
    pub fn apply_restore(&mut self, decoded: DecodedRestore) -> CanvasResult<bool> {
        if !self.restores.is_current(decoded.token) {
            log::debug!("Ignoring stale restore {:?}", decoded.token);
            return Ok(false);
        }
        self.canvas.replace_with(&decoded.image)?;
        self.event_bus.emit(EditorEvent::Restored);
        Ok(true)
    }

    /// Wipes the canvas. The wipe is itself an undoable action.
    pub fn clear(&mut self) -> CanvasResult<()> {
        self.restores.supersede();
        self.canvas.clear();
        self.preview.clear();
        self.capture()?;
        log::info!("Canvas cleared");
        self.event_bus.emit(EditorEvent::CanvasCleared);
        Ok(())
    }

    /// Decodes a capture of the authoring pad and uses it as the custom stamp.
    pub fn adopt_custom_stamp(&mut self, capture: &Snapshot) -> CanvasResult<()> {
        let image = capture.decode_blocking()?;
        let (width, height) = image.dimensions();
        self.custom_stamp = Some(CustomStamp::new(image));
        log::info!("Custom stamp saved ({}x{})", width, height);
        self.event_bus
            .emit(EditorEvent::CustomStampSaved { width, height });
        Ok(())
    }

    pub fn canvas(&self) -> &Surface {
        &self.canvas
    }

    pub fn preview(&self) -> &Surface {
        &self.preview
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state.is_drawing()
    }

    /// The tool instance of the gesture in progress
    pub fn current_gesture(&self) -> Option<&ToolType> {
        self.state.active_tool()
    }

    pub fn custom_stamp(&self) -> Option<&CustomStamp> {
        self.custom_stamp.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Ends the gesture in progress where the pointer was last seen
    fn finish_gesture(&mut self) -> CanvasResult<()> {
        if let Some(pos) = self.state.last_pos() {
            log::debug!("History navigation mid-gesture, finishing it at {:?}", pos);
            self.pointer_up(pos)?;
        }
        Ok(())
    }

    fn draw_context(&mut self, color: Color32) -> DrawContext<'_> {
        DrawContext {
            canvas: &mut self.canvas,
            preview: &mut self.preview,
            color,
            config: &self.config.brush,
            custom_stamp: self.custom_stamp.as_ref(),
        }
    }

    fn capture(&mut self) -> CanvasResult<()> {
        let snapshot = Snapshot::encode(self.canvas.image())?;
        self.history.push(snapshot);
        self.emit_history_changed();
        Ok(())
    }

    fn emit_history_changed(&self) {
        self.event_bus.emit(EditorEvent::HistoryChanged {
            position: self.history.position(),
            len: self.history.len(),
        });
    }
}
