use egui::{PointerButton, Pos2};

use super::InputEvent;
use crate::editor::Editor;
use crate::error::CanvasResult;

/// Converts a screen position into surface-local coordinates
pub fn to_local(screen: Pos2, canvas_origin: Pos2) -> Pos2 {
    (screen - canvas_origin).to_pos2()
}

/// Routes one input event to the editor.
///
/// Only primary presses inside the canvas start a gesture. A release or the
/// pointer leaving the canvas both end it.
pub fn route_event(
    event: &InputEvent,
    editor: &mut Editor,
    canvas_origin: Pos2,
) -> CanvasResult<()> {
    let local = to_local(event.location().position, canvas_origin);
    match event {
        InputEvent::PointerDown {
            location,
            button: PointerButton::Primary,
        } if location.is_in_canvas => editor.pointer_down(local)?,
        InputEvent::PointerMove { .. } => editor.pointer_move(local),
        InputEvent::PointerUp {
            button: PointerButton::Primary,
            ..
        } => {
            editor.pointer_up(local)?;
        }
        InputEvent::PointerLeave { .. } => {
            editor.pointer_leave(local)?;
        }
        _ => {}
    }
    Ok(())
}

pub fn route_events(
    events: &[InputEvent],
    editor: &mut Editor,
    canvas_origin: Pos2,
) -> CanvasResult<()> {
    for event in events {
        route_event(event, editor, canvas_origin)?;
    }
    Ok(())
}
