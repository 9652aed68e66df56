use beadwork_paint::{Editor, EditorConfig, EditorEvent, EventLog, ToolKind};
use egui::{Color32, Pos2, pos2};
use image::RgbaImage;

fn small_editor(max_history: usize) -> Editor {
    Editor::new(EditorConfig {
        canvas_width: 120,
        canvas_height: 100,
        max_history,
        ..Default::default()
    })
    .unwrap()
}

fn drag(editor: &mut Editor, kind: ToolKind, points: &[Pos2]) {
    editor.set_active_tool(kind);
    editor.pointer_down(points[0]).unwrap();
    for p in &points[1..] {
        editor.pointer_move(*p);
    }
    editor.pointer_up(*points.last().unwrap()).unwrap();
}

/// Performs `count` distinct actions and returns the canvas after each one,
/// starting with the blank canvas.
fn draw_actions(editor: &mut Editor, count: usize) -> Vec<RgbaImage> {
    let mut states = vec![editor.canvas().image().clone()];
    for i in 0..count {
        let y = 10.0 + i as f32 * 12.0;
        let kind = [ToolKind::Thread, ToolKind::Seed, ToolKind::Long][i % 3];
        drag(editor, kind, &[pos2(5.0, y), pos2(40.0, y), pos2(80.0, y + 3.0)]);
        states.push(editor.canvas().image().clone());
    }
    states
}

#[test]
fn test_undo_redo_walks_every_state() {
    let mut editor = small_editor(20);
    let states = draw_actions(&mut editor, 6);

    for expected in states.iter().rev().skip(1) {
        assert!(editor.undo().unwrap());
        assert!(editor.pump_restores().unwrap());
        assert_eq!(editor.canvas().image(), expected);
    }
    assert!(!editor.undo().unwrap());

    for expected in states.iter().skip(1) {
        assert!(editor.redo().unwrap());
        assert!(editor.pump_restores().unwrap());
        assert_eq!(editor.canvas().image(), expected);
    }
    assert!(!editor.redo().unwrap());
}

#[test]
fn test_new_action_discards_redo() {
    let mut editor = small_editor(20);
    draw_actions(&mut editor, 3);
    editor.undo().unwrap();
    editor.undo().unwrap();
    editor.pump_restores().unwrap();

    drag(&mut editor, ToolKind::Rect, &[pos2(10.0, 10.0), pos2(50.0, 50.0)]);

    assert!(!editor.history().can_redo());
    assert!(!editor.redo().unwrap());
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn test_history_is_bounded() {
    let mut editor = small_editor(3);
    let states = draw_actions(&mut editor, 6);

    assert_eq!(editor.history().len(), 3);
    assert!(editor.undo().unwrap());
    assert!(editor.undo().unwrap());
    assert!(!editor.undo().unwrap());

    editor.pump_restores().unwrap();
    // Only the three most recent states survive
    assert_eq!(editor.canvas().image(), &states[4]);
}

#[test]
fn test_clear_is_undoable() {
    let mut editor = small_editor(20);
    let states = draw_actions(&mut editor, 2);

    editor.clear().unwrap();
    assert!(editor.canvas().is_blank());

    editor.undo().unwrap();
    editor.pump_restores().unwrap();
    assert_eq!(editor.canvas().image(), &states[2]);
}

#[test]
fn test_rapid_undos_apply_only_the_latest() {
    let mut editor = small_editor(20);
    let states = draw_actions(&mut editor, 4);
    let log = EventLog::new();
    editor.subscribe(Box::new(log.clone()));

    editor.undo().unwrap();
    editor.undo().unwrap();
    editor.undo().unwrap();
    assert!(editor.pump_restores().unwrap());

    assert_eq!(editor.canvas().image(), &states[1]);
    let restores = log
        .drain()
        .into_iter()
        .filter(|e| *e == EditorEvent::Restored)
        .count();
    assert_eq!(restores, 1);
}

#[test]
fn test_clear_supersedes_pending_restore() {
    let mut editor = small_editor(20);
    draw_actions(&mut editor, 2);

    editor.undo().unwrap();
    editor.clear().unwrap();

    assert!(!editor.pump_restores().unwrap());
    assert!(editor.canvas().is_blank());
}

#[test]
fn test_gesture_draws_on_restored_state() {
    let mut editor = small_editor(20);
    let states = draw_actions(&mut editor, 2);

    // Restore still pending when the next gesture starts
    editor.undo().unwrap();
    editor.set_color(Color32::RED);
    drag(&mut editor, ToolKind::Seed, &[pos2(100.0, 90.0), pos2(100.0, 60.0)]);

    let first_action_pixel = states[1].get_pixel(40, 10).0;
    assert_eq!(editor.canvas().pixel(40, 10), Some(first_action_pixel));
    // The second action was undone before drawing
    assert_eq!(editor.canvas().pixel(40, 22).map(|p| p[3]), Some(0));
}

#[test]
fn test_undo_mid_gesture_reverts_that_gesture() {
    let mut editor = small_editor(20);
    drag(&mut editor, ToolKind::Seed, &[pos2(20.0, 50.0), pos2(40.0, 50.0)]);
    let first = editor.canvas().image().clone();

    editor.pointer_down(pos2(100.0, 20.0)).unwrap();
    editor.pointer_move(pos2(100.0, 60.0));
    assert!(editor.undo().unwrap());
    assert!(!editor.is_drawing());
    // The late release has nothing left to finish
    assert!(editor.pointer_up(pos2(100.0, 60.0)).unwrap().is_none());
    editor.pump_restores().unwrap();

    // Both actions were kept: blank, first bead, second bead
    assert_eq!(editor.history().len(), 3);
    assert!(editor.history().can_redo());
    assert_eq!(editor.canvas().image(), &first);
    let current = editor.history().current().unwrap().decode_blocking().unwrap();
    assert_eq!(editor.canvas().image(), &current);
    assert_eq!(editor.canvas().pixel(40, 50).map(|p| p[3]), Some(255));

    editor.redo().unwrap();
    editor.pump_restores().unwrap();
    assert_eq!(editor.canvas().pixel(100, 60).map(|p| p[3]), Some(255));
}

#[test]
fn test_redo_mid_gesture_keeps_canvas_and_history_in_step() {
    let mut editor = small_editor(20);
    let states = draw_actions(&mut editor, 2);
    editor.undo().unwrap();

    editor.set_active_tool(ToolKind::Seed);
    editor.pointer_down(pos2(100.0, 80.0)).unwrap();
    editor.pointer_move(pos2(100.0, 50.0));
    // Finishing the gesture captures it, which drops the redo state
    assert!(!editor.redo().unwrap());
    editor.pump_restores().unwrap();

    assert_eq!(editor.history().len(), 3);
    let current = editor.history().current().unwrap().decode_blocking().unwrap();
    assert_eq!(editor.canvas().image(), &current);
    assert_ne!(editor.canvas().image(), &states[2]);
}
