use beadwork_paint::tools::ShapeGeometry;
use beadwork_paint::{Editor, EditorConfig, ToolKind};
use egui::{pos2, vec2};

fn small_editor() -> Editor {
    Editor::new(EditorConfig {
        canvas_width: 160,
        canvas_height: 120,
        ..Default::default()
    })
    .unwrap()
}

fn alpha(surface: &beadwork_paint::Surface, x: u32, y: u32) -> u8 {
    surface.pixel(x, y).map_or(0, |p| p[3])
}

#[test]
fn test_circle_radius_is_drag_length() {
    let mut editor = small_editor();
    editor.set_active_tool(ToolKind::Circle);
    editor.pointer_down(pos2(50.0, 50.0)).unwrap();
    editor.pointer_move(pos2(80.0, 50.0));
    let tool = editor.pointer_up(pos2(80.0, 50.0)).unwrap().unwrap();

    assert_eq!(
        tool.as_shape_tool().unwrap().committed(),
        Some(ShapeGeometry::Circle {
            center: pos2(50.0, 50.0),
            radius: 30.0
        })
    );
    // Outline only, centred on the press point
    assert!(alpha(editor.canvas(), 80, 50) > 0);
    assert!(alpha(editor.canvas(), 50, 20) > 0);
    assert_eq!(alpha(editor.canvas(), 50, 50), 0);
}

#[test]
fn test_rect_corner_is_the_press_point() {
    let mut editor = small_editor();
    editor.set_active_tool(ToolKind::Rect);
    editor.pointer_down(pos2(10.0, 10.0)).unwrap();
    editor.pointer_move(pos2(40.0, 30.0));
    let tool = editor.pointer_up(pos2(40.0, 30.0)).unwrap().unwrap();

    assert_eq!(
        tool.as_shape_tool().unwrap().committed(),
        Some(ShapeGeometry::Rect {
            origin: pos2(10.0, 10.0),
            size: vec2(30.0, 20.0)
        })
    );
    assert!(alpha(editor.canvas(), 25, 10) > 0);
    assert!(alpha(editor.canvas(), 40, 20) > 0);
    assert_eq!(alpha(editor.canvas(), 25, 20), 0);
    assert_eq!(alpha(editor.canvas(), 60, 20), 0);
}

#[test]
fn test_preview_shows_only_latest_drag() {
    let mut editor = small_editor();
    editor.set_active_tool(ToolKind::Rect);
    editor.pointer_down(pos2(10.0, 10.0)).unwrap();
    editor.pointer_move(pos2(100.0, 100.0));
    assert!(alpha(editor.preview(), 100, 50) > 0);

    editor.pointer_move(pos2(50.0, 50.0));
    // The larger outline from the previous move is gone
    assert_eq!(alpha(editor.preview(), 100, 50), 0);
    assert!(alpha(editor.preview(), 50, 30) > 0);
    assert!(editor.canvas().is_blank());

    editor.pointer_up(pos2(50.0, 50.0)).unwrap();
    assert!(editor.preview().is_blank());
    assert!(alpha(editor.canvas(), 50, 30) > 0);
}

#[test]
fn test_heart_spans_the_drag_box() {
    let mut editor = small_editor();
    editor.set_active_tool(ToolKind::Heart);
    editor.pointer_down(pos2(20.0, 20.0)).unwrap();
    editor.pointer_move(pos2(100.0, 100.0));
    editor.pointer_up(pos2(100.0, 100.0)).unwrap();

    // Tip at the bottom centre, lobes reach both sides
    assert!(alpha(editor.canvas(), 60, 99) > 0);
    assert!(alpha(editor.canvas(), 20, 44) > 0);
    assert!(alpha(editor.canvas(), 99, 44) > 0);
    assert_eq!(alpha(editor.canvas(), 60, 70), 0);
}

#[test]
fn test_leave_commits_shape_at_exit_point() {
    let mut editor = small_editor();
    editor.set_active_tool(ToolKind::Rect);
    editor.pointer_down(pos2(100.0, 60.0)).unwrap();
    editor.pointer_move(pos2(150.0, 100.0));
    let tool = editor.pointer_leave(pos2(170.0, 100.0)).unwrap().unwrap();

    assert_eq!(
        tool.as_shape_tool().unwrap().committed(),
        Some(ShapeGeometry::Rect {
            origin: pos2(100.0, 60.0),
            size: vec2(70.0, 40.0)
        })
    );
    assert!(!editor.is_drawing());
    assert!(editor.preview().is_blank());
    assert!(alpha(editor.canvas(), 130, 60) > 0);
}

#[test]
fn test_shape_undo_restores_previous_canvas() {
    let mut editor = small_editor();
    editor.set_active_tool(ToolKind::Circle);
    editor.pointer_down(pos2(60.0, 60.0)).unwrap();
    editor.pointer_move(pos2(80.0, 60.0));
    editor.pointer_up(pos2(80.0, 60.0)).unwrap();
    assert!(!editor.canvas().is_blank());

    assert!(editor.undo().unwrap());
    assert!(editor.pump_restores().unwrap());
    assert!(editor.canvas().is_blank());
}
