use egui::{Color32, Rect, Sense, pos2, vec2};

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::error::CanvasResult;
use crate::event::{EditorEvent, EventLog};
use crate::input::{InputHandler, route_events, to_local};
use crate::stamp_pad::StampPad;
use crate::texture_manager::SurfaceTexture;
use crate::tools::ToolKind;

/// Pen width on the stamp authoring pad
const PAD_STROKE_WIDTH: f32 = 4.0;

pub struct PaintApp {
    editor: Editor,
    input: InputHandler,
    events: EventLog,
    stamp_pad: StampPad,
    show_stamp_modal: bool,
    canvas_texture: SurfaceTexture,
    preview_texture: SurfaceTexture,
    pad_texture: SurfaceTexture,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> CanvasResult<Self> {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> CanvasResult<Self> {
        let stamp_pad = StampPad::new(
            config.stamp_pad_size,
            config.default_color,
            PAD_STROKE_WIDTH,
        );
        let editor = Editor::new(config)?;
        let events = EventLog::new();
        editor.subscribe(Box::new(events.clone()));

        Ok(Self {
            editor,
            input: InputHandler::new(Rect::NOTHING),
            events,
            stamp_pad,
            show_stamp_modal: false,
            canvas_texture: SurfaceTexture::new("canvas"),
            preview_texture: SurfaceTexture::new("preview"),
            pad_texture: SurfaceTexture::new("stamp_pad"),
        })
    }

    fn handle_editor_events(&mut self) {
        for event in self.events.drain() {
            match event {
                EditorEvent::CustomStampRequested => self.show_stamp_modal = true,
                EditorEvent::CustomStampSaved { .. } => self.show_stamp_modal = false,
                _ => {}
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for kind in ToolKind::ALL {
                let selected = self.editor.active_tool() == kind;
                if ui.selectable_label(selected, tool_label(kind)).clicked() {
                    self.editor.set_active_tool(kind);
                }
            }

            ui.separator();

            let mut color = self.editor.color();
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                self.editor.set_color(color);
                self.stamp_pad.set_color(color);
            }

            ui.separator();

            let history = self.editor.history();
            let (can_undo, can_redo) = (history.can_undo(), history.can_redo());
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                report(self.editor.undo());
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                report(self.editor.redo());
            }
            if ui.button("Clear").clicked() {
                report(self.editor.clear());
            }

            ui.separator();

            if ui.button("Edit stamp").clicked() {
                self.show_stamp_modal = true;
            }
        });
    }

    fn canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let (width, height) = self.editor.canvas().dimensions();
        let (response, painter) =
            ui.allocate_painter(vec2(width as f32, height as f32), Sense::drag());
        let rect = response.rect;
        self.input.set_canvas_rect(rect);

        if !self.show_stamp_modal {
            let events = self.input.process_input(ctx);
            report(route_events(&events, &mut self.editor, rect.min));
        }
        report(self.editor.pump_restores());

        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        painter.rect_filled(rect, 0.0, Color32::WHITE);
        let canvas = self.canvas_texture.texture_id(ctx, self.editor.canvas());
        painter.image(canvas, rect, uv, Color32::WHITE);
        let preview = self.preview_texture.texture_id(ctx, self.editor.preview());
        painter.image(preview, rect, uv, Color32::WHITE);
    }

    fn stamp_modal(&mut self, ctx: &egui::Context) {
        let mut open = true;
        let mut close = false;
        egui::Window::new("Custom stamp")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                let (width, height) = self.stamp_pad.surface().dimensions();
                let (response, painter) =
                    ui.allocate_painter(vec2(width as f32, height as f32), Sense::drag());
                let rect = response.rect;

                if let Some(pos) = response.interact_pointer_pos() {
                    let local = to_local(pos, rect.min);
                    if response.drag_started() {
                        self.stamp_pad.pointer_down(local);
                    } else if response.dragged() {
                        self.stamp_pad.pointer_move(local);
                    }
                }
                if response.drag_stopped() {
                    self.stamp_pad.pointer_up();
                }

                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.rect_filled(rect, 0.0, Color32::WHITE);
                let pad = self.pad_texture.texture_id(ctx, self.stamp_pad.surface());
                painter.image(pad, rect, uv, Color32::WHITE);

                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        let saved = self
                            .stamp_pad
                            .capture()
                            .and_then(|capture| self.editor.adopt_custom_stamp(&capture));
                        if saved.is_ok() {
                            self.editor.set_active_tool(ToolKind::Custom);
                        }
                        report(saved);
                        close = true;
                    }
                    if ui.button("Clear").clicked() {
                        self.stamp_pad.clear();
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });
        if !open || close {
            self.show_stamp_modal = false;
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_editor_events();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ctx, ui));

        if self.show_stamp_modal {
            self.stamp_modal(ctx);
        }

        // Events raised this frame are handled at the start of the next one
        if !self.events.is_empty() || self.editor.is_drawing() {
            ctx.request_repaint();
        }
    }
}

fn tool_label(kind: ToolKind) -> &'static str {
    match kind {
        ToolKind::Thread => "Thread",
        ToolKind::Seed => "Seed bead",
        ToolKind::Long => "Long bead",
        ToolKind::Custom => "Custom bead",
        ToolKind::Rect => "Rectangle",
        ToolKind::Circle => "Circle",
        ToolKind::Heart => "Heart",
    }
}

fn report<T>(result: CanvasResult<T>) {
    if let Err(err) = result {
        log::error!("{}", err);
    }
}
