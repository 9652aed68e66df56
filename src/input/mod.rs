use egui::{Context, PointerButton, Pos2, Rect};

mod router;
pub use router::{route_event, route_events, to_local};

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer events in screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Mouse left the canvas, or the window altogether
    PointerLeave {
        last_known_location: InputLocation,
    },
}

impl InputEvent {
    pub fn location(&self) -> InputLocation {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerUp { location, .. }
            | InputEvent::PointerMove { location, .. } => *location,
            InputEvent::PointerLeave { last_known_location } => *last_known_location,
        }
    }
}

/// One frame of raw pointer state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerFrame {
    pub hover_pos: Option<Pos2>,
    pub pressed: Vec<PointerButton>,
    pub released: Vec<PointerButton>,
    pub held: Vec<PointerButton>,
}

impl PointerFrame {
    pub fn from_egui(input: &egui::InputState) -> Self {
        let pointer = &input.pointer;
        Self {
            hover_pos: pointer.hover_pos(),
            pressed: BUTTONS
                .into_iter()
                .filter(|b| pointer.button_pressed(*b))
                .collect(),
            released: BUTTONS
                .into_iter()
                .filter(|b| pointer.button_released(*b))
                .collect(),
            held: BUTTONS
                .into_iter()
                .filter(|b| pointer.button_down(*b))
                .collect(),
        }
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Creates an InputLocation from a position
    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let frame = ctx.input(PointerFrame::from_egui);
        self.process_frame(&frame)
    }

    pub fn process_frame(&mut self, frame: &PointerFrame) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if let Some(pos) = frame.hover_pos {
            let location = self.make_location(pos);
            let was_in_canvas = self
                .last_pointer_pos
                .is_some_and(|last| self.canvas_rect.contains(last));

            if Some(pos) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove {
                    location,
                    held_buttons: frame.held.clone(),
                });
            }
            if was_in_canvas && !location.is_in_canvas {
                events.push(InputEvent::PointerLeave {
                    last_known_location: location,
                });
            }
            self.last_pointer_pos = Some(pos);
        } else if let Some(last) = self.last_pointer_pos.take() {
            // Pointer left the window
            events.push(InputEvent::PointerLeave {
                last_known_location: self.make_location(last),
            });
        }

        if let Some(pos) = frame.hover_pos {
            let location = self.make_location(pos);
            for button in &frame.pressed {
                events.push(InputEvent::PointerDown {
                    location,
                    button: *button,
                });
            }
            for button in &frame.released {
                events.push(InputEvent::PointerUp {
                    location,
                    button: *button,
                });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_max(pos2(100.0, 50.0), pos2(300.0, 250.0)))
    }

    #[test]
    fn test_press_inside_canvas() {
        let mut input = handler();
        let events = input.process_frame(&PointerFrame {
            hover_pos: Some(pos2(150.0, 60.0)),
            pressed: vec![PointerButton::Primary],
            ..Default::default()
        });

        assert!(matches!(events[0], InputEvent::PointerMove { .. }));
        assert_eq!(
            events[1],
            InputEvent::PointerDown {
                location: InputLocation {
                    position: pos2(150.0, 60.0),
                    is_in_canvas: true,
                },
                button: PointerButton::Primary,
            }
        );
    }

    #[test]
    fn test_leaving_canvas_emits_leave() {
        let mut input = handler();
        input.process_frame(&PointerFrame {
            hover_pos: Some(pos2(150.0, 60.0)),
            ..Default::default()
        });
        let events = input.process_frame(&PointerFrame {
            hover_pos: Some(pos2(350.0, 60.0)),
            ..Default::default()
        });

        assert!(events.iter().any(|e| matches!(e, InputEvent::PointerLeave { .. })));
    }

    #[test]
    fn test_losing_hover_emits_leave() {
        let mut input = handler();
        input.process_frame(&PointerFrame {
            hover_pos: Some(pos2(150.0, 60.0)),
            ..Default::default()
        });
        let events = input.process_frame(&PointerFrame::default());

        assert_eq!(
            events,
            vec![InputEvent::PointerLeave {
                last_known_location: InputLocation {
                    position: pos2(150.0, 60.0),
                    is_in_canvas: true,
                },
            }]
        );
    }
}
