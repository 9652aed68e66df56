mod bus;
mod events;

pub use bus::{EventBus, EventLog};
pub use events::EditorEvent;

/// Receives every event emitted on an [`EventBus`]
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}
