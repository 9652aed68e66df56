#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod history;
pub mod input;
pub mod path;
pub mod stamp_pad;
pub mod state;
pub mod surface;
pub mod texture_manager;
pub mod tools;

pub use app::PaintApp;
pub use config::{BrushConfig, EditorConfig};
pub use editor::Editor;
pub use error::{CanvasError, CanvasResult};
pub use event::{EditorEvent, EventBus, EventLog};
pub use history::{History, Snapshot};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use stamp_pad::StampPad;
pub use state::EditorState;
pub use surface::Surface;
pub use tools::{Tool, ToolKind, ToolType};
