use crate::tools::ToolKind;

/// Notifications the editor sends back to the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The active tool changed; the toolbar should highlight `new`
    ToolChanged { old: ToolKind, new: ToolKind },
    /// The custom stamp tool was selected before any stamp exists
    CustomStampRequested,
    /// A custom stamp was captured from the authoring pad
    CustomStampSaved { width: u32, height: u32 },
    /// A gesture finished and was captured into history
    ActionCompleted { tool: ToolKind },
    /// History moved; `position` indexes the snapshot on screen
    HistoryChanged { position: Option<usize>, len: usize },
    /// A snapshot was drawn back onto the canvas
    Restored,
    CanvasCleared,
}
